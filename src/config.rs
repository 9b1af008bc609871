use std::env;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_SEED_EMPLOYEES: usize = 10;
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub seed_employees: usize,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl Config {
    /// Reads `BIND_ADDR` and `SEED_EMPLOYEES`; call `dotenv()` first so a
    /// `.env` file is honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup("BIND_ADDR") {
            Some(addr) if addr.trim().is_empty() => {
                return Err(ConfigError {
                    key: "BIND_ADDR",
                    value: addr,
                })
            }
            Some(addr) => addr,
            None => DEFAULT_BIND_ADDR.to_string(),
        };

        let seed_employees = match lookup("SEED_EMPLOYEES") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError {
                key: "SEED_EMPLOYEES",
                value: raw.clone(),
            })?,
            None => DEFAULT_SEED_EMPLOYEES,
        };

        Ok(Config {
            bind_addr,
            seed_employees,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.seed_employees, 10);
    }

    #[test]
    fn reads_overrides() {
        let config =
            Config::from_lookup(lookup(&[("BIND_ADDR", "0.0.0.0:9000"), ("SEED_EMPLOYEES", "0")]))
                .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.seed_employees, 0);
    }

    #[test]
    fn rejects_non_numeric_seed_count() {
        let err = Config::from_lookup(lookup(&[("SEED_EMPLOYEES", "lots")])).unwrap_err();
        assert_eq!(err.key, "SEED_EMPLOYEES");
        assert_eq!(err.to_string(), "Invalid value for SEED_EMPLOYEES: \"lots\"");
    }
}
