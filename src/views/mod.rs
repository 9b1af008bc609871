//! Text renditions of the directory pages.
//!
//! Each page owns its local UI state and talks to the shared
//! [`EmployeeStore`](crate::client::EmployeeStore) for everything else.

pub mod form;
pub mod list;
pub mod profile;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use validator::ValidationErrors;

/// Editable employee fields, addressed by their input name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Age,
    Department,
    Experience,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::Department => "department",
            Field::Experience => "experience",
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "age" => Ok(Field::Age),
            "department" => Ok(Field::Department),
            "experience" => Ok(Field::Experience),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

/// First validation message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(err: ValidationErrors) -> Self {
        let mut errors = BTreeMap::new();
        for (name, errs) in err.field_errors() {
            let (Ok(field), Some(first)) = (name.parse::<Field>(), errs.first()) else {
                continue;
            };
            let message = first
                .message
                .as_deref()
                .map(str::to_string)
                .unwrap_or_else(|| first.code.to_string());
            errors.insert(field, message);
        }
        FormErrors(errors)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field.as_str(), message))
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}

/// The two pages of the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Profile(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Profile(id) => format!("/profile/{}", id),
        }
    }
}
