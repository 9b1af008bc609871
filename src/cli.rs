use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::client::{ApiError, EmployeeApi, EmployeeStore};
use crate::config::DEFAULT_API_URL;
use crate::views::form::{EmployeeForm, SubmitError};
use crate::views::list::EmployeeList;
use crate::views::profile::{ProfileDetails, ProfileError};
use crate::views::{Field, Route};

#[derive(Parser, Debug)]
#[command(name = "employee-directory", version, about = "Employee directory backed by a mock REST API")]
pub struct Cli {
    /// Base URL of the employee API
    #[arg(long, env = "EMPLOYEE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the mock REST API
    Serve,

    #[command(flatten)]
    Client(ClientCommand),
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ClientCommand {
    /// Show the employee list
    List,

    /// Add a new employee
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        age: String,
        #[arg(long, default_value = "")]
        department: String,
        #[arg(long, default_value = "")]
        experience: String,
    },

    /// Show one employee's profile
    Show { id: String },

    /// Edit fields of an employee's profile
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        age: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        experience: Option<String>,
    },

    /// Delete an employee
    Delete { id: String },
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Runs one client command against `store` and returns the page to print.
pub async fn run<A: EmployeeApi>(
    command: ClientCommand,
    store: &mut EmployeeStore<A>,
) -> Result<String, CliError> {
    match command {
        ClientCommand::List => {
            let page = EmployeeList::new();
            page.mount(store).await?;
            Ok(page.render(store.state()))
        }
        ClientCommand::Add {
            name,
            age,
            department,
            experience,
        } => {
            let mut form = EmployeeForm::new();
            form.values.set(Field::Name, name);
            form.values.set(Field::Age, age);
            form.values.set(Field::Department, department);
            form.values.set(Field::Experience, experience);

            // the list is mounted alongside the form
            let page = EmployeeList::new();
            page.mount(store).await?;
            let created = form.submit(store).await?;
            Ok(format!(
                "Added employee {}\n{}",
                created.id,
                page.render(store.state())
            ))
        }
        ClientCommand::Show { id } => {
            let mut profile = ProfileDetails::new(id);
            profile.mount(store).await;
            Ok(profile.render(store.state()))
        }
        ClientCommand::Edit {
            id,
            name,
            age,
            department,
            experience,
        } => {
            let mut profile = ProfileDetails::new(id);
            profile.mount(store).await;
            profile.edit(store)?;
            for (field, value) in [
                (Field::Name, name),
                (Field::Age, age),
                (Field::Department, department),
                (Field::Experience, experience),
            ] {
                if let Some(value) = value {
                    profile.set_field(field, value);
                }
            }
            profile.save(store).await?;
            Ok(profile.render(store.state()))
        }
        ClientCommand::Delete { id } => {
            let mut profile = ProfileDetails::new(id);
            profile.mount(store).await;
            if store.employee(profile.id()).is_none() {
                return Err(ProfileError::NotFound.into());
            }
            let (route, result) = profile.delete(store).await;
            result?;
            log::debug!("navigating to {}", route.path());
            match route {
                Route::List => {
                    let page = EmployeeList::new();
                    page.mount(store).await?;
                    Ok(page.render(store.state()))
                }
                Route::Profile(_) => Ok(profile.render(store.state())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::store::tests::LocalApi;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("employee-directory").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn parses_client_and_server_commands() {
        assert!(matches!(parse(&["serve"]), Command::Serve));
        assert!(matches!(
            parse(&["show", "42"]),
            Command::Client(ClientCommand::Show { id }) if id == "42"
        ));
        match parse(&["edit", "7", "--age", "31"]) {
            Command::Client(ClientCommand::Edit { id, age, name, .. }) => {
                assert_eq!(id, "7");
                assert_eq!(age.as_deref(), Some("31"));
                assert_eq!(name, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[actix_web::test]
    async fn add_prints_the_refreshed_list() {
        let mut store = EmployeeStore::new(LocalApi::seeded(1));
        let command = ClientCommand::Add {
            name: "Katherine".to_string(),
            age: "45".to_string(),
            department: "Flight Research".to_string(),
            experience: "Orbital mechanics".to_string(),
        };

        let output = run(command, &mut store).await.unwrap();

        assert!(output.starts_with("Added employee "));
        assert!(output.contains("Katherine"));
        assert_eq!(store.state().employees.len(), 2);
    }

    #[actix_web::test]
    async fn add_with_missing_fields_reports_form_errors() {
        let mut store = EmployeeStore::new(LocalApi::seeded(0));
        let command = ClientCommand::Add {
            name: String::new(),
            age: "12".to_string(),
            department: "Ops".to_string(),
            experience: "Pager".to_string(),
        };

        let err = run(command, &mut store).await.unwrap_err();
        assert_eq!(err.to_string(), "name: Name is required");
    }

    #[actix_web::test]
    async fn edit_then_delete_round_trip() {
        let mut store = EmployeeStore::new(LocalApi::seeded(2));

        let edit = ClientCommand::Edit {
            id: "2".to_string(),
            name: None,
            age: None,
            department: Some("Platform".to_string()),
            experience: None,
        };
        let output = run(edit, &mut store).await.unwrap();
        assert!(output.contains("Department: Platform"));

        let output = run(ClientCommand::Delete { id: "2".to_string() }, &mut store)
            .await
            .unwrap();
        assert!(output.starts_with("Employee List\n"));
        assert!(output.contains("show 1 | delete 1"));
        assert!(store.employee("2").is_none());
        assert_eq!(store.state().employees.len(), 1);

        let err = run(ClientCommand::Delete { id: "2".to_string() }, &mut store)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Employee not found");
    }
}
