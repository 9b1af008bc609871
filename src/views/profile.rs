use log::{debug, error};
use thiserror::Error;
use validator::Validate;

use crate::client::{ApiError, EmployeeApi, EmployeeState, EmployeeStore};
use crate::models::employee::Employee;
use crate::views::form::{parse_age, validate_age};
use crate::views::{Field, FormErrors, Route};

/// Working copy of the record while the profile is in edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct EditableEmployee {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom = "validate_age")]
    pub age: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    pub experience: String,
}

impl From<&Employee> for EditableEmployee {
    fn from(employee: &Employee) -> Self {
        EditableEmployee {
            name: employee.name.clone(),
            age: employee.age.to_string(),
            department: employee.department.clone(),
            experience: employee.experience.clone().unwrap_or_default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Employee not found")]
    NotFound,

    #[error("{0}")]
    Invalid(FormErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The "Profile Details" page for one employee.
#[derive(Debug)]
pub struct ProfileDetails {
    id: String,
    is_editing: bool,
    draft: EditableEmployee,
}

impl ProfileDetails {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_editing: false,
            draft: EditableEmployee::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn draft(&self) -> &EditableEmployee {
        &self.draft
    }

    /// Loads the record when the store does not have it yet, then seeds the
    /// draft from it. A failed load is logged and leaves the page on
    /// "Employee not found".
    pub async fn mount<A: EmployeeApi>(&mut self, store: &mut EmployeeStore<A>) {
        if store.employee(&self.id).is_none() {
            match store.fetch_employee(&self.id).await {
                Err(err) if err.is_not_found() => debug!("No employee {}", self.id),
                Err(err) => error!("Failed to fetch employee {}: {}", self.id, err),
                Ok(()) => {}
            }
        }
        if let Some(employee) = store.employee(&self.id) {
            self.draft = EditableEmployee::from(employee);
        }
    }

    pub fn edit<A: EmployeeApi>(&mut self, store: &EmployeeStore<A>) -> Result<(), ProfileError> {
        let employee = store.employee(&self.id).ok_or(ProfileError::NotFound)?;
        self.draft = EditableEmployee::from(employee);
        self.is_editing = true;
        Ok(())
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.draft.name = value,
            Field::Age => self.draft.age = value,
            Field::Department => self.draft.department = value,
            Field::Experience => self.draft.experience = value,
        }
    }

    /// Sends the draft as the new version of the record and leaves edit
    /// mode. An invalid draft stays in edit mode.
    pub async fn save<A: EmployeeApi>(
        &mut self,
        store: &mut EmployeeStore<A>,
    ) -> Result<(), ProfileError> {
        if store.employee(&self.id).is_none() {
            return Err(ProfileError::NotFound);
        }
        self.draft
            .validate()
            .map_err(|err| ProfileError::Invalid(err.into()))?;
        let age = parse_age(&self.draft.age)
            .ok_or_else(|| ProfileError::Invalid(FormErrors::default()))?;

        let employee = Employee {
            id: self.id.clone(),
            name: self.draft.name.clone(),
            age,
            department: self.draft.department.clone(),
            experience: Some(self.draft.experience.clone()),
        };
        self.is_editing = false;
        store.update_employee(employee).await?;
        Ok(())
    }

    /// Deletes the record and navigates back to the list whatever the
    /// outcome; the error is still handed to the caller.
    pub async fn delete<A: EmployeeApi>(
        &mut self,
        store: &mut EmployeeStore<A>,
    ) -> (Route, Result<(), ApiError>) {
        let result = store.delete_employee(&self.id).await;
        (Route::List, result)
    }

    pub fn render(&self, state: &EmployeeState) -> String {
        let Some(employee) = state.employee(&self.id) else {
            return "Employee not found\n".to_string();
        };

        let mut out = String::new();
        out.push_str(if self.is_editing {
            "[Back To List]\n"
        } else {
            "[Back To List]  [Edit]  [Delete]\n"
        });
        out.push_str("Profile Details\n");

        let shown = if self.is_editing {
            self.draft.clone()
        } else {
            EditableEmployee::from(employee)
        };
        out.push_str(&format!("Name: {}\n", shown.name));
        out.push_str(&format!("Age: {}\n", shown.age));
        out.push_str(&format!("Department: {}\n", shown.department));
        out.push_str(&format!("Experience: {}\n", shown.experience));
        if self.is_editing {
            out.push_str("[Save]\n");
        }
        out
    }
}
