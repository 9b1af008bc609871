use std::borrow::Cow;

use log::info;
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::client::{ApiError, EmployeeApi, EmployeeStore};
use crate::models::employee::Employee;
use crate::views::{Field, FormErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct EmployeeFormValues {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom = "validate_age")]
    pub age: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, message = "Experience is required"))]
    pub experience: String,
}

impl EmployeeFormValues {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Age => self.age = value,
            Field::Department => self.department = value,
            Field::Experience => self.experience = value,
        }
    }
}

fn age_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Shared by the create form and the profile editor.
pub fn validate_age(age: &str) -> Result<(), ValidationError> {
    let age = age.trim();
    if age.is_empty() {
        return Err(age_error("required", "Age is required"));
    }
    let value: i64 = age
        .parse()
        .map_err(|_| age_error("type", "Age must be a number"))?;
    if value < 1 {
        return Err(age_error("min", "Age must be greater than 0"));
    }
    if value > 99 {
        return Err(age_error("max", "Age must be less than or equal to 99"));
    }
    Ok(())
}

/// Parses an age that already passed [`validate_age`].
pub fn parse_age(age: &str) -> Option<u32> {
    age.trim().parse().ok()
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(FormErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The "Add New Employee" form.
#[derive(Debug, Default)]
pub struct EmployeeForm {
    pub values: EmployeeFormValues,
    errors: FormErrors,
    is_submitting: bool,
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Validates the current values and builds a record with a fresh id.
    pub fn build_employee(&self) -> Result<Employee, FormErrors> {
        self.values.validate()?;
        let age = parse_age(&self.values.age).ok_or_else(FormErrors::default)?;

        Ok(Employee {
            id: Uuid::new_v4().to_string(),
            name: self.values.name.clone(),
            age,
            department: self.values.department.clone(),
            experience: Some(self.values.experience.clone()),
        })
    }

    /// Validates, sends the new employee through the store and clears the
    /// form once the backend has accepted it.
    pub async fn submit<A: EmployeeApi>(
        &mut self,
        store: &mut EmployeeStore<A>,
    ) -> Result<Employee, SubmitError> {
        let employee = match self.build_employee() {
            Ok(employee) => employee,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };
        self.errors = FormErrors::default();

        self.is_submitting = true;
        let result = store.add_employee(employee.clone()).await;
        self.is_submitting = false;
        result?;

        info!("Added employee {}", employee.id);
        self.values = EmployeeFormValues::default();
        Ok(employee)
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Add New Employee\n");
        for (field, label, value) in [
            (Field::Name, "Name", &self.values.name),
            (Field::Age, "Age", &self.values.age),
            (Field::Department, "Department", &self.values.department),
            (Field::Experience, "Experience", &self.values.experience),
        ] {
            out.push_str(&format!("  {}*: {}\n", label, value));
            if let Some(message) = self.errors.get(field) {
                out.push_str(&format!("    ! {}\n", message));
            }
        }
        out.push_str(if self.is_submitting {
            "  [Adding...]\n"
        } else {
            "  [Add Employee]\n"
        });
        out
    }
}
