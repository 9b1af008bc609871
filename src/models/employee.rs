use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

/// Body of `POST /api/employees`. The id is optional so the backend can
/// assign one, but the form always sends its own.
#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct NewEmployee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(range(min = 1, max = 99, message = "Age must be between 1 and 99"))]
    pub age: u32,
    #[validate(length(min = 1, message = "Department cannot be empty"))]
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

impl NewEmployee {
    pub fn into_employee(self, id: String) -> Employee {
        Employee {
            id,
            name: self.name,
            age: self.age,
            department: self.department,
            experience: self.experience,
        }
    }
}

impl From<Employee> for NewEmployee {
    fn from(employee: Employee) -> Self {
        NewEmployee {
            id: Some(employee.id),
            name: employee.name,
            age: employee.age,
            department: employee.department,
            experience: employee.experience,
        }
    }
}

/// Body of `PATCH /api/employees/{id}`. Absent fields are left untouched;
/// an `id` in the body is accepted and ignored.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, Default)]
pub struct EmployeeChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 99, message = "Age must be between 1 and 99"))]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Department cannot be empty"))]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

impl EmployeeChanges {
    pub fn apply_to(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(age) = self.age {
            employee.age = age;
        }
        if let Some(department) = self.department {
            employee.department = department;
        }
        if let Some(experience) = self.experience {
            employee.experience = Some(experience);
        }
    }
}

impl From<Employee> for EmployeeChanges {
    fn from(employee: Employee) -> Self {
        EmployeeChanges {
            id: Some(employee.id),
            name: Some(employee.name),
            age: Some(employee.age),
            department: Some(employee.department),
            experience: employee.experience,
        }
    }
}

/// `{"employees": [...]}`
#[derive(Serialize, Deserialize, Debug)]
pub struct EmployeeList {
    pub employees: Vec<Employee>,
}

/// `{"employee": {...}}`
#[derive(Serialize, Deserialize, Debug)]
pub struct EmployeeEnvelope {
    pub employee: Employee,
}
