use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeChanges, NewEmployee};

const FACTORY_NAME: &str = "John Doe";
const FACTORY_AGE: u32 = 30;
const FACTORY_DEPARTMENT: &str = "Engineering";
const FACTORY_EXPERIENCE: &str = "Lorem ipsum dolor sit amet consectetur adipisicing elit. Quisquam, quos.Quisquam, quos.Lorem ipsum dolor sit amet consectetur adipisicing elit. Quisquam, quos. Quisquam, quos.";

/// In-memory employee table. Rows keep insertion order, which is the order
/// the list endpoint returns.
#[derive(Debug, Default)]
pub struct EmployeeDb {
    rows: RwLock<Vec<Employee>>,
}

impl EmployeeDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table pre-filled with `count` factory employees.
    pub fn seeded(count: usize) -> Self {
        let db = Self::new();
        db.seed(count);
        db
    }

    pub fn seed(&self, count: usize) {
        let mut rows = self.write();
        for _ in 0..count {
            let id = next_sequential_id(&rows);
            rows.push(Employee {
                id,
                name: FACTORY_NAME.to_string(),
                age: FACTORY_AGE,
                department: FACTORY_DEPARTMENT.to_string(),
                experience: Some(FACTORY_EXPERIENCE.to_string()),
            });
        }
        debug!("seeded {} employees", count);
    }

    pub fn all(&self) -> Vec<Employee> {
        self.read().clone()
    }

    pub fn find(&self, id: &str) -> Option<Employee> {
        self.read().iter().find(|e| e.id == id).cloned()
    }

    pub fn insert(&self, new_employee: NewEmployee) -> Result<Employee, AppError> {
        let mut rows = self.write();
        let id = match new_employee.id.clone() {
            Some(id) if rows.iter().any(|e| e.id == id) => {
                return Err(AppError::Conflict(format!(
                    "Employee with id {} already exists",
                    id
                )));
            }
            Some(id) => id,
            None => next_sequential_id(&rows),
        };

        let employee = new_employee.into_employee(id);
        rows.push(employee.clone());
        Ok(employee)
    }

    pub fn update(&self, id: &str, changes: EmployeeChanges) -> Result<Employee, AppError> {
        let mut rows = self.write();
        let employee = rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(AppError::employee_not_found)?;

        changes.apply_to(employee);
        Ok(employee.clone())
    }

    pub fn remove(&self, id: &str) -> Result<Employee, AppError> {
        let mut rows = self.write();
        let index = rows
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(AppError::employee_not_found)?;

        Ok(rows.remove(index))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Employee>> {
        // A panic while holding the lock cannot leave a row half-written.
        self.rows.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Employee>> {
        self.rows.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn next_sequential_id(rows: &[Employee]) -> String {
    let mut next = rows.len() + 1;
    while rows.iter().any(|e| e.id == next.to_string()) {
        next += 1;
    }
    next.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee(id: Option<&str>, name: &str) -> NewEmployee {
        NewEmployee {
            id: id.map(str::to_string),
            name: name.to_string(),
            age: 28,
            department: "Design".to_string(),
            experience: Some("Figma".to_string()),
        }
    }

    #[test]
    fn seeds_factory_employees_with_sequential_ids() {
        let db = EmployeeDb::seeded(10);
        let rows = db.all();

        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[9].id, "10");
        assert!(rows.iter().all(|e| e.name == "John Doe" && e.age == 30));
        assert!(rows.iter().all(|e| e.department == "Engineering"));
        assert!(EmployeeDb::new().is_empty());
    }

    #[test]
    fn insert_keeps_client_id_and_rejects_duplicates() {
        let db = EmployeeDb::new();
        let created = db.insert(new_employee(Some("abc"), "Ada")).unwrap();
        assert_eq!(created.id, "abc");
        assert_eq!(db.find("abc"), Some(created));

        let err = db.insert(new_employee(Some("abc"), "Other")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn insert_without_id_skips_taken_numbers() {
        let db = EmployeeDb::new();
        db.insert(new_employee(Some("2"), "Two")).unwrap();
        let first = db.insert(new_employee(None, "First")).unwrap();
        let second = db.insert(new_employee(None, "Second")).unwrap();

        // len + 1 == 2 is taken, so 3 is next
        assert_eq!(first.id, "3");
        assert_eq!(second.id, "4");
    }

    #[test]
    fn update_and_remove_report_missing_rows() {
        let db = EmployeeDb::seeded(1);

        let changes = EmployeeChanges {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert_eq!(db.update("1", changes.clone()).unwrap().name, "Renamed");
        assert!(matches!(db.update("9", changes), Err(AppError::NotFound(_))));

        assert!(db.remove("1").is_ok());
        assert!(db.find("1").is_none());
        assert!(matches!(db.remove("1"), Err(AppError::NotFound(_))));
    }
}
