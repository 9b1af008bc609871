use log::{debug, warn};

use crate::client::api::{ApiError, EmployeeApi};
use crate::models::employee::Employee;

const FALLBACK_ERROR: &str = "An error occurred";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeState {
    pub employees: Vec<Employee>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Pending,
    Rejected(String),
    Fetched(Vec<Employee>),
    Loaded(Employee),
    Added(Employee),
    Updated(Employee),
    Deleted(String),
}

impl EmployeeState {
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Pending => {
                self.loading = true;
                self.error = None;
            }
            Action::Rejected(message) => {
                self.loading = false;
                self.error = Some(if message.is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                });
            }
            Action::Fetched(employees) => {
                self.employees = employees;
                self.loading = false;
            }
            Action::Loaded(employee) => {
                match self.employees.iter_mut().find(|e| e.id == employee.id) {
                    Some(slot) => *slot = employee,
                    None => self.employees.push(employee),
                }
                self.loading = false;
            }
            Action::Added(employee) => {
                self.employees.push(employee);
                self.loading = false;
            }
            Action::Updated(employee) => {
                if let Some(slot) = self.employees.iter_mut().find(|e| e.id == employee.id) {
                    *slot = employee;
                }
                self.loading = false;
            }
            Action::Deleted(id) => {
                self.employees.retain(|e| e.id != id);
                self.loading = false;
            }
        }
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }
}

/// Holds the employee collection and runs the network actions against it.
/// The collection only changes once the backend has accepted a request.
pub struct EmployeeStore<A: EmployeeApi> {
    api: A,
    state: EmployeeState,
}

impl<A: EmployeeApi> EmployeeStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: EmployeeState::default(),
        }
    }

    pub fn state(&self) -> &EmployeeState {
        &self.state
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.state.employee(id)
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch {:?}", action);
        self.state.reduce(action);
    }

    pub async fn fetch_employees(&mut self) -> Result<(), ApiError> {
        self.dispatch(Action::Pending);
        let result = self.api.fetch_employees().await;
        self.settle(result, Action::Fetched)
    }

    /// Reads one record and merges it into the collection.
    pub async fn fetch_employee(&mut self, id: &str) -> Result<(), ApiError> {
        self.dispatch(Action::Pending);
        let result = self.api.fetch_employee(id).await;
        self.settle(result, Action::Loaded)
    }

    pub async fn add_employee(&mut self, employee: Employee) -> Result<(), ApiError> {
        self.dispatch(Action::Pending);
        let result = self.api.add_employee(employee).await;
        self.settle(result, Action::Added)
    }

    pub async fn update_employee(&mut self, employee: Employee) -> Result<(), ApiError> {
        self.dispatch(Action::Pending);
        let result = self.api.update_employee(employee).await;
        self.settle(result, Action::Updated)
    }

    pub async fn delete_employee(&mut self, id: &str) -> Result<(), ApiError> {
        self.dispatch(Action::Pending);
        let result = self.api.delete_employee(id).await.map(|()| id.to_string());
        self.settle(result, Action::Deleted)
    }

    fn settle<T>(
        &mut self,
        result: Result<T, ApiError>,
        fulfilled: impl FnOnce(T) -> Action,
    ) -> Result<(), ApiError> {
        match result {
            Ok(payload) => {
                self.dispatch(fulfilled(payload));
                Ok(())
            }
            Err(err) => {
                warn!("employee request failed: {}", err);
                self.dispatch(Action::Rejected(err.to_string()));
                Err(err)
            }
        }
    }
}
