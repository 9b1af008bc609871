pub mod api;
pub mod store;

pub use api::{ApiError, EmployeeApi, HttpEmployeeApi};
pub use store::{Action, EmployeeState, EmployeeStore};
