use crate::client::{ApiError, EmployeeApi, EmployeeState, EmployeeStore};

const HEADERS: [&str; 4] = ["No.", "Name", "Department", "Actions"];

/// The "Employee List" page.
#[derive(Debug, Default)]
pub struct EmployeeList {
    deleting_employee_id: Option<String>,
}

impl EmployeeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deleting_employee_id(&self) -> Option<&str> {
        self.deleting_employee_id.as_deref()
    }

    pub async fn mount<A: EmployeeApi>(&self, store: &mut EmployeeStore<A>) -> Result<(), ApiError> {
        store.fetch_employees().await
    }

    /// The row shows a pending marker until the delete settles either way.
    pub async fn delete<A: EmployeeApi>(
        &mut self,
        store: &mut EmployeeStore<A>,
        id: &str,
    ) -> Result<(), ApiError> {
        self.deleting_employee_id = Some(id.to_string());
        let result = store.delete_employee(id).await;
        self.deleting_employee_id = None;
        result
    }

    pub fn render(&self, state: &EmployeeState) -> String {
        let mut out = String::from("Employee List\n");
        if state.employees.is_empty() {
            out.push_str("No employees found.\n");
            return out;
        }

        let rows: Vec<[String; 4]> = state
            .employees
            .iter()
            .enumerate()
            .map(|(index, employee)| {
                let actions = if self.deleting_employee_id.as_deref() == Some(employee.id.as_str()) {
                    "deleting...".to_string()
                } else {
                    format!("show {} | delete {}", employee.id, employee.id)
                };
                [
                    (index + 1).to_string(),
                    or_dash(&employee.name),
                    or_dash(&employee.department),
                    actions,
                ]
            })
            .collect();

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header = HEADERS.map(str::to_string);
        for row in std::iter::once(&header).chain(rows.iter()) {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::store::tests::LocalApi;
    use crate::client::Action;
    use crate::models::employee::Employee;

    #[test]
    fn empty_collection_renders_placeholder() {
        let page = EmployeeList::new();
        assert_eq!(
            page.render(&EmployeeState::default()),
            "Employee List\nNo employees found.\n"
        );
    }

    #[test]
    fn rows_are_numbered_and_blank_cells_dashed() {
        let mut state = EmployeeState::default();
        state.reduce(Action::Fetched(vec![
            Employee {
                id: "a".to_string(),
                name: "Ann".to_string(),
                age: 25,
                department: String::new(),
                experience: None,
            },
            Employee {
                id: "b".to_string(),
                name: String::new(),
                age: 52,
                department: "Legal".to_string(),
                experience: None,
            },
        ]));

        let page = EmployeeList {
            deleting_employee_id: Some("b".to_string()),
        };
        let rendered = page.render(&state);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Employee List");
        assert!(lines[1].starts_with("No.  Name  Department"));
        assert!(lines[2].starts_with("1    Ann   -"));
        assert!(lines[2].ends_with("show a | delete a"));
        assert!(lines[3].starts_with("2    -     Legal"));
        assert!(lines[3].ends_with("deleting..."));
    }

    #[actix_web::test]
    async fn mount_then_delete_clears_pending_marker() {
        let mut store = EmployeeStore::new(LocalApi::seeded(3));
        let mut page = EmployeeList::new();

        page.mount(&mut store).await.unwrap();
        assert_eq!(store.state().employees.len(), 3);

        page.delete(&mut store, "2").await.unwrap();
        assert_eq!(page.deleting_employee_id(), None);
        assert!(store.employee("2").is_none());

        assert!(page.delete(&mut store, "2").await.is_err());
        assert_eq!(page.deleting_employee_id(), None);
        assert!(store.state().error.is_some());
    }
}
