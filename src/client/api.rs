use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use thiserror::Error;

use crate::errors::ErrorResponse;
use crate::models::employee::{
    Employee, EmployeeChanges, EmployeeEnvelope, EmployeeList, NewEmployee,
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed with status code {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// The four REST calls the store issues, plus a single-record read.
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn fetch_employees(&self) -> Result<Vec<Employee>, ApiError>;

    async fn fetch_employee(&self, id: &str) -> Result<Employee, ApiError>;

    async fn add_employee(&self, employee: Employee) -> Result<Employee, ApiError>;

    async fn update_employee(&self, employee: Employee) -> Result<Employee, ApiError>;

    async fn delete_employee(&self, id: &str) -> Result<(), ApiError>;
}

pub struct HttpEmployeeApi {
    client: Client,
    base_url: String,
}

impl HttpEmployeeApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// `<base>/api/employees`, plus the id as one escaped path segment.
    fn url(&self, id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {}", self.base_url, err)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidUrl(self.base_url.clone()))?;
            segments.pop_if_empty().extend(["api", "employees"]);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

/// Turns a non-2xx response into `ApiError::Status`, preferring the
/// server's `{"error": ...}` message.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ApiError::Status { status, message })
}

#[async_trait]
impl EmployeeApi for HttpEmployeeApi {
    async fn fetch_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let response = self.client.get(self.url(None)?).send().await?;
        let body: EmployeeList = check(response).await?.json().await?;
        Ok(body.employees)
    }

    async fn fetch_employee(&self, id: &str) -> Result<Employee, ApiError> {
        let response = self
            .client
            .get(self.url(Some(id))?)
            .send()
            .await?;
        let body: EmployeeEnvelope = check(response).await?.json().await?;
        Ok(body.employee)
    }

    async fn add_employee(&self, employee: Employee) -> Result<Employee, ApiError> {
        let response = self
            .client
            .post(self.url(None)?)
            .json(&NewEmployee::from(employee))
            .send()
            .await?;
        let body: EmployeeEnvelope = check(response).await?.json().await?;
        Ok(body.employee)
    }

    async fn update_employee(&self, employee: Employee) -> Result<Employee, ApiError> {
        let url = self.url(Some(&employee.id))?;
        let response = self
            .client
            .patch(url)
            .json(&EmployeeChanges::from(employee))
            .send()
            .await?;
        let body: EmployeeEnvelope = check(response).await?.json().await?;
        Ok(body.employee)
    }

    async fn delete_employee(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(Some(id))?)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{web, App, HttpServer};

    use super::*;
    use crate::db::EmployeeDb;
    use crate::handlers;

    /// Binds the real route table on an ephemeral port.
    fn spawn_server(db: web::Data<EmployeeDb>) -> String {
        let server = HttpServer::new(move || {
            App::new().app_data(db.clone()).configure(handlers::configure)
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}", addr)
    }

    #[test]
    fn ids_are_escaped_into_one_path_segment() {
        let api = HttpEmployeeApi::new("http://localhost:8080/");
        assert_eq!(
            api.url(None).unwrap().as_str(),
            "http://localhost:8080/api/employees"
        );
        assert_eq!(
            api.url(Some("a/b?c#d")).unwrap().as_str(),
            "http://localhost:8080/api/employees/a%2Fb%3Fc%23d"
        );

        let nested = HttpEmployeeApi::new("http://proxy.local/directory");
        assert_eq!(
            nested.url(Some("7")).unwrap().as_str(),
            "http://proxy.local/directory/api/employees/7"
        );

        let broken = HttpEmployeeApi::new("not a url");
        assert!(matches!(broken.url(None), Err(ApiError::InvalidUrl(_))));
    }

    #[actix_web::test]
    async fn round_trips_through_the_mock_server() {
        let db = web::Data::new(EmployeeDb::seeded(2));
        let api = HttpEmployeeApi::new(spawn_server(db.clone()));

        let listed = api.fetch_employees().await.unwrap();
        assert_eq!(listed.len(), 2);

        let created = api
            .add_employee(Employee {
                id: "a1".to_string(),
                name: "Linus".to_string(),
                age: 55,
                department: "Kernel".to_string(),
                experience: Some("Git".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(created.id, "a1");
        assert!(db.find("a1").is_some());

        let mut edited = created.clone();
        edited.age = 56;
        let updated = api.update_employee(edited).await.unwrap();
        assert_eq!(updated.age, 56);
        assert_eq!(api.fetch_employee("a1").await.unwrap(), updated);

        api.delete_employee("a1").await.unwrap();
        let err = api.delete_employee("a1").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Request failed with status code 404 Not Found: Employee not found"
        );
    }
}
