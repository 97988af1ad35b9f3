//! HTTP client for the remote Employee service

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::Employee;

/// Collection path on the remote service.
const EMPLOYEE_PATH: &str = "Employee";

/// HTTP client for making network requests to the Employee service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request, discarding the response body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.client.delete(self.url(path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::status_error(status, text));
        }

        Ok(())
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::status_error(status, text));
        }

        response.json().await.map_err(Into::into)
    }

    fn status_error(status: StatusCode, text: String) -> ClientError {
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            _ => ClientError::Internal(text),
        }
    }

    // ========== Employee API ==========

    /// Fetch the full employee collection
    pub async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        tracing::debug!("GET /{}", EMPLOYEE_PATH);
        self.get(EMPLOYEE_PATH).await
    }

    /// Create a new employee; the payload carries no id
    pub async fn create_employee(&self, employee: &Employee) -> ClientResult<Employee> {
        tracing::debug!("POST /{}", EMPLOYEE_PATH);
        self.post(EMPLOYEE_PATH, employee).await
    }

    /// Update an existing employee, addressed by id, with the full record
    pub async fn update_employee(&self, id: i64, employee: &Employee) -> ClientResult<Employee> {
        tracing::debug!("PUT /{}/{}", EMPLOYEE_PATH, id);
        self.put(&format!("{EMPLOYEE_PATH}/{id}"), employee).await
    }

    /// Delete an employee by id
    pub async fn delete_employee(&self, id: i64) -> ClientResult<()> {
        tracing::debug!("DELETE /{}/{}", EMPLOYEE_PATH, id);
        self.delete(&format!("{EMPLOYEE_PATH}/{id}")).await
    }
}
