//! HTTP client for the remote employee service.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::domain::dates;
use crate::domain::employee::{Employee, EmployeeWithReports, NewEmployee};
use crate::domain::query::{DateRange, SearchParams};
use crate::domain::types::{EmployeeId, Position};
use crate::models::config::DirectoryConfig;
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{EmployeeReader, EmployeeWriter};

/// Employee service reached over HTTP with JSON payloads.
#[derive(Debug, Clone)]
pub struct HttpEmployeeRepository {
    client: Client,
    base_url: String,
}

impl HttpEmployeeRepository {
    /// Creates a client for the service configured in `config`.
    pub fn new(config: &DirectoryConfig) -> RepositoryResult<Self> {
        Self::with_timeout(&config.api_url, config.request_timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|err| {
            RepositoryError::Unexpected(format!("Failed to build HTTP client: {err}"))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn active_request(&self) -> RequestBuilder {
        self.client.get(self.url("employees/active"))
    }

    fn employee_request(&self, id: EmployeeId) -> RequestBuilder {
        self.client.get(self.url(&format!("employees/{id}")))
    }

    fn hired_request(&self, range: DateRange) -> RequestBuilder {
        self.client.get(self.url("employees/hired")).query(&[
            ("startDate", dates::to_wire(range.start())),
            ("endDate", dates::to_wire(range.end())),
        ])
    }

    fn search_request(&self, params: &SearchParams) -> RequestBuilder {
        self.client.get(self.url("employees/search")).query(params)
    }

    fn create_request(&self, new_employee: &NewEmployee) -> RequestBuilder {
        self.client.post(self.url("employees")).json(new_employee)
    }

    fn update_request(&self, employee: &Employee) -> RequestBuilder {
        self.client
            .put(self.url(&format!("employees/{}", employee.id)))
            .json(employee)
    }

    fn deactivate_request(&self, id: EmployeeId) -> RequestBuilder {
        self.client.put(self.url(&format!("employees/{id}/deactivate")))
    }

    fn position_request(&self, id: EmployeeId, position: Position) -> RequestBuilder {
        self.client
            .put(self.url(&format!("employees/{id}/position")))
            .json(&position)
    }

    fn direct_reports_request(
        &self,
        id: EmployeeId,
        reports: &BTreeSet<EmployeeId>,
    ) -> RequestBuilder {
        self.client
            .put(self.url(&format!("employees/{id}/direct-reports")))
            .json(reports)
    }

    /// Sends the request and decodes a successful JSON response.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<T> {
        let response = request.send().await.map_err(|err| {
            log::error!("Employee service request failed: {err}");
            RepositoryError::from(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().clone();
            let body = response.text().await.unwrap_or_default();
            log::error!("API error response: status={status} url={url} body={body}");
            return Err(RepositoryError::from_status(status, body));
        }

        response.json::<T>().await.map_err(|err| {
            log::error!("Failed to decode employee service response: {err}");
            RepositoryError::from(err)
        })
    }
}

#[async_trait]
impl EmployeeReader for HttpEmployeeRepository {
    async fn list_active_employees(&self) -> RepositoryResult<Vec<Employee>> {
        self.execute(self.active_request()).await
    }

    async fn get_employee(&self, id: EmployeeId) -> RepositoryResult<EmployeeWithReports> {
        self.execute(self.employee_request(id)).await
    }

    async fn list_hired_between(&self, range: DateRange) -> RepositoryResult<Vec<Employee>> {
        self.execute(self.hired_request(range)).await
    }

    async fn search_employees(&self, params: SearchParams) -> RepositoryResult<Page<Employee>> {
        self.execute(self.search_request(&params)).await
    }
}

#[async_trait]
impl EmployeeWriter for HttpEmployeeRepository {
    async fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee> {
        log::info!("Creating employee {} ({})", new_employee.id, new_employee.name);
        self.execute(self.create_request(new_employee)).await
    }

    async fn update_employee(&self, employee: &Employee) -> RepositoryResult<Employee> {
        self.execute(self.update_request(employee)).await
    }

    async fn deactivate_employee(&self, id: EmployeeId) -> RepositoryResult<Employee> {
        self.execute(self.deactivate_request(id)).await
    }

    async fn update_position(
        &self,
        id: EmployeeId,
        position: Position,
    ) -> RepositoryResult<Employee> {
        self.execute(self.position_request(id, position)).await
    }

    async fn update_direct_reports(
        &self,
        id: EmployeeId,
        reports: &BTreeSet<EmployeeId>,
    ) -> RepositoryResult<Employee> {
        self.execute(self.direct_reports_request(id, reports)).await
    }
}
