//! Access to the remote employee service.
//!
//! The service is consumed through the [`EmployeeReader`] and
//! [`EmployeeWriter`] traits so the coordinator and services can run against
//! the HTTP client, the in-memory directory or a mock.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::employee::{Employee, EmployeeWithReports, NewEmployee};
use crate::domain::query::{DateRange, SearchParams};
use crate::domain::types::{EmployeeId, Position};
use crate::pagination::Page;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpEmployeeRepository;
pub use memory::InMemoryEmployeeRepository;

#[async_trait]
pub trait EmployeeReader: Send + Sync {
    async fn list_active_employees(&self) -> RepositoryResult<Vec<Employee>>;
    async fn get_employee(&self, id: EmployeeId) -> RepositoryResult<EmployeeWithReports>;
    /// Every employee hired inside `range`, unpaginated.
    async fn list_hired_between(&self, range: DateRange) -> RepositoryResult<Vec<Employee>>;
    async fn search_employees(&self, params: SearchParams) -> RepositoryResult<Page<Employee>>;
}

#[async_trait]
pub trait EmployeeWriter: Send + Sync {
    async fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee>;
    async fn update_employee(&self, employee: &Employee) -> RepositoryResult<Employee>;
    async fn deactivate_employee(&self, id: EmployeeId) -> RepositoryResult<Employee>;
    async fn update_position(
        &self,
        id: EmployeeId,
        position: Position,
    ) -> RepositoryResult<Employee>;
    async fn update_direct_reports(
        &self,
        id: EmployeeId,
        reports: &BTreeSet<EmployeeId>,
    ) -> RepositoryResult<Employee>;
}
