//! Mock repository implementations for isolating services in tests.

use std::collections::BTreeSet;

use async_trait::async_trait;
use mockall::mock;

use crate::domain::employee::{Employee, EmployeeWithReports, NewEmployee};
use crate::domain::query::{DateRange, SearchParams};
use crate::domain::types::{EmployeeId, Position};
use crate::pagination::Page;
use crate::repository::errors::RepositoryResult;
use crate::repository::{EmployeeReader, EmployeeWriter};

mock! {
    pub Repository {}

    #[async_trait]
    impl EmployeeReader for Repository {
        async fn list_active_employees(&self) -> RepositoryResult<Vec<Employee>>;
        async fn get_employee(&self, id: EmployeeId) -> RepositoryResult<EmployeeWithReports>;
        async fn list_hired_between(&self, range: DateRange) -> RepositoryResult<Vec<Employee>>;
        async fn search_employees(&self, params: SearchParams) -> RepositoryResult<Page<Employee>>;
    }

    #[async_trait]
    impl EmployeeWriter for Repository {
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
}
