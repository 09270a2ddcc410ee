//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use pushkind_directory::domain::employee::{Employee, EmployeeWithReports};
use pushkind_directory::domain::query::{DateRange, SearchParams};
use pushkind_directory::domain::types::{EmployeeId, Position};
use pushkind_directory::pagination::Page;
use pushkind_directory::repository::errors::RepositoryResult;
use pushkind_directory::repository::{EmployeeReader, InMemoryEmployeeRepository};
use pushkind_directory::services::coordinator::SearchCoordinator;

pub const DEBOUNCE: Duration = Duration::from_millis(300);

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn employee(id: i32, name: &str, position: Position, hire_date: NaiveDate) -> Employee {
    Employee {
        id: EmployeeId::new(id).expect("valid id"),
        name: name.to_string(),
        position,
        active: true,
        direct_reports: Default::default(),
        hire_date,
    }
}

/// Fifteen active engineers with ids 1..=15, hired through 2022.
pub fn staff() -> Vec<Employee> {
    (1..=15)
        .map(|id| {
            employee(
                id,
                &format!("Person {id}"),
                Position::Engineer,
                date(2022, (id as u32 - 1) % 12 + 1, 1),
            )
        })
        .collect()
}

pub fn coordinator<R>(repo: Arc<R>) -> SearchCoordinator<R>
where
    R: EmployeeReader + 'static,
{
    SearchCoordinator::new(repo, 5, DEBOUNCE).expect("valid coordinator")
}

pub fn ids(employees: &[Employee]) -> Vec<i32> {
    employees.iter().map(|employee| employee.id.get()).collect()
}

/// Delays searches for some positions so responses can arrive out of order.
pub struct SlowRepository {
    pub inner: InMemoryEmployeeRepository,
    pub delays: Vec<(Position, Duration)>,
}

#[async_trait]
impl EmployeeReader for SlowRepository {
    async fn list_active_employees(&self) -> RepositoryResult<Vec<Employee>> {
        self.inner.list_active_employees().await
    }

    async fn get_employee(&self, id: EmployeeId) -> RepositoryResult<EmployeeWithReports> {
        self.inner.get_employee(id).await
    }

    async fn list_hired_between(&self, range: DateRange) -> RepositoryResult<Vec<Employee>> {
        self.inner.list_hired_between(range).await
    }

    async fn search_employees(&self, params: SearchParams) -> RepositoryResult<Page<Employee>> {
        let delay = self
            .delays
            .iter()
            .find(|(position, _)| Some(*position) == params.position)
            .map(|(_, delay)| *delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.search_employees(params).await
    }
}
