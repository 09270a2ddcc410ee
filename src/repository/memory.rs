//! In-memory employee service used by tests and offline demos.
//!
//! Mirrors the remote service semantics closely enough for the coordinator:
//! case-insensitive name matching, exact position matching, inclusive hire-date
//! windows and zero-based pagination ordered by id.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::employee::{Employee, EmployeeWithReports, NewEmployee};
use crate::domain::query::{DateRange, SearchParams};
use crate::domain::types::{EmployeeId, Position};
use crate::pagination::Page;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{EmployeeReader, EmployeeWriter};

/// Read request observed by [`InMemoryEmployeeRepository`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedRequest {
    ListActive,
    Get(EmployeeId),
    HiredBetween(DateRange),
    Search(SearchParams),
}

#[derive(Default)]
struct Directory {
    employees: Vec<Employee>,
    requests: Vec<RecordedRequest>,
    unavailable: bool,
}

#[derive(Clone, Default)]
pub struct InMemoryEmployeeRepository {
    inner: Arc<Mutex<Directory>>,
}

impl InMemoryEmployeeRepository {
    pub fn new(employees: impl IntoIterator<Item = Employee>) -> Self {
        let mut employees: Vec<Employee> = employees.into_iter().collect();
        employees.sort_by_key(|employee| employee.id);
        Self {
            inner: Arc::new(Mutex::new(Directory {
                employees,
                ..Directory::default()
            })),
        }
    }

    /// Every stored employee, ordered by id.
    pub fn employees(&self) -> Vec<Employee> {
        self.inner.lock().employees.clone()
    }

    /// Read requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.inner.lock().requests.clear();
    }

    /// Makes every call fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unavailable = unavailable;
    }

    fn read<T>(
        &self,
        request: RecordedRequest,
        f: impl FnOnce(&Directory) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut directory = self.inner.lock();
        directory.requests.push(request);
        if directory.unavailable {
            return Err(RepositoryError::ConnectionError(
                "employee service unavailable".to_string(),
            ));
        }
        f(&directory)
    }

    fn modify(
        &self,
        id: EmployeeId,
        f: impl FnOnce(&mut Employee),
    ) -> RepositoryResult<Employee> {
        let mut directory = self.inner.lock();
        if directory.unavailable {
            return Err(RepositoryError::ConnectionError(
                "employee service unavailable".to_string(),
            ));
        }
        let employee = directory
            .employees
            .iter_mut()
            .find(|employee| employee.id == id)
            .ok_or(RepositoryError::NotFound)?;
        f(employee);
        Ok(employee.clone())
    }
}

fn matches(employee: &Employee, params: &SearchParams) -> bool {
    let name_matches = params.name.as_deref().is_none_or(|name| {
        employee
            .name
            .to_lowercase()
            .contains(&name.trim().to_lowercase())
    });
    let position_matches = params
        .position
        .is_none_or(|position| employee.position == position);
    let active_matches = params.active.is_none_or(|active| employee.active == active);
    let start_matches = params
        .start_date
        .is_none_or(|start| employee.hire_date >= start);
    let end_matches = params.end_date.is_none_or(|end| employee.hire_date <= end);

    name_matches && position_matches && active_matches && start_matches && end_matches
}

#[async_trait]
impl EmployeeReader for InMemoryEmployeeRepository {
    async fn list_active_employees(&self) -> RepositoryResult<Vec<Employee>> {
        self.read(RecordedRequest::ListActive, |directory| {
            Ok(directory
                .employees
                .iter()
                .filter(|employee| employee.active)
                .cloned()
                .collect())
        })
    }

    async fn get_employee(&self, id: EmployeeId) -> RepositoryResult<EmployeeWithReports> {
        self.read(RecordedRequest::Get(id), |directory| {
            let employee = directory
                .employees
                .iter()
                .find(|employee| employee.id == id)
                .cloned()
                .ok_or(RepositoryError::NotFound)?;
            let direct_report_names = directory
                .employees
                .iter()
                .filter(|other| employee.direct_reports.contains(&other.id))
                .map(|other| other.name.clone())
                .collect();
            Ok(EmployeeWithReports {
                employee,
                direct_report_names,
            })
        })
    }

    async fn list_hired_between(&self, range: DateRange) -> RepositoryResult<Vec<Employee>> {
        self.read(RecordedRequest::HiredBetween(range), |directory| {
            Ok(directory
                .employees
                .iter()
                .filter(|employee| range.contains(employee.hire_date))
                .cloned()
                .collect())
        })
    }

    async fn search_employees(&self, params: SearchParams) -> RepositoryResult<Page<Employee>> {
        self.read(RecordedRequest::Search(params.clone()), |directory| {
            let size = params.size.unwrap_or(u32::MAX).max(1);
            let page = params.page.unwrap_or(0);
            let matching: Vec<&Employee> = directory
                .employees
                .iter()
                .filter(|employee| matches(employee, &params))
                .collect();
            let content = matching
                .iter()
                .skip(page as usize * size as usize)
                .take(size as usize)
                .map(|employee| (*employee).clone())
                .collect();
            Ok(Page::new(content, page, size, matching.len() as u64))
        })
    }
}

#[async_trait]
impl EmployeeWriter for InMemoryEmployeeRepository {
    async fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee> {
        let mut directory = self.inner.lock();
        if directory.unavailable {
            return Err(RepositoryError::ConnectionError(
                "employee service unavailable".to_string(),
            ));
        }
        let employee = Employee {
            id: new_employee.id,
            name: new_employee.name.as_str().to_string(),
            position: new_employee.position,
            active: new_employee.active,
            direct_reports: new_employee.direct_reports.clone(),
            hire_date: new_employee.hire_date,
        };
        // An id collision silently replaces the earlier record.
        directory.employees.retain(|existing| existing.id != employee.id);
        directory.employees.push(employee.clone());
        directory.employees.sort_by_key(|employee| employee.id);
        Ok(employee)
    }

    async fn update_employee(&self, employee: &Employee) -> RepositoryResult<Employee> {
        let updated = employee.clone();
        self.modify(employee.id, move |stored| *stored = updated)
    }

    async fn deactivate_employee(&self, id: EmployeeId) -> RepositoryResult<Employee> {
        self.modify(id, |stored| stored.active = false)
    }

    async fn update_position(
        &self,
        id: EmployeeId,
        position: Position,
    ) -> RepositoryResult<Employee> {
        self.modify(id, |stored| stored.position = position)
    }

    async fn update_direct_reports(
        &self,
        id: EmployeeId,
        reports: &BTreeSet<EmployeeId>,
    ) -> RepositoryResult<Employee> {
        let reports = reports.clone();
        self.modify(id, move |stored| stored.direct_reports = reports)
    }
}
