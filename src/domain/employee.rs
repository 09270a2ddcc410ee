use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dates::wire_date;
use crate::domain::types::{EmployeeId, EmployeeName, Position};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub position: Position,
    pub active: bool,
    /// Ids of people reporting to this employee. The service does not
    /// guarantee they exist.
    #[serde(default)]
    pub direct_reports: BTreeSet<EmployeeId>,
    #[serde(with = "wire_date")]
    pub hire_date: NaiveDate,
}

/// Employee together with the resolved names of their direct reports.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWithReports {
    pub employee: Employee,
    #[serde(default)]
    pub direct_report_names: Vec<String>,
}

/// Payload sent to the service when creating an employee.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub id: EmployeeId,
    pub name: EmployeeName,
    pub position: Position,
    pub active: bool,
    pub direct_reports: BTreeSet<EmployeeId>,
    #[serde(with = "wire_date")]
    pub hire_date: NaiveDate,
}

impl NewEmployee {
    /// Builds an active employee without reports under a freshly generated id.
    #[must_use]
    pub fn new(name: EmployeeName, position: Position, hire_date: NaiveDate) -> Self {
        Self {
            id: EmployeeId::generate(),
            name,
            position,
            active: true,
            direct_reports: BTreeSet::new(),
            hire_date,
        }
    }
}

/// Editable subset of an employee record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateEmployee {
    pub name: EmployeeName,
    pub position: Position,
    pub hire_date: NaiveDate,
}

impl Employee {
    /// Returns a copy with the edited fields applied. Id, status and reports
    /// are carried over unchanged.
    #[must_use]
    pub fn with_updates(&self, updates: &UpdateEmployee) -> Self {
        Self {
            name: updates.name.as_str().to_string(),
            position: updates.position,
            hire_date: updates.hire_date,
            ..self.clone()
        }
    }
}
