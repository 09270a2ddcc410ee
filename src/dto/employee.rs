//! DTOs shaped for the employee details and edit views.

use crate::domain::employee::{Employee, EmployeeWithReports};
use crate::forms::employee::EmployeeForm;

/// Data required to render the employee edit view.
#[derive(Debug)]
pub struct EmployeeEditData {
    pub details: EmployeeWithReports,
    /// Form prefilled with the stored values.
    pub form: EmployeeForm,
    /// Active employees that may be assigned as direct reports.
    pub report_candidates: Vec<Employee>,
}
