//! Form definitions backing the directory commands.

use thiserror::Error;
use validator::ValidationErrors;

pub mod date_range;
pub mod direct_reports;
pub mod employee;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Name must be between 2 and 100 characters")]
    InvalidName,

    #[error("Unknown position: {0}")]
    InvalidPosition(String),

    #[error("Invalid date in {field}: expected YYYY-MM-DD")]
    InvalidDate { field: &'static str },

    #[error("Hire date cannot be in the future")]
    FutureHireDate,

    #[error("Start date cannot be later than end date")]
    InvertedDateRange,

    #[error("invalid employee id")]
    InvalidEmployeeId,

    #[error("An employee cannot report to themselves")]
    SelfReport,
}

impl FormError {
    /// Name of the field the error should be shown next to.
    pub fn field(&self) -> Option<&str> {
        match self {
            FormError::Validation(errors) => {
                errors.errors().keys().next().map(|field| field.as_ref())
            }
            FormError::InvalidName => Some("name"),
            FormError::InvalidPosition(_) => Some("position"),
            FormError::InvalidDate { field } => Some(field),
            FormError::FutureHireDate => Some("hire_date"),
            FormError::InvertedDateRange => Some("start_date"),
            FormError::InvalidEmployeeId | FormError::SelfReport => Some("direct_reports"),
        }
    }
}
