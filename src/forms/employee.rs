//! The add/edit employee form.

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use validator::Validate;

use crate::domain::dates::{self, parse_input_date};
use crate::domain::employee::{Employee, NewEmployee, UpdateEmployee};
use crate::domain::types::{EmployeeName, Position};
use crate::forms::FormError;

/// Raw input of the employee form. Dates use `YYYY-MM-DD`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct EmployeeForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[validate(length(min = 1, message = "Hire date is required"))]
    pub hire_date: String,
}

impl EmployeeForm {
    /// Prefills the form from an existing record.
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            position: employee.position.to_string(),
            hire_date: dates::to_input(employee.hire_date),
        }
    }
}

/// Validated employee form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeePayload {
    pub name: EmployeeName,
    pub position: Position,
    pub hire_date: NaiveDate,
}

impl EmployeePayload {
    /// Validates `form`, treating any hire date after `today` as an error.
    pub fn parse(form: EmployeeForm, today: NaiveDate) -> Result<Self, FormError> {
        form.validate()?;

        let name = EmployeeName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let position = form
            .position
            .parse::<Position>()
            .map_err(|_| FormError::InvalidPosition(form.position.clone()))?;
        let hire_date = parse_input_date(&form.hire_date)
            .map_err(|_| FormError::InvalidDate { field: "hire_date" })?;

        if hire_date > today {
            return Err(FormError::FutureHireDate);
        }

        Ok(Self {
            name,
            position,
            hire_date,
        })
    }

    pub fn into_new_employee(self) -> NewEmployee {
        NewEmployee::new(self.name, self.position, self.hire_date)
    }

    pub fn into_update(self) -> UpdateEmployee {
        UpdateEmployee {
            name: self.name,
            position: self.position,
            hire_date: self.hire_date,
        }
    }
}

impl TryFrom<EmployeeForm> for EmployeePayload {
    type Error = FormError;

    fn try_from(form: EmployeeForm) -> Result<Self, Self::Error> {
        Self::parse(form, Local::now().date_naive())
    }
}
