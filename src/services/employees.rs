//! Employee mutations and detail lookups.
//!
//! Every successful mutation refreshes the listing through the coordinator,
//! after the mutation has completed.

use crate::domain::employee::{Employee, EmployeeWithReports};
use crate::domain::types::{EmployeeId, Position};
use crate::dto::employee::EmployeeEditData;
use crate::forms::direct_reports::{DirectReportsForm, DirectReportsPayload};
use crate::forms::employee::{EmployeeForm, EmployeePayload};
use crate::repository::errors::RepositoryError;
use crate::repository::{EmployeeReader, EmployeeWriter};
use crate::services::coordinator::SearchCoordinator;
use crate::services::{ServiceError, ServiceResult};

/// Logs a failed mutation and surfaces a generic message to the view.
fn mutation_failed<R>(
    coordinator: &SearchCoordinator<R>,
    action: &str,
    err: RepositoryError,
) -> ServiceError
where
    R: EmployeeReader + ?Sized + 'static,
{
    log::error!("Failed to {action}: {err}");
    coordinator.report_error(format!("Failed to {action}. Please try again."));
    err.into()
}

async fn refresh_listing<R>(coordinator: &SearchCoordinator<R>)
where
    R: EmployeeReader + ?Sized + 'static,
{
    // The mutation already succeeded; a failed refresh is recorded in the cache.
    if let Err(err) = coordinator.refresh().await {
        log::warn!("Failed to refresh employees after a change: {err}");
    }
}

/// Validates the form and creates an active employee with a generated id.
pub async fn create_employee<R>(
    coordinator: &SearchCoordinator<R>,
    form: EmployeeForm,
) -> ServiceResult<Employee>
where
    R: EmployeeReader + EmployeeWriter + ?Sized + 'static,
{
    let payload = EmployeePayload::try_from(form)?;
    let new_employee = payload.into_new_employee();

    let created = coordinator
        .repository()
        .create_employee(&new_employee)
        .await
        .map_err(|err| mutation_failed(coordinator, "create employee", err))?;
    log::info!("Created employee {}", created.id);

    refresh_listing(coordinator).await;
    Ok(created)
}

/// Applies the edited name, position and hire date to an existing employee.
pub async fn update_employee<R>(
    coordinator: &SearchCoordinator<R>,
    id: EmployeeId,
    form: EmployeeForm,
) -> ServiceResult<Employee>
where
    R: EmployeeReader + EmployeeWriter + ?Sized + 'static,
{
    let payload = EmployeePayload::try_from(form)?;
    let repo = coordinator.repository();

    let current = repo
        .get_employee(id)
        .await
        .map_err(|err| mutation_failed(coordinator, "load employee", err))?
        .employee;
    let updated = current.with_updates(&payload.into_update());

    let saved = repo
        .update_employee(&updated)
        .await
        .map_err(|err| mutation_failed(coordinator, "update employee", err))?;
    log::info!("Updated employee {}", saved.id);

    refresh_listing(coordinator).await;
    Ok(saved)
}

pub async fn deactivate_employee<R>(
    coordinator: &SearchCoordinator<R>,
    id: EmployeeId,
) -> ServiceResult<Employee>
where
    R: EmployeeReader + EmployeeWriter + ?Sized + 'static,
{
    let employee = coordinator
        .repository()
        .deactivate_employee(id)
        .await
        .map_err(|err| mutation_failed(coordinator, "deactivate employee", err))?;
    log::info!("Deactivated employee {}", employee.id);

    refresh_listing(coordinator).await;
    Ok(employee)
}

pub async fn update_position<R>(
    coordinator: &SearchCoordinator<R>,
    id: EmployeeId,
    position: Position,
) -> ServiceResult<Employee>
where
    R: EmployeeReader + EmployeeWriter + ?Sized + 'static,
{
    let employee = coordinator
        .repository()
        .update_position(id, position)
        .await
        .map_err(|err| mutation_failed(coordinator, "update position", err))?;
    log::info!("Employee {} is now {}", employee.id, employee.position);

    refresh_listing(coordinator).await;
    Ok(employee)
}

/// Replaces the direct reports of one employee.
///
/// Referenced ids are not checked against the directory.
pub async fn update_direct_reports<R>(
    coordinator: &SearchCoordinator<R>,
    form: DirectReportsForm,
) -> ServiceResult<Employee>
where
    R: EmployeeReader + EmployeeWriter + ?Sized + 'static,
{
    let payload = DirectReportsPayload::try_from(form)?;

    let employee = coordinator
        .repository()
        .update_direct_reports(payload.employee_id, &payload.reports)
        .await
        .map_err(|err| mutation_failed(coordinator, "update direct reports", err))?;
    log::info!(
        "Employee {} now has {} direct reports",
        employee.id,
        employee.direct_reports.len()
    );

    refresh_listing(coordinator).await;
    Ok(employee)
}

/// Fetches an employee with the names of their direct reports.
pub async fn load_employee_details<R>(repo: &R, id: EmployeeId) -> ServiceResult<EmployeeWithReports>
where
    R: EmployeeReader + ?Sized,
{
    repo.get_employee(id).await.map_err(|err| {
        log::error!("Failed to load employee {id}: {err}");
        ServiceError::from(err)
    })
}

/// Active employees other than `id`, the valid choices for its direct reports.
pub async fn list_report_candidates<R>(repo: &R, id: EmployeeId) -> ServiceResult<Vec<Employee>>
where
    R: EmployeeReader + ?Sized,
{
    let employees = repo.list_active_employees().await.map_err(|err| {
        log::error!("Failed to list active employees: {err}");
        err
    })?;

    Ok(employees
        .into_iter()
        .filter(|employee| employee.id != id)
        .collect())
}

/// Loads everything the edit view needs for one employee.
pub async fn load_employee_editor<R>(repo: &R, id: EmployeeId) -> ServiceResult<EmployeeEditData>
where
    R: EmployeeReader + ?Sized,
{
    let details = load_employee_details(repo, id).await?;
    let report_candidates = list_report_candidates(repo, id).await?;
    let form = EmployeeForm::from_employee(&details.employee);

    Ok(EmployeeEditData {
        details,
        form,
        report_candidates,
    })
}
