use std::collections::BTreeSet;

use serde::Deserialize;

use crate::domain::types::EmployeeId;
use crate::forms::FormError;

/// Direct-report assignment for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectReportsForm {
    pub employee_id: i32,
    #[serde(default)]
    pub reports: Vec<i32>,
}

/// Validated direct-report assignment. Duplicates are collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectReportsPayload {
    pub employee_id: EmployeeId,
    pub reports: BTreeSet<EmployeeId>,
}

impl TryFrom<DirectReportsForm> for DirectReportsPayload {
    type Error = FormError;

    fn try_from(form: DirectReportsForm) -> Result<Self, Self::Error> {
        let employee_id =
            EmployeeId::new(form.employee_id).map_err(|_| FormError::InvalidEmployeeId)?;
        let reports = form
            .reports
            .into_iter()
            .map(|id| EmployeeId::new(id).map_err(|_| FormError::InvalidEmployeeId))
            .collect::<Result<BTreeSet<_>, _>>()?;

        if reports.contains(&employee_id) {
            return Err(FormError::SelfReport);
        }

        Ok(Self {
            employee_id,
            reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_duplicates() {
        let payload = DirectReportsPayload::try_from(DirectReportsForm {
            employee_id: 1,
            reports: vec![5, 3, 5],
        })
        .unwrap();

        let ids: Vec<i32> = payload.reports.iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn rejects_self_reference() {
        let err = DirectReportsPayload::try_from(DirectReportsForm {
            employee_id: 4,
            reports: vec![2, 4],
        })
        .unwrap_err();
        assert!(matches!(err, FormError::SelfReport));
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = DirectReportsPayload::try_from(DirectReportsForm {
            employee_id: 4,
            reports: vec![0],
        })
        .unwrap_err();
        assert!(matches!(err, FormError::InvalidEmployeeId));
    }
}
