use serde::Deserialize;
use validator::Validate;

use crate::domain::dates::parse_input_date;
use crate::domain::query::DateRange;
use crate::forms::FormError;

/// Hire-date filter form. Both bounds are `YYYY-MM-DD`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct DateRangeForm {
    #[validate(length(min = 1, message = "Start date is required"))]
    pub start_date: String,
    #[validate(length(min = 1, message = "End date is required"))]
    pub end_date: String,
}

impl TryFrom<DateRangeForm> for DateRange {
    type Error = FormError;

    fn try_from(form: DateRangeForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let start = parse_input_date(&form.start_date)
            .map_err(|_| FormError::InvalidDate { field: "start_date" })?;
        let end = parse_input_date(&form.end_date)
            .map_err(|_| FormError::InvalidDate { field: "end_date" })?;

        DateRange::new(start, end).map_err(|_| FormError::InvertedDateRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(start: &str, end: &str) -> DateRangeForm {
        DateRangeForm {
            start_date: start.into(),
            end_date: end.into(),
        }
    }

    #[test]
    fn accepts_ordered_range() {
        let range = DateRange::try_from(form("2023-01-01", "2023-12-31")).unwrap();
        assert_eq!(range.start().to_string(), "2023-01-01");
        assert_eq!(range.end().to_string(), "2023-12-31");
    }

    #[test]
    fn rejects_start_after_end() {
        let err = DateRange::try_from(form("2023-12-31", "2023-01-01")).unwrap_err();
        assert!(matches!(err, FormError::InvertedDateRange));
        assert_eq!(err.to_string(), "Start date cannot be later than end date");
    }

    #[test]
    fn both_bounds_are_required() {
        let err = DateRange::try_from(form("2023-01-01", "")).unwrap_err();
        assert!(matches!(err, FormError::Validation(_)));
        assert_eq!(err.field(), Some("end_date"));
    }

    #[test]
    fn reports_which_bound_is_malformed() {
        let err = DateRange::try_from(form("2023-13-01", "2023-12-01")).unwrap_err();
        assert!(matches!(err, FormError::InvalidDate { field: "start_date" }));
    }
}
