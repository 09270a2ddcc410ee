//! Search parameters owned by the directory view.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::dates::{self, wire_date};
use crate::domain::types::{Position, TypeConstraintError};

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Page sizes offered by the size selector.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 25, 50];

/// Inclusive hire-date window whose start is never after its end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TypeConstraintError> {
        if start > end {
            return Err(TypeConstraintError::InvertedDateRange);
        }
        Ok(Self { start, end })
    }

    /// Builds a range from two `YYYY-MM-DD` inputs.
    pub fn parse_input(start: &str, end: &str) -> Result<Self, TypeConstraintError> {
        Self::new(dates::parse_input_date(start)?, dates::parse_input_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Current search, filter and pagination parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text name filter exactly as typed.
    pub name: String,
    pub position: Option<Position>,
    pub date_range: Option<DateRange>,
    /// Zero-based page index.
    pub page: u32,
    pub size: u32,
}

impl SearchQuery {
    pub fn new(size: u32) -> Self {
        Self {
            name: String::new(),
            position: None,
            date_range: None,
            page: 0,
            size,
        }
    }

    /// Trimmed name filter, or `None` when blank.
    pub fn name_filter(&self) -> Option<&str> {
        Some(self.name.trim()).filter(|name| !name.is_empty())
    }

    /// Whether a name or position filter narrows the listing.
    pub fn has_text_filter(&self) -> bool {
        self.name_filter().is_some() || self.position.is_some()
    }

    pub fn has_date_filter(&self) -> bool {
        self.date_range.is_some()
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Query string of the `/employees/search` endpoint. Absent values are
/// omitted from the request.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire_date::option::serialize"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire_date::option::serialize"
    )]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl SearchParams {
    /// Unfiltered listing of active employees.
    pub fn active_listing(page: u32, size: u32) -> Self {
        Self {
            active: Some(true),
            page: Some(page),
            size: Some(size),
            ..Self::default()
        }
    }

    /// Active employees matching every filter set on `query`.
    pub fn from_query(query: &SearchQuery) -> Self {
        Self {
            name: query.name_filter().map(str::to_string),
            position: query.position,
            start_date: query.date_range.map(|range| range.start()),
            end_date: query.date_range.map(|range| range.end()),
            ..Self::active_listing(query.page, query.size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        assert_eq!(
            DateRange::new(date(2023, 12, 31), date(2023, 1, 1)),
            Err(TypeConstraintError::InvertedDateRange)
        );
        assert!(DateRange::new(date(2023, 1, 1), date(2023, 1, 1)).is_ok());
        assert!(DateRange::parse_input("2023-02-01", "2023-01-01").is_err());
    }

    #[test]
    fn date_range_contains_is_inclusive() {
        let range = DateRange::parse_input("2023-01-01", "2023-12-31").unwrap();
        assert!(range.contains(date(2023, 1, 1)));
        assert!(range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2024, 1, 1)));
    }

    #[test]
    fn blank_name_is_not_a_filter() {
        let mut query = SearchQuery::default();
        query.name = "   ".into();
        assert!(!query.has_text_filter());

        query.position = Some(Position::Cpo);
        assert!(query.has_text_filter());
    }

    #[test]
    fn params_from_query_carry_all_filters() {
        let query = SearchQuery {
            name: " Jane ".into(),
            position: Some(Position::Engineer),
            date_range: Some(DateRange::new(date(2023, 1, 1), date(2023, 12, 31)).unwrap()),
            page: 2,
            size: 10,
        };

        let value = serde_json::to_value(SearchParams::from_query(&query)).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "name": "Jane",
                "position": "Engineer",
                "startDate": "01/01/2023",
                "endDate": "12/31/2023",
                "active": true,
                "page": 2,
                "size": 10
            })
        );
    }

    #[test]
    fn active_listing_omits_filters() {
        let value = serde_json::to_value(SearchParams::active_listing(0, 5)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "active": true, "page": 0, "size": 5 })
        );
    }
}
