//! Single source of truth for the directory's search parameters.

use crate::domain::query::{DateRange, SearchQuery};
use crate::domain::types::Position;
use crate::services::{ServiceError, ServiceResult};

/// Partial update applied to [`QueryState`] in one step.
///
/// `None` leaves a field untouched. For `position` and `date_range`,
/// `Some(None)` clears the filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryUpdate {
    pub name: Option<String>,
    pub position: Option<Option<Position>>,
    pub date_range: Option<Option<DateRange>>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
    query: SearchQuery,
}

impl QueryState {
    pub fn new(page_size: u32) -> ServiceResult<Self> {
        if page_size == 0 {
            return Err(ServiceError::InvalidPageSize);
        }
        Ok(Self {
            query: SearchQuery::new(page_size),
        })
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Applies every field of `update` or none of them.
    ///
    /// Changing a filter or the page size moves back to the first page unless
    /// the same update names a page explicitly.
    pub fn apply(&mut self, update: QueryUpdate) -> ServiceResult<()> {
        if update.size == Some(0) {
            return Err(ServiceError::InvalidPageSize);
        }

        let resets_page = update.name.is_some()
            || update.position.is_some()
            || update.date_range.is_some()
            || update.size.is_some();

        if let Some(name) = update.name {
            self.query.name = name;
        }
        if let Some(position) = update.position {
            self.query.position = position;
        }
        if let Some(date_range) = update.date_range {
            self.query.date_range = date_range;
        }
        if let Some(size) = update.size {
            self.query.size = size;
        }

        match update.page {
            Some(page) => self.query.page = page,
            None if resets_page => self.query.page = 0,
            None => {}
        }

        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.query.name = name.into();
        self.query.page = 0;
    }

    /// Changes the position filter. An applied date range is kept.
    pub fn set_position(&mut self, position: Option<Position>) {
        self.query.position = position;
        self.query.page = 0;
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.query.date_range = range;
        self.query.page = 0;
    }

    /// Moves to `page`, leaving every other field alone.
    pub fn set_page(&mut self, page: u32) {
        self.query.page = page;
    }

    pub fn set_size(&mut self, size: u32) -> ServiceResult<()> {
        if size == 0 {
            return Err(ServiceError::InvalidPageSize);
        }
        self.query.size = size;
        self.query.page = 0;
        Ok(())
    }

    /// Drops name, position and date filters and returns to the first page.
    pub fn clear_filters(&mut self) {
        self.query.name.clear();
        self.query.position = None;
        self.query.date_range = None;
        self.query.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )
        .unwrap()
    }

    fn state_on_page(page: u32) -> QueryState {
        let mut state = QueryState::new(5).unwrap();
        state.set_page(page);
        state
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(matches!(QueryState::new(0), Err(ServiceError::InvalidPageSize)));
        let mut state = QueryState::new(5).unwrap();
        assert!(state.set_size(0).is_err());
        assert_eq!(state.query().size, 5);
    }

    #[test]
    fn page_change_keeps_other_fields() {
        let mut state = QueryState::new(10).unwrap();
        state.set_name("Jane");
        state.set_position(Some(Position::Engineer));
        state.set_date_range(Some(range()));

        state.set_page(3);

        let query = state.query();
        assert_eq!(query.page, 3);
        assert_eq!(query.name, "Jane");
        assert_eq!(query.position, Some(Position::Engineer));
        assert_eq!(query.date_range, Some(range()));
        assert_eq!(query.size, 10);
    }

    #[test]
    fn filter_changes_reset_page() {
        let mut state = state_on_page(4);
        state.set_name("Al");
        assert_eq!(state.query().page, 0);

        let mut state = state_on_page(4);
        state.set_position(Some(Position::Hr));
        assert_eq!(state.query().page, 0);

        let mut state = state_on_page(4);
        state.set_date_range(Some(range()));
        assert_eq!(state.query().page, 0);
    }

    #[test]
    fn size_change_resets_page() {
        let mut state = state_on_page(2);
        state.set_size(10).unwrap();
        assert_eq!(state.query().page, 0);
        assert_eq!(state.query().size, 10);
    }

    #[test]
    fn position_change_keeps_date_range() {
        let mut state = QueryState::new(5).unwrap();
        state.set_date_range(Some(range()));

        state.set_position(Some(Position::Cto));
        state.set_position(None);

        assert_eq!(state.query().date_range, Some(range()));
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let mut state = state_on_page(2);
        let before = state.clone();

        let result = state.apply(QueryUpdate {
            name: Some("Zed".into()),
            size: Some(0),
            ..QueryUpdate::default()
        });

        assert!(result.is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn apply_honours_explicit_page() {
        let mut state = state_on_page(2);
        state
            .apply(QueryUpdate {
                position: Some(Some(Position::Ceo)),
                page: Some(1),
                ..QueryUpdate::default()
            })
            .unwrap();
        assert_eq!(state.query().page, 1);

        state
            .apply(QueryUpdate {
                position: Some(None),
                ..QueryUpdate::default()
            })
            .unwrap();
        assert_eq!(state.query().page, 0);
        assert_eq!(state.query().position, None);
    }

    #[test]
    fn clear_filters_restores_defaults_but_keeps_size() {
        let mut state = QueryState::new(25).unwrap();
        state.set_name("Ali");
        state.set_position(Some(Position::Hr));
        state.set_date_range(Some(range()));
        state.set_page(3);

        state.clear_filters();

        let query = state.query();
        assert!(!query.has_text_filter());
        assert!(!query.has_date_filter());
        assert_eq!(query.page, 0);
        assert_eq!(query.size, 25);
    }
}
