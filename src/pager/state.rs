use serde::Deserialize;

/// Page size, current page and total item count of a paged listing.
///
/// `current_page` is 1-based; zero or a negative value means no page is
/// active. A non-positive `page_size` or `total_item_count` yields a page
/// count of zero instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingState {
    pub page_size: i64,
    pub current_page: i64,
    pub total_item_count: i64,
}

impl PagingState {
    pub fn new(page_size: i64, current_page: i64, total_item_count: i64) -> Self {
        PagingState {
            page_size,
            current_page,
            total_item_count,
        }
    }

    pub fn page_count(&self) -> i64 {
        if self.page_size <= 0 || self.total_item_count <= 0 {
            return 0;
        }
        let full = self.total_item_count / self.page_size;
        full + i64::from(self.total_item_count % self.page_size != 0)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count()
    }

    pub fn prev_page(&self) -> Option<i64> {
        if self.has_prev() {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    pub fn next_page(&self) -> Option<i64> {
        if self.has_next() {
            Some(self.current_page + 1)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    Unspecified,
}

impl SortDirection {
    /// Value of the `sort_descending` link parameter, `None` when it is cleared.
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            SortDirection::Ascending => Some("false"),
            SortDirection::Descending => Some("true"),
            SortDirection::Unspecified => None,
        }
    }
}

impl From<Option<bool>> for SortDirection {
    fn from(descending: Option<bool>) -> Self {
        match descending {
            Some(true) => SortDirection::Descending,
            Some(false) => SortDirection::Ascending,
            None => SortDirection::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub sort_by: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(sort_by: Option<String>, direction: SortDirection) -> Self {
        SortState { sort_by, direction }
    }

    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        SortState {
            sort_by: Some(column.into()),
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(PagingState::new(10, 1, 25).page_count(), 3);
        assert_eq!(PagingState::new(10, 1, 30).page_count(), 3);
        assert_eq!(PagingState::new(10, 1, 1).page_count(), 1);
        assert_eq!(PagingState::new(1, 1, i64::MAX).page_count(), i64::MAX);
    }

    #[test]
    fn test_degenerate_inputs_have_no_pages() {
        assert_eq!(PagingState::new(10, 1, 0).page_count(), 0);
        assert_eq!(PagingState::new(10, 1, -5).page_count(), 0);
        assert_eq!(PagingState::new(0, 1, 25).page_count(), 0);
        assert_eq!(PagingState::new(-3, 1, 25).page_count(), 0);
    }

    #[test]
    fn test_prev_and_next() {
        let first = PagingState::new(10, 1, 25);
        assert_eq!(first.prev_page(), None);
        assert_eq!(first.next_page(), Some(2));

        let last = PagingState::new(10, 3, 25);
        assert_eq!(last.prev_page(), Some(2));
        assert_eq!(last.next_page(), None);

        let inactive = PagingState::new(10, 0, 25);
        assert_eq!(inactive.prev_page(), None);
        assert_eq!(inactive.next_page(), Some(1));
    }

    #[test]
    fn test_sort_direction_from_flag() {
        assert_eq!(SortDirection::from(Some(true)), SortDirection::Descending);
        assert_eq!(SortDirection::from(Some(false)), SortDirection::Ascending);
        assert_eq!(SortDirection::from(None), SortDirection::Unspecified);
        assert_eq!(SortDirection::Unspecified.as_query_value(), None);
        assert_eq!(SortDirection::Descending.as_query_value(), Some("true"));
    }
}
