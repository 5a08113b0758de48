//! Pure derivation of the visible page over a store's rows.
//!
//! Nothing here mutates a store or performs I/O; calling twice with the
//! same inputs yields the same output.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::entity::Resource;
use std::collections::HashMap;

/// Facet value meaning "no constraint", alongside the empty string.
pub const ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text search; empty matches everything.
    pub search: String,
    /// Categorical filters, matched by exact equality against
    /// [`Resource::facet`] unless the value is the [`ALL`] sentinel.
    pub facets: HashMap<String, String>,
}

impl FilterState {
    pub fn with_search(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }

    pub fn set_facet(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.facets.insert(key.into(), value.into());
    }

    /// True when the row survives both the search text and every facet.
    ///
    /// Search is a case-folded substring test over the row's declared
    /// string fields, ANY-match. Facets compare exactly, no folding.
    pub fn matches<T: Resource>(&self, row: &T) -> bool {
        let query = self.search.trim().to_lowercase();
        let search_ok = query.is_empty()
            || row
                .search_text()
                .iter()
                .any(|field| field.to_lowercase().contains(&query));
        if !search_ok {
            return false;
        }
        self.facets.iter().all(|(key, want)| {
            if want.is_empty() || want == ALL {
                return true;
            }
            row.facet(key).map(|have| have == *want).unwrap_or(false)
        })
    }
}

/// 1-based window over the filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageWindow {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone)]
pub struct PageView<T> {
    pub rows: Vec<T>,
    pub total_matched: usize,
    pub total_pages: usize,
}

/// Rows surviving the filter, unpaginated.
pub fn filtered_rows<T: Resource>(rows: &[T], filter: &FilterState) -> Vec<T> {
    rows.iter().filter(|row| filter.matches(*row)).cloned().collect()
}

/// The currently visible page of matching rows.
///
/// `total_pages` floors at 1 even when nothing matches. The slice bounds
/// are clamped to the available rows, but the page index itself is not:
/// after a filter change narrows the result set, resetting the index to
/// 1 is the caller's job.
pub fn visible_rows<T: Resource>(
    rows: &[T],
    filter: &FilterState,
    window: PageWindow,
) -> PageView<T> {
    let matched: Vec<&T> = rows.iter().filter(|row| filter.matches(*row)).collect();
    let total_matched = matched.len();
    let page_size = window.page_size.max(1);
    let total_pages = if total_matched == 0 {
        1
    } else {
        (total_matched + page_size - 1) / page_size
    };
    let start = window.page_index.saturating_sub(1) * page_size;
    let rows = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();
    PageView {
        rows,
        total_matched,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Row {
        id: i64,
        name: String,
        status: String,
    }

    impl Resource for Row {
        const ENDPOINT: &'static str = "/api/rows";
        fn id(&self) -> EntityId {
            EntityId::Int(self.id)
        }
        fn search_text(&self) -> Vec<&str> {
            vec![&self.name]
        }
        fn facet(&self, key: &str) -> Option<String> {
            match key {
                "status" => Some(self.status.clone()),
                _ => None,
            }
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row {
                id: i as i64,
                name: format!("row {}", i),
                status: if i % 2 == 0 { "Active" } else { "Completed" }.into(),
            })
            .collect()
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let data = rows(7);
        let page = visible_rows(&data, &FilterState::default(), PageWindow::first(100));
        assert_eq!(page.total_matched, 7);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let data = vec![Row {
            id: 1,
            name: "Computer Packages".into(),
            status: "Active".into(),
        }];
        let page = visible_rows(&data, &FilterState::with_search("comp"), PageWindow::default());
        assert_eq!(page.total_matched, 1);
        let page = visible_rows(&data, &FilterState::with_search("PACK"), PageWindow::default());
        assert_eq!(page.total_matched, 1);
        let page = visible_rows(&data, &FilterState::with_search("xyz"), PageWindow::default());
        assert_eq!(page.total_matched, 0);
    }

    #[test]
    fn test_facet_is_exact_and_all_is_sentinel() {
        let data = rows(4);
        let mut filter = FilterState::default();
        filter.set_facet("status", "Active");
        assert_eq!(visible_rows(&data, &filter, PageWindow::first(100)).total_matched, 2);

        // no case folding on facets
        filter.set_facet("status", "active");
        assert_eq!(visible_rows(&data, &filter, PageWindow::first(100)).total_matched, 0);

        filter.set_facet("status", ALL);
        assert_eq!(visible_rows(&data, &filter, PageWindow::first(100)).total_matched, 4);
    }

    #[test]
    fn test_unknown_facet_key_matches_nothing() {
        let data = rows(3);
        let mut filter = FilterState::default();
        filter.set_facet("department", "Engineering");
        assert_eq!(visible_rows(&data, &filter, PageWindow::first(100)).total_matched, 0);
    }

    #[test]
    fn test_page_math_12_rows_size_5() {
        let data = rows(12);
        let page = visible_rows(&data, &FilterState::default(), PageWindow::new(3, 5));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[0].id, 10);
        assert_eq!(page.rows[1].id, 11);
    }

    #[test]
    fn test_total_pages_floors_at_one() {
        let data: Vec<Row> = Vec::new();
        let page = visible_rows(&data, &FilterState::default(), PageWindow::first(5));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_matched, 0);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_out_of_range_page_yields_empty_slice() {
        let data = rows(3);
        let page = visible_rows(&data, &FilterState::default(), PageWindow::new(9, 5));
        assert!(page.rows.is_empty());
        assert_eq!(page.total_matched, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let data = rows(12);
        let filter = FilterState::with_search("row 1");
        let window = PageWindow::new(1, 5);
        let first = visible_rows(&data, &filter, window);
        let second = visible_rows(&data, &filter, window);
        assert_eq!(first.total_matched, second.total_matched);
        assert_eq!(first.total_pages, second.total_pages);
        assert_eq!(first.rows, second.rows);
    }
}
