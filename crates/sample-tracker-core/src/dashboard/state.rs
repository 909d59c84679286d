//! Serializable view state and the view derived from it.

use serde::{Deserialize, Serialize};

use super::config::DashboardConfig;
use crate::models::Sample;
use crate::query::{self, Query, SortSpec, StatusFilter};

/// Everything the user can change about the table, apart from the data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewState {
    pub query: Query,
    /// Zero-based
    pub page: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            query: Query {
                search: String::new(),
                status: StatusFilter::All,
                sort: config.default_sort,
            },
            page: 0,
            page_size: config.default_page_size,
        }
    }

    pub fn set_search(&mut self, search: String) {
        self.query.search = search;
        self.page = 0;
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.query.status = status;
        self.page = 0;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.query.sort = sort;
        self.page = 0;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.page = 0;
    }

    /// Recompute the visible rows from scratch.
    pub fn derive(&self, samples: &[Sample]) -> DashboardView {
        let ordered: Vec<Sample> = query::run(samples, &self.query).into_iter().cloned().collect();
        let page = query::paginate(&ordered, self.page, self.page_size);
        DashboardView {
            page_count: page.page_count(),
            rows: page.items,
            total: page.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// What the table renders.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DashboardView {
    pub rows: Vec<Sample>,
    /// Matching records across all pages
    pub total: usize,
    pub page_count: usize,
    pub page: usize,
    pub page_size: usize,
}
