//! Paged list envelope (`meta` + `results`).

use serde::{Deserialize, Serialize};

use crate::pagination::{self, ShowingRange};

/// Listing metadata reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    /// Total number of matching records.
    #[serde(default)]
    pub count: u64,

    /// Page the server answered with, when it reports one.
    #[serde(default)]
    pub page: Option<u32>,

    /// Page size the server used, when it reports one.
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// One page of results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPage<T> {
    #[serde(default)]
    pub meta: ListMeta,

    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> ListPage<T> {
    /// Total pages at `per_page`, preferring the server-reported page size.
    #[must_use]
    pub fn total_pages(&self, per_page: u32) -> u32 {
        pagination::total_pages(self.meta.count, self.meta.per_page.unwrap_or(per_page))
    }

    /// "Showing X–Y of Z" bounds for this page.
    #[must_use]
    pub fn showing_range(&self, current_page: u32, per_page: u32) -> ShowingRange {
        pagination::compute_showing_range(
            current_page,
            self.meta.per_page.unwrap_or(per_page),
            self.meta.count,
            self.results.len() as u64,
        )
    }
}
