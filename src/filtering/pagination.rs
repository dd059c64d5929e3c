use serde::{Deserialize, Serialize};

use crate::params::QueryParams;

const DEFAULT_PAGE_INDEX: u64 = 0;
const DEFAULT_PAGE_SIZE: u64 = 10;

/// Page state as reported by a paginator component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEvent {
    pub page_index: u64,
    pub page_size: u64,
    /// Total number of items, informational only
    #[serde(default)]
    pub length: u64,
}

/// Produces `page[limit]` / `page[offset]` parameters.
///
/// The configured index, size and length are kept so the paginator can be reset to them
/// after the current page changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationSpec {
    pub page_event: PageEvent,
    page_index: u64,
    page_size: u64,
    length: u64,
}

impl Default for PaginationSpec {
    fn default() -> Self {
        let page_event = PageEvent {
            page_index: DEFAULT_PAGE_INDEX,
            page_size: DEFAULT_PAGE_SIZE,
            length: 0,
        };
        Self {
            page_event,
            page_index: DEFAULT_PAGE_INDEX,
            page_size: DEFAULT_PAGE_SIZE,
            length: 0,
        }
    }
}

impl PaginationSpec {
    /// A page size of zero falls back to the default of 10.
    #[must_use]
    pub fn new(page_index: u64, page_size: u64, length: u64) -> Self {
        let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        let mut spec = Self {
            page_event: PageEvent {
                page_index,
                page_size,
                length,
            },
            page_index,
            page_size,
            length,
        };
        spec.reset_paginator();
        spec
    }

    pub fn set_pagination(&mut self, page_event: PageEvent) {
        self.page_event = page_event;
    }

    /// Go back to the configured index, size and length.
    pub fn reset_paginator(&mut self) {
        self.page_event = PageEvent {
            page_index: self.page_index,
            page_size: self.page_size,
            length: self.length,
        };
    }

    /// `page_index * page_size`
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page_event
            .page_index
            .saturating_mul(self.page_event.page_size)
    }

    #[must_use]
    pub fn http_params(&self) -> QueryParams {
        self.set_http_params(QueryParams::new())
    }

    /// Add `page[limit]` and `page[offset]` to `params`.
    #[must_use]
    pub fn set_http_params(&self, params: QueryParams) -> QueryParams {
        params
            .set("page[limit]", self.page_event.page_size.to_string())
            .set("page[offset]", self.offset().to_string())
    }
}
