//! Search requests, paging limits, and result pages.

use chrono::{DateTime, Utc};
use eventide_config::EventsSection;
use eventide_core::EventView;
use serde::{Deserialize, Serialize};

/// Page-size limits applied to searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// Page size used when the request omits one.
    pub default_page_size: u32,
    /// Largest accepted page size.
    pub max_page_size: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl From<&EventsSection> for Paging {
    fn from(section: &EventsSection) -> Self {
        Self {
            default_page_size: section.page_size,
            max_page_size: section.max_page_size,
        }
    }
}

/// Caller filters for a search. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Only events starting at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Only events ending at or before this instant.
    pub to: Option<DateTime<Utc>>,
    /// Case-sensitive location substring; blank is ignored.
    pub location: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<u32>,
    /// Items per page (default from [`Paging`]).
    pub page_size: Option<u32>,
}

impl SearchRequest {
    /// An unfiltered request for the first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only events starting at or after `from`.
    #[must_use]
    pub fn starting_from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    /// Only events ending at or before `to`.
    #[must_use]
    pub fn ending_by(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    /// Only events whose location contains `location`.
    #[must_use]
    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Select a page.
    #[must_use]
    pub fn paged(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    /// Resolve defaults and check bounds, returning `(page, page_size)`.
    ///
    /// # Errors
    ///
    /// Returns every paging violation.
    pub(crate) fn resolve_paging(&self, paging: Paging) -> Result<(u32, u32), Vec<String>> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(paging.default_page_size);

        let mut errors = Vec::new();
        if page < 1 {
            errors.push("Page must be at least 1".to_owned());
        }
        if !(1..=paging.max_page_size).contains(&page_size) {
            errors.push(format!(
                "PageSize must be between 1 and {}",
                paging.max_page_size
            ));
        }

        if errors.is_empty() {
            Ok((page, page_size))
        } else {
            Err(errors)
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching events before paging.
    pub total: usize,
    /// 1-based page number.
    pub page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Events on this page, ordered by start.
    pub items: Vec<EventView>,
}
