//! Pagination and free-text filter handling for index operations.

use serde::{Deserialize, Serialize};

/// Optional filter block accepted by every index operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Free-text search over names and natural keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// 1-based page number; values ≤ 0 mean "not specified".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size; values ≤ 0 mean "not specified".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

impl ListFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }
}

/// Turn an optional filter block into query parameters, omitting defaults.
///
/// Pure and total: an absent filter, empty search strings, and
/// non-positive page values all simply produce fewer parameters.
pub fn build_query(filter: Option<&ListFilter>) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let Some(filter) = filter else {
        return params;
    };

    if let Some(search) = filter.search.as_deref() {
        let search = search.trim();
        if !search.is_empty() {
            params.push(("search".to_string(), search.to_string()));
        }
    }
    if let Some(page) = filter.page {
        if page > 0 {
            params.push(("page".to_string(), page.to_string()));
        }
    }
    if let Some(per_page) = filter.per_page {
        if per_page > 0 {
            params.push(("per_page".to_string(), per_page.to_string()));
        }
    }
    params
}
