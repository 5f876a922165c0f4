//! Panel response envelopes.
//!
//! Both API surfaces wrap results the same way:
//! ```json
//! { "object": "list", "data": [ { "object": "server", "attributes": { ... } } ],
//!   "meta": { "pagination": { "total": 3, "current_page": 1, "total_pages": 2 } } }
//! ```
//! Single-object responses carry `attributes` at the top level.

use serde::{Deserialize, Serialize};
use serde_json::Value;

static NULL: Value = Value::Null;

/// A paginated list response.
///
/// Fields stay untyped so that a malformed `data` element or metadata value
/// never rejects the page as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEnvelope {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub meta: Value,
}

impl ListEnvelope {
    /// Attribute objects of each element, in server order.
    pub fn attributes(&self) -> impl Iterator<Item = &Value> {
        self.data
            .as_array()
            .into_iter()
            .flatten()
            .map(|item| item.get("attributes").unwrap_or(&NULL))
    }

    /// The `meta.pagination` block, if it is a non-empty object.
    pub fn pagination(&self) -> Option<&Value> {
        self.meta
            .get("pagination")
            .filter(|p| p.as_object().is_some_and(|o| !o.is_empty()))
    }
}

/// A single-object response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailEnvelope {
    #[serde(default)]
    pub attributes: Value,
    #[serde(default)]
    pub data: Value,
}

impl DetailEnvelope {
    /// Top-level `attributes`, falling back to `data.attributes`.
    /// A response with neither yields `Null`, which normalizes to an
    /// all-absent record.
    pub fn into_attributes(mut self) -> Value {
        if !self.attributes.is_null() {
            return self.attributes;
        }
        self.data
            .get_mut("attributes")
            .map(Value::take)
            .unwrap_or(Value::Null)
    }
}

/// Position within a paginated listing, derived from one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Page just fetched (1-based).
    pub page: u32,
    /// Pages the panel reports in total (at least 1).
    pub total_pages: u32,
}

impl PaginationState {
    /// Read the pagination state of `page` from its envelope.
    ///
    /// `None` when the response has no pagination block at all, which ends
    /// the listing the same way the last page does. A block without
    /// `total_pages` counts as a single page.
    pub fn from_envelope(page: u32, envelope: &ListEnvelope) -> Option<Self> {
        let pagination = envelope.pagination()?;
        let total_pages = pagination
            .get("total_pages")
            .and_then(page_count)
            .unwrap_or(1)
            .max(1);
        Some(Self { page, total_pages })
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    pub fn next(&self) -> Option<u32> {
        if self.is_last() {
            None
        } else {
            Some(self.page + 1)
        }
    }
}

/// Page count from an integer or a whole float. Anything else is ignored.
fn page_count(value: &Value) -> Option<u32> {
    let count = value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))?;
    Some(u32::try_from(count).unwrap_or(u32::MAX))
}
