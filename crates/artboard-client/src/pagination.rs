//! Cursor pagination for list endpoints

use serde::Deserialize;

/// One page of a list endpoint's results.
///
/// `continuation` is an opaque cursor; pass it back via
/// [`ListParams::with_continuation`] to fetch the next page. `None` means the
/// listing is exhausted.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in server order
    pub items: Vec<T>,
    /// Cursor for the next page, absent on the last page
    #[serde(default)]
    pub continuation: Option<String>,
}

impl<T> Page<T> {
    /// Whether a further page exists
    pub fn has_more(&self) -> bool {
        self.continuation.is_some()
    }
}

/// Common query parameters for list endpoints
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    limit: Option<u32>,
    continuation: Option<String>,
}

impl ListParams {
    /// Parameters with server-side defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of items per page
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resume from a previous page's continuation cursor
    pub fn with_continuation(mut self, continuation: impl Into<String>) -> Self {
        self.continuation = Some(continuation.into());
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(ref continuation) = self.continuation {
            query.push(("continuation".to_string(), continuation.clone()));
        }
        query
    }
}
