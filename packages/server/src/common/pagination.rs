//! Cursor-based pagination for newest-first listings.
//!
//! The admin view asks for everything (`PageRequest::all()`); the same interface
//! takes a limit and an opaque cursor once the table outgrows a single page.
//!
//! ```rust,ignore
//! let page = store.list(PageRequest::first(50, None)).await?;
//! let next = page.next_cursor.map(|c| PageRequest::first(50, Some(c)));
//! ```

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use uuid::Uuid;

/// Largest page a caller can ask for with an explicit limit.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Opaque cursor (base64-encoded id of the last item on the previous page).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(Uuid);

impl Cursor {
    pub fn new(id: Uuid) -> Self {
        Cursor(id)
    }

    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.as_bytes())
    }

    pub fn decode(s: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .context("Invalid cursor: not valid base64")?;
        let uuid = Uuid::from_slice(&bytes).context("Invalid cursor: not a valid UUID")?;
        Ok(Cursor(uuid))
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

/// What slice of a newest-first listing to return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// `None` returns every remaining row.
    pub limit: Option<u32>,
    /// Return rows strictly older than this one.
    pub after: Option<Cursor>,
}

impl PageRequest {
    /// The full ordered set.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn first(limit: u32, after: Option<Cursor>) -> Self {
        PageRequest {
            limit: Some(limit.clamp(1, MAX_PAGE_SIZE)),
            after,
        }
    }

    /// Row count to fetch from the store: one extra to detect a following page.
    pub fn fetch_limit(&self) -> Option<i64> {
        self.limit.map(|l| l as i64 + 1)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next_page: bool,
    /// Cursor to pass as `after` for the next page.
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with `PageRequest::fetch_limit`.
    pub fn from_fetched<F>(mut items: Vec<T>, request: &PageRequest, id_of: F) -> Self
    where
        F: Fn(&T) -> Uuid,
    {
        let has_next_page = match request.limit {
            Some(limit) if items.len() > limit as usize => {
                items.truncate(limit as usize);
                true
            }
            _ => false,
        };

        let next_cursor = if has_next_page {
            items.last().map(|item| Cursor::new(id_of(item)).encode())
        } else {
            None
        };

        Page {
            items,
            has_next_page,
            next_cursor,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
