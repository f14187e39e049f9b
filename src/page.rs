//! Pagination types and the count-skip decision.
//!
//! A [`PageRequest`] is validated at construction, so an invalid request can
//! never reach a session. [`resolve_total`] is the pure predicate deciding
//! whether the fetched page already proves the total match count: exactly
//! when the request starts at offset zero and came back shorter than its
//! limit. Anything else requires a count query — including a short page at a
//! non-zero offset, which proves nothing about rows before the window.

use crate::session::RosterError;

/// Offset/limit window for a paged search. Offsets and limits are unsigned;
/// the only rejectable value is a zero limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: u64,
    limit: u64,
}

impl PageRequest {
    /// Create a page request, rejecting a zero limit before any query runs.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidPageRequest`] if `limit == 0`.
    pub fn new(offset: u64, limit: u64) -> Result<Self, RosterError> {
        if limit == 0 {
            return Err(RosterError::InvalidPageRequest(
                "limit must be at least 1".to_string(),
            ));
        }
        Ok(Self { offset, limit })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

/// A bounded window of rows plus the total match count and the request that
/// produced it.
///
/// Invariants: `rows.len() <= limit`; `total >= offset + rows.len()` unless
/// the offset is past the end, in which case `rows` is empty.
#[derive(Debug, Clone)]
pub struct Page<T> {
    rows: Vec<T>,
    total: u64,
    request: PageRequest,
}

impl<T> Page<T> {
    pub(crate) fn new(rows: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            rows,
            total,
            request,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    /// Total number of matching rows across all pages.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn offset(&self) -> u64 {
        self.request.offset()
    }

    pub fn limit(&self) -> u64 {
        self.request.limit()
    }

    /// Whether rows exist beyond this window.
    pub fn has_next(&self) -> bool {
        self.request.offset() + (self.rows.len() as u64) < self.total
    }
}

/// Decide whether the fetched page already determines the total.
///
/// Returns `Some(total)` exactly when `offset == 0` and the page came back
/// shorter than its limit — the single page then contains every matching
/// row and the count query is skipped. Returns `None` otherwise, meaning a
/// count query is required. This is an exact rule, not a heuristic: a full
/// first page (`fetched == limit`) may or may not be the whole result, and a
/// later page says nothing about earlier rows.
pub(crate) fn resolve_total(offset: u64, limit: u64, fetched: usize) -> Option<u64> {
    if offset == 0 && (fetched as u64) < limit {
        Some(fetched as u64)
    } else {
        None
    }
}
