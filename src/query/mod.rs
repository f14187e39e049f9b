//! Query building and execution.
//!
//! [`SelectQuery`] wraps a `sea_query::SelectStatement` and carries the row
//! type it decodes into. Building methods (projection, filter, join, order,
//! limit/offset) live in `select`; execution methods (`all`, `find_one`) in
//! `execution`; the sea-query `Values` to `ToSql` parameter binding in
//! `value_conversion`.

use may_postgres::Row;

// SELECT query builder
pub mod select;
#[doc(inline)]
pub use select::SelectQuery;

// Query execution methods
pub mod execution;

// Value conversion utilities
pub(crate) mod value_conversion;

/// Decode a typed record from a database row.
pub trait FromRow: Sized {
    /// # Errors
    ///
    /// Returns the driver error when a column is missing or its value does
    /// not convert to the target type.
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error>;
}
