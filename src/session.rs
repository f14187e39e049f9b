//! Data-access session abstraction over `may_postgres`.
//!
//! Every repository operation runs against a [`DbSession`]: a read-only
//! capability surface of "run a query, give me rows" plus "run a count query,
//! give me one integer". The session is injected into each component rather
//! than held in a process-wide factory, so substitute sessions (mocks,
//! transaction-scoped clients) slot in without changing the query layer.

use may_postgres::types::ToSql;
use may_postgres::{Client, Error as PostgresError, Row};
use std::fmt;

/// Error type for query construction and execution.
#[derive(Debug)]
pub enum RosterError {
    /// PostgreSQL error from `may_postgres`; propagated unchanged.
    Postgres(PostgresError),
    /// Pagination request rejected before any query was issued.
    InvalidPageRequest(String),
    /// Row column decode/conversion error.
    Decode(String),
    /// Other execution errors (e.g. unbindable parameter value).
    Other(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Postgres(e) => {
                write!(f, "PostgreSQL error: {e}")
            }
            RosterError::InvalidPageRequest(s) => {
                write!(f, "Invalid page request: {s}")
            }
            RosterError::Decode(s) => {
                write!(f, "Decode error: {s}")
            }
            RosterError::Other(s) => {
                write!(f, "Execution error: {s}")
            }
        }
    }
}

impl std::error::Error for RosterError {}

impl From<PostgresError> for RosterError {
    fn from(err: PostgresError) -> Self {
        RosterError::Postgres(err)
    }
}

/// Trait for issuing read queries against the store.
///
/// Implementations may wrap a direct client, a pooled connection, or an open
/// transaction. A paged search issues its main and count queries against the
/// same session, so a transaction-scoped implementation gives both queries a
/// consistent read.
///
/// Absent matches are an empty row set, never an error.
pub trait DbSession {
    /// Execute a query and return all rows.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` if query execution fails.
    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, RosterError>;

    /// Execute a scalar query (one row, one `bigint` column) and return the
    /// value. Used for `COUNT(*)` totals.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` if execution fails or the result cannot be
    /// decoded as an `i64`.
    fn query_scalar(&self, query: &str, params: &[&dyn ToSql]) -> Result<i64, RosterError>;
}

/// [`DbSession`] implementation over a `may_postgres::Client`.
///
/// This is the primary session used in production. The client may also be
/// one obtained inside an open transaction; the trait methods only read.
pub struct MayPostgresSession {
    client: Client,
}

impl MayPostgresSession {
    /// Create a session from a `may_postgres::Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Consume the session and return the underlying client.
    pub fn into_client(self) -> Client {
        self.client
    }
}

impl DbSession for MayPostgresSession {
    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, RosterError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("roster_query", sql = %query).entered();

        self.client
            .query(query, params)
            .map_err(RosterError::Postgres)
    }

    fn query_scalar(&self, query: &str, params: &[&dyn ToSql]) -> Result<i64, RosterError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("roster_query", sql = %query).entered();

        let row = self
            .client
            .query_one(query, params)
            .map_err(RosterError::Postgres)?;
        row.try_get::<_, i64>(0)
            .map_err(|e| RosterError::Decode(format!("scalar result was not an i64: {e}")))
    }
}
