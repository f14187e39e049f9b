//! Query execution methods for `SelectQuery`.
//!
//! Statements are rendered with `PostgresQueryBuilder`, their values bound
//! through `with_converted_params`, and the resulting rows decoded with the
//! row type's `FromRow` impl.

use crate::query::select::SelectQuery;
use crate::query::value_conversion::with_converted_params;
use crate::query::FromRow;
use crate::session::{DbSession, RosterError};

impl<M> SelectQuery<M>
where
    M: FromRow,
{
    /// Execute the query and return all results.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` if execution fails or a row does not decode.
    pub fn all<S>(self, session: &S) -> Result<Vec<M>, RosterError>
    where
        S: DbSession,
    {
        let (sql, values) = self.build();
        log::debug!("select: {sql}");

        with_converted_params(&values, |params| {
            let rows = session.query_all(&sql, params)?;

            let mut results = Vec::with_capacity(rows.len());
            for row in &rows {
                let record = M::from_row(row)
                    .map_err(|e| RosterError::Decode(format!("failed to decode row: {e}")))?;
                results.push(record);
            }
            Ok(results)
        })
    }

    /// Execute the query and return the first result, or `None` when
    /// nothing matches. A missing match is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` if execution fails or the row does not decode.
    pub fn find_one<S>(self, session: &S) -> Result<Option<M>, RosterError>
    where
        S: DbSession,
    {
        let rows = self.limit(1).all(session)?;
        Ok(rows.into_iter().next())
    }
}
