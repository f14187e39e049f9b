//! Select query builder.
//!
//! `SelectQuery<M>` builds a SELECT statement that decodes into `M`. Query
//! building methods are defined here; execution methods are in the execution
//! module.

use crate::query::FromRow;
use sea_query::{
    Expr, IntoColumnRef, IntoCondition, IntoIden, IntoTableRef, JoinType, NullOrdering, Order,
    PostgresQueryBuilder, SelectStatement, Values,
};
use std::marker::PhantomData;

/// Query builder for selecting records decoded as `M`.
///
/// ```
/// use roster_query::{Member, Members, SelectQuery};
/// use sea_query::{Expr, ExprTrait, Order};
///
/// let query = SelectQuery::<Member>::from_table(Members::Table)
///     .select_all()
///     .filter(Expr::col((Members::Table, Members::Age)).gte(18))
///     .order_by((Members::Table, Members::Id), Order::Asc)
///     .limit(10);
/// let (sql, _values) = query.build();
/// assert!(sql.contains("LIMIT"));
/// ```
pub struct SelectQuery<M> {
    pub(crate) stmt: SelectStatement,
    _marker: PhantomData<M>,
}

impl<M> SelectQuery<M>
where
    M: FromRow,
{
    /// Start a query over the given table with an empty projection.
    pub fn from_table<T>(table: T) -> Self
    where
        T: IntoTableRef,
    {
        let mut stmt = SelectStatement::default();
        stmt.from(table);
        Self {
            stmt,
            _marker: PhantomData,
        }
    }

    /// Project every column (`SELECT *`).
    pub fn select_all(mut self) -> Self {
        self.stmt.column(sea_query::Asterisk);
        self
    }

    /// Add one projected column.
    pub fn column<C>(mut self, col: C) -> Self
    where
        C: IntoColumnRef,
    {
        self.stmt.column(col);
        self
    }

    /// Add a projected expression under an alias. Search projections use
    /// this to flatten joined columns into one row shape.
    pub fn expr_as<A>(mut self, expr: Expr, alias: A) -> Self
    where
        A: IntoIden,
    {
        self.stmt.expr_as(expr, alias);
        self
    }

    /// Add a filter. Conditions from multiple calls are conjoined.
    pub fn filter<C>(mut self, condition: C) -> Self
    where
        C: IntoCondition,
    {
        self.stmt.cond_where(condition.into_condition());
        self
    }

    /// LEFT JOIN another table. Rows without a join partner survive with
    /// NULL columns on the joined side.
    pub fn left_join<T, C>(mut self, table: T, on: C) -> Self
    where
        T: IntoTableRef,
        C: IntoCondition,
    {
        self.stmt.join(JoinType::LeftJoin, table, on);
        self
    }

    /// Add an ORDER BY term.
    pub fn order_by<C>(mut self, column: C, order: Order) -> Self
    where
        C: IntoColumnRef,
    {
        self.stmt.order_by(column, order);
        self
    }

    /// Add an ORDER BY term with explicit null placement.
    pub fn order_by_with_nulls<C>(mut self, column: C, order: Order, nulls: NullOrdering) -> Self
    where
        C: IntoColumnRef,
    {
        self.stmt.order_by_with_nulls(column, order, nulls);
        self
    }

    /// Add a LIMIT clause.
    pub fn limit(mut self, limit: u64) -> Self {
        self.stmt.limit(limit);
        self
    }

    /// Add an OFFSET clause.
    pub fn offset(mut self, offset: u64) -> Self {
        self.stmt.offset(offset);
        self
    }

    /// Render the statement to SQL plus bind values.
    pub fn build(&self) -> (String, Values) {
        self.stmt.build(PostgresQueryBuilder)
    }
}
