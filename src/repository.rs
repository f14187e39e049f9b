//! Caller-facing search operations over members and their groups.
//!
//! The repository owns statement construction: every `search*` operation
//! shares one join-plus-filter shape (members LEFT JOIN groups, composed
//! condition applied), differing only in projection, ordering, and
//! windowing. The session is injected per repository instance; nothing here
//! is process-global, and a transaction-scoped session makes the main and
//! count queries of one page see a consistent snapshot.

use crate::condition::{compose, SearchCondition};
use crate::entity::{Group, Groups, Member, MemberGroupRow, Members};
use crate::page::{resolve_total, Page, PageRequest};
use crate::query::value_conversion::with_converted_params;
use crate::query::SelectQuery;
use crate::session::{DbSession, RosterError};
use sea_query::{
    Alias, Condition, Expr, ExprTrait, IntoColumnRef, IntoCondition, NullOrdering, Order,
    PostgresQueryBuilder, SelectStatement,
};

/// Sortable attributes of the search projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    MemberName,
    Age,
    GroupName,
}

/// One caller-supplied ORDER BY term, with optional explicit null placement
/// (member and group names are nullable).
#[derive(Debug, Clone)]
pub struct SortTerm {
    pub key: SortKey,
    pub order: Order,
    pub nulls: Option<NullOrdering>,
}

impl SortTerm {
    pub fn new(key: SortKey, order: Order) -> Self {
        Self {
            key,
            order,
            nulls: None,
        }
    }

    pub fn with_nulls(key: SortKey, order: Order, nulls: NullOrdering) -> Self {
        Self {
            key,
            order,
            nulls: Some(nulls),
        }
    }

    fn apply(&self, query: SelectQuery<MemberGroupRow>) -> SelectQuery<MemberGroupRow> {
        let column = match self.key {
            SortKey::MemberName => (Members::Table, Members::Name).into_column_ref(),
            SortKey::Age => (Members::Table, Members::Age).into_column_ref(),
            SortKey::GroupName => (Groups::Table, Groups::Name).into_column_ref(),
        };
        match &self.nulls {
            Some(nulls) => query.order_by_with_nulls(column, self.order.clone(), nulls.clone()),
            None => query.order_by(column, self.order.clone()),
        }
    }
}

/// Read-side repository for members, parameterized over the data-access
/// session.
pub struct MemberRepository<'a, S> {
    session: &'a S,
}

impl<'a, S> MemberRepository<'a, S>
where
    S: DbSession,
{
    pub fn new(session: &'a S) -> Self {
        Self { session }
    }

    /// Fetch every member, unconditioned.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` on storage-access failure.
    pub fn find_all(&self) -> Result<Vec<Member>, RosterError> {
        SelectQuery::<Member>::from_table(Members::Table)
            .select_all()
            .all(self.session)
    }

    /// Fetch members whose name matches exactly. No matches is an empty
    /// vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` on storage-access failure.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<Member>, RosterError> {
        SelectQuery::<Member>::from_table(Members::Table)
            .select_all()
            .filter(Expr::col((Members::Table, Members::Name)).eq(name))
            .all(self.session)
    }

    /// Search members joined to their groups, filtered by the condition's
    /// live fragments. Members without a group appear with NULL group
    /// columns. Row order is storage default.
    ///
    /// Composes the filter from the ordered fragment list (parameter
    /// strategy); [`Self::search_with_builder`] is the accumulator-built
    /// twin and returns the same result set.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` on storage-access failure.
    pub fn search(&self, condition: &SearchCondition) -> Result<Vec<MemberGroupRow>, RosterError> {
        self.row_query(compose(condition.fragments()))
            .all(self.session)
    }

    /// [`Self::search`] with the filter built through the mutable
    /// `Condition::all()` accumulator instead of the fragment-list fold.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` on storage-access failure.
    pub fn search_with_builder(
        &self,
        condition: &SearchCondition,
    ) -> Result<Vec<MemberGroupRow>, RosterError> {
        self.row_query(condition.to_condition()).all(self.session)
    }

    /// [`Self::search`] with caller-supplied ordering, applied in term
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` on storage-access failure.
    pub fn search_sorted(
        &self,
        condition: &SearchCondition,
        sort: &[SortTerm],
    ) -> Result<Vec<MemberGroupRow>, RosterError> {
        let mut query = self.row_query(condition.to_condition());
        for term in sort {
            query = term.apply(query);
        }
        query.all(self.session)
    }

    /// Search one page of results and its total match count.
    ///
    /// The main query is windowed by the request. When the first page comes
    /// back shorter than its limit it already contains every matching row,
    /// so the total is the row count and no count query is issued. In every
    /// other case a separate `COUNT(*)` query runs with the same join and
    /// filter, no projection, and no ordering or window.
    ///
    /// A request past the end of the result succeeds with zero rows and the
    /// correct total.
    ///
    /// # Errors
    ///
    /// Returns `RosterError` on storage-access failure. (An invalid window
    /// is unrepresentable: [`PageRequest::new`] rejects it before any query
    /// can be issued.)
    pub fn search_page(
        &self,
        condition: &SearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberGroupRow>, RosterError> {
        let rows = self
            .row_query(condition.to_condition())
            .limit(page.limit())
            .offset(page.offset())
            .all(self.session)?;

        let total = match resolve_total(page.offset(), page.limit(), rows.len()) {
            Some(total) => total,
            None => self.count(condition)?,
        };

        Ok(Page::new(rows, total, *page))
    }

    /// Count matching member-group pairs under the condition's filter.
    fn count(&self, condition: &SearchCondition) -> Result<u64, RosterError> {
        let mut stmt = SelectStatement::default();
        stmt.expr(Expr::cust("COUNT(*)"))
            .from(Members::Table)
            .join(
                sea_query::JoinType::LeftJoin,
                Groups::Table,
                join_on_group(),
            )
            .cond_where(condition.to_condition());

        let (sql, values) = stmt.build(PostgresQueryBuilder);
        log::debug!("count: {sql}");

        let total = with_converted_params(&values, |params| {
            self.session.query_scalar(&sql, params)
        })?;
        Ok(Ord::max(total, 0) as u64)
    }

    /// The shared search statement: members LEFT JOIN groups, flattened
    /// projection, filter applied.
    fn row_query<C>(&self, filter: C) -> SelectQuery<MemberGroupRow>
    where
        C: IntoCondition,
    {
        SelectQuery::<MemberGroupRow>::from_table(Members::Table)
            .expr_as(
                Expr::col((Members::Table, Members::Id)),
                Alias::new("member_id"),
            )
            .expr_as(
                Expr::col((Members::Table, Members::Name)),
                Alias::new("member_name"),
            )
            .expr_as(Expr::col((Members::Table, Members::Age)), Alias::new("age"))
            .expr_as(
                Expr::col((Groups::Table, Groups::Id)),
                Alias::new("group_id"),
            )
            .expr_as(
                Expr::col((Groups::Table, Groups::Name)),
                Alias::new("group_name"),
            )
            .left_join(Groups::Table, join_on_group())
            .filter(filter)
    }
}

/// Fetch every group, unconditioned. Provided for completeness of the
/// read-side model; group membership itself is reached through the search
/// join.
pub fn find_all_groups<S>(session: &S) -> Result<Vec<Group>, RosterError>
where
    S: DbSession,
{
    SelectQuery::<Group>::from_table(Groups::Table)
        .select_all()
        .all(session)
}

fn join_on_group() -> Condition {
    Expr::col((Members::Table, Members::GroupId))
        .equals((Groups::Table, Groups::Id))
        .into_condition()
}
