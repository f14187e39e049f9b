//! Search condition value object and predicate fragments.
//!
//! Each filterable attribute gets one pure fragment function mapping an
//! optional input to an optional `sea_query` expression. Absence (`None`,
//! empty, or whitespace-only strings) means "no constraint", so a fragment
//! never narrows the result set for a blank input. Fragments never fail and
//! never inspect one another.
//!
//! Two composition strategies are provided and render identical SQL:
//!
//! - [`SearchCondition::to_condition`] — conjunction via a call-local
//!   `Condition::all()` accumulator.
//! - [`compose`] — fold over an ordered list of fragment results, skipping
//!   absent entries; an all-absent list yields the universal predicate.

use crate::entity::{Groups, Members};
use sea_query::{Condition, Expr, ExprTrait};

/// Caller-supplied optional filter values, valid for one query invocation.
///
/// All fields are optional; `None` means "no constraint on this attribute".
/// Construct with a struct literal over [`Default`]:
///
/// ```
/// use roster_query::SearchCondition;
///
/// let cond = SearchCondition {
///     age_goe: Some(35),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCondition {
    /// Exact match on the member's name.
    pub name: Option<String>,
    /// Exact match on the joined group's name.
    pub group_name: Option<String>,
    /// Inclusive lower bound on age.
    pub age_goe: Option<i32>,
    /// Inclusive upper bound on age.
    pub age_loe: Option<i32>,
}

impl SearchCondition {
    /// Build the effective filter by conjoining every present fragment into
    /// a single accumulator (builder strategy). With no live constraints the
    /// result is the empty `Condition::all()`, which renders no WHERE clause.
    pub fn to_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(expr) = member_name_eq(self.name.as_deref()) {
            cond = cond.add(expr);
        }
        if let Some(expr) = group_name_eq(self.group_name.as_deref()) {
            cond = cond.add(expr);
        }
        if let Some(expr) = age_goe(self.age_goe) {
            cond = cond.add(expr);
        }
        if let Some(expr) = age_loe(self.age_loe) {
            cond = cond.add(expr);
        }
        cond
    }

    /// The ordered fragment list for this condition (parameter strategy).
    /// Absent entries stay in the list; [`compose`] skips them.
    pub fn fragments(&self) -> Vec<Option<Expr>> {
        vec![
            member_name_eq(self.name.as_deref()),
            group_name_eq(self.group_name.as_deref()),
            age_goe(self.age_goe),
            age_loe(self.age_loe),
        ]
    }
}

/// Equality on `members.name`, or absent for a blank input.
///
/// The presence test trims, but the original (untrimmed) value is bound.
pub fn member_name_eq(name: Option<&str>) -> Option<Expr> {
    match name {
        Some(n) if has_text(n) => Some(Expr::col((Members::Table, Members::Name)).eq(n)),
        _ => None,
    }
}

/// Equality on the joined `groups.name`, or absent for a blank input.
pub fn group_name_eq(name: Option<&str>) -> Option<Expr> {
    match name {
        Some(n) if has_text(n) => Some(Expr::col((Groups::Table, Groups::Name)).eq(n)),
        _ => None,
    }
}

/// `members.age >= value`, or absent.
pub fn age_goe(age: Option<i32>) -> Option<Expr> {
    age.map(|v| Expr::col((Members::Table, Members::Age)).gte(v))
}

/// `members.age <= value`, or absent.
pub fn age_loe(age: Option<i32>) -> Option<Expr> {
    age.map(|v| Expr::col((Members::Table, Members::Age)).lte(v))
}

/// Conjoin two fragment results.
///
/// Absence propagates: if either operand is absent the combination is
/// absent. The combinator itself never fails on an absent operand.
pub fn all_of(lhs: Option<Expr>, rhs: Option<Expr>) -> Option<Expr> {
    Some(lhs?.and(rhs?))
}

/// Fold an ordered list of fragment results into one conjunction, skipping
/// absent entries. An empty or all-absent list yields the empty
/// `Condition::all()` — the universal predicate.
pub fn compose<I>(fragments: I) -> Condition
where
    I: IntoIterator<Item = Option<Expr>>,
{
    fragments
        .into_iter()
        .flatten()
        .fold(Condition::all(), |cond, expr| cond.add(expr))
}

/// Shared presence test for string-valued fragments: blank and
/// whitespace-only inputs count as absent.
fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_query::{Asterisk, PostgresQueryBuilder, SelectStatement, Values};

    fn render(cond: Condition) -> (String, Values) {
        let mut stmt = SelectStatement::default();
        stmt.column(Asterisk).from(Members::Table).cond_where(cond);
        stmt.build(PostgresQueryBuilder)
    }

    #[test]
    fn blank_inputs_produce_no_fragment() {
        assert!(member_name_eq(None).is_none());
        assert!(member_name_eq(Some("")).is_none());
        assert!(member_name_eq(Some("   ")).is_none());
        assert!(member_name_eq(Some("\t\n")).is_none());
        assert!(group_name_eq(Some("  ")).is_none());
        assert!(age_goe(None).is_none());
        assert!(age_loe(None).is_none());
    }

    #[test]
    fn present_inputs_produce_fragments() {
        assert!(member_name_eq(Some("m1")).is_some());
        assert!(group_name_eq(Some("teamA")).is_some());
        assert!(age_goe(Some(35)).is_some());
        assert!(age_loe(Some(40)).is_some());
    }

    #[test]
    fn name_fragment_renders_equality_with_bind() {
        let (sql, values) = render(compose(vec![member_name_eq(Some("m1"))]));
        assert!(sql.contains("WHERE"), "sql: {sql}");
        assert_eq!(sql.matches('$').count(), 1, "sql: {sql}");
        assert_eq!(values.iter().count(), 1);
    }

    #[test]
    fn age_bound_fragments_render_inclusive_comparisons() {
        let (sql, _) = render(compose(vec![age_goe(Some(35))]));
        assert!(sql.contains(">="), "sql: {sql}");

        let (sql, _) = render(compose(vec![age_loe(Some(40))]));
        assert!(sql.contains("<="), "sql: {sql}");
    }

    #[test]
    fn all_absent_condition_renders_no_where_clause() {
        let empty = SearchCondition::default();

        let (sql, values) = render(empty.to_condition());
        assert!(!sql.contains("WHERE"), "sql: {sql}");
        assert_eq!(values.iter().count(), 0);

        let (sql, _) = render(compose(empty.fragments()));
        assert!(!sql.contains("WHERE"), "sql: {sql}");
    }

    #[test]
    fn absent_fragments_do_not_narrow() {
        // A blank name alongside a live age bound must render exactly the
        // same SQL as the age bound alone.
        let with_blank = SearchCondition {
            name: Some("   ".to_string()),
            age_goe: Some(20),
            ..Default::default()
        };
        let without = SearchCondition {
            age_goe: Some(20),
            ..Default::default()
        };
        assert_eq!(
            render(with_blank.to_condition()),
            render(without.to_condition())
        );
    }

    #[test]
    fn builder_and_parameter_strategies_render_identically() {
        let cases = vec![
            SearchCondition::default(),
            SearchCondition {
                name: Some("m1".to_string()),
                ..Default::default()
            },
            SearchCondition {
                group_name: Some("teamB".to_string()),
                age_goe: Some(35),
                ..Default::default()
            },
            SearchCondition {
                name: Some("m4".to_string()),
                group_name: Some("teamB".to_string()),
                age_goe: Some(20),
                age_loe: Some(40),
                ..Default::default()
            },
        ];

        for cond in cases {
            let builder = render(cond.to_condition());
            let params = render(compose(cond.fragments()));
            assert_eq!(builder, params, "strategies diverged for {cond:?}");
        }
    }

    #[test]
    fn all_of_conjoins_present_operands() {
        let combined = all_of(member_name_eq(Some("m1")), age_goe(Some(10)));
        let (sql, values) = render(compose(vec![combined]));
        assert!(sql.contains("AND"), "sql: {sql}");
        assert_eq!(values.iter().count(), 2);
    }

    #[test]
    fn all_of_propagates_absence() {
        assert!(all_of(None, age_goe(Some(10))).is_none());
        assert!(all_of(member_name_eq(Some("m1")), None).is_none());
        assert!(all_of(member_name_eq(Some("  ")), age_goe(None)).is_none());
    }

    #[test]
    fn presence_test_trims_but_binds_original_value() {
        // " m1 " is present (non-blank after trimming); the bound value is
        // the untrimmed original.
        let (_, padded) = render(compose(vec![member_name_eq(Some(" m1 "))]));
        let (_, trimmed) = render(compose(vec![member_name_eq(Some("m1"))]));
        assert_ne!(padded, trimmed);
    }
}
