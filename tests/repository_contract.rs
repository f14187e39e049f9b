//! Public-API contract tests for the repository surface.
//!
//! These exercise the crate exactly as a downstream caller would: public
//! types only, a caller-implemented `DbSession`. The session records every
//! statement it is handed, so the tests pin down the observable contract —
//! which queries run, in what number, with which clauses — without a
//! database.

use may_postgres::types::ToSql;
use may_postgres::Row;
use roster_query::{
    DbSession, MemberRepository, PageRequest, RosterError, SearchCondition,
};
use std::sync::Mutex;

struct RecordingSession {
    statements: Mutex<Vec<(String, usize)>>,
    count: i64,
}

impl RecordingSession {
    fn new(count: i64) -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            count,
        }
    }

    fn statements(&self) -> Vec<(String, usize)> {
        self.statements.lock().unwrap().clone()
    }
}

impl DbSession for RecordingSession {
    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, RosterError> {
        self.statements
            .lock()
            .unwrap()
            .push((query.to_string(), params.len()));
        Ok(vec![])
    }

    fn query_scalar(&self, query: &str, params: &[&dyn ToSql]) -> Result<i64, RosterError> {
        self.statements
            .lock()
            .unwrap()
            .push((query.to_string(), params.len()));
        Ok(self.count)
    }
}

#[test]
fn empty_condition_searches_everything_through_the_join() {
    let session = RecordingSession::new(0);
    let repo = MemberRepository::new(&session);

    let rows = repo.search(&SearchCondition::default()).unwrap();

    assert!(rows.is_empty());
    let statements = session.statements();
    assert_eq!(statements.len(), 1);
    let (sql, params) = &statements[0];
    assert!(sql.contains("LEFT JOIN \"groups\""), "sql: {sql}");
    assert!(!sql.contains("WHERE"), "sql: {sql}");
    assert_eq!(*params, 0);
}

#[test]
fn every_live_field_becomes_one_bound_parameter() {
    let session = RecordingSession::new(0);
    let repo = MemberRepository::new(&session);

    let condition = SearchCondition {
        name: Some("m4".to_string()),
        group_name: Some("teamB".to_string()),
        age_goe: Some(20),
        age_loe: Some(40),
    };
    repo.search(&condition).unwrap();

    let (sql, params) = &session.statements()[0];
    assert_eq!(*params, 4, "sql: {sql}");
    assert_eq!(sql.matches('$').count(), 4, "sql: {sql}");
    assert!(sql.contains(">="), "sql: {sql}");
    assert!(sql.contains("<="), "sql: {sql}");
}

#[test]
fn blank_strings_bind_nothing() {
    let session = RecordingSession::new(0);
    let repo = MemberRepository::new(&session);

    let condition = SearchCondition {
        name: Some("   ".to_string()),
        group_name: Some(String::new()),
        ..Default::default()
    };
    repo.search(&condition).unwrap();

    let (sql, params) = &session.statements()[0];
    assert_eq!(*params, 0, "sql: {sql}");
    assert!(!sql.contains("WHERE"), "sql: {sql}");
}

#[test]
fn builder_and_parameter_strategies_are_interchangeable() {
    let condition = SearchCondition {
        group_name: Some("teamA".to_string()),
        age_goe: Some(35),
        ..Default::default()
    };

    let a = RecordingSession::new(0);
    MemberRepository::new(&a).search(&condition).unwrap();

    let b = RecordingSession::new(0);
    MemberRepository::new(&b)
        .search_with_builder(&condition)
        .unwrap();

    assert_eq!(a.statements(), b.statements());
}

#[test]
fn first_page_shorter_than_its_limit_needs_no_count() {
    let session = RecordingSession::new(7777);
    let repo = MemberRepository::new(&session);

    let page = repo
        .search_page(
            &SearchCondition::default(),
            &PageRequest::new(0, 100).unwrap(),
        )
        .unwrap();

    // Zero rows fetched at offset zero: the page is the whole result.
    assert_eq!(page.total(), 0);
    assert!(!page.has_next());
    assert_eq!(session.statements().len(), 1);
}

#[test]
fn later_page_runs_a_filtered_count() {
    let session = RecordingSession::new(42);
    let repo = MemberRepository::new(&session);

    let condition = SearchCondition {
        age_goe: Some(30),
        ..Default::default()
    };
    let page = repo
        .search_page(&condition, &PageRequest::new(10, 5).unwrap())
        .unwrap();

    assert_eq!(page.total(), 42);
    let statements = session.statements();
    assert_eq!(statements.len(), 2);

    let (main_sql, _) = &statements[0];
    assert!(main_sql.contains("LIMIT"), "sql: {main_sql}");
    assert!(main_sql.contains("OFFSET"), "sql: {main_sql}");

    let (count_sql, count_params) = &statements[1];
    assert!(count_sql.contains("COUNT(*)"), "sql: {count_sql}");
    assert!(count_sql.contains("LEFT JOIN \"groups\""), "sql: {count_sql}");
    assert_eq!(*count_params, 1, "filter must carry over: {count_sql}");
    assert!(!count_sql.contains("LIMIT"), "sql: {count_sql}");
}

#[test]
fn zero_limit_never_reaches_the_session() {
    assert!(matches!(
        PageRequest::new(0, 0),
        Err(RosterError::InvalidPageRequest(_))
    ));
}

#[test]
fn find_operations_target_the_members_table() {
    let session = RecordingSession::new(0);
    let repo = MemberRepository::new(&session);

    repo.find_all().unwrap();
    repo.find_by_name("m1").unwrap();

    let statements = session.statements();
    assert_eq!(statements.len(), 2);
    assert!(statements[0].0.contains("FROM \"members\""));
    assert_eq!(statements[0].1, 0);
    assert!(statements[1].0.contains("WHERE"));
    assert_eq!(statements[1].1, 1);
}
