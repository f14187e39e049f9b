//! Table definitions and read models for the roster schema.
//!
//! Two tables: `members` with a nullable many-to-one reference to `groups`.
//! This crate only reads these records; writes belong to whatever owns the
//! schema. Member names are nullable in storage — the data set contains
//! members that were registered without a name.

use crate::query::FromRow;
use may_postgres::Row;
use sea_query::Iden;

/// `members` table and its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Members {
    Table,
    Id,
    Name,
    Age,
    GroupId,
}

impl Iden for Members {
    fn unquoted(&self) -> &str {
        match self {
            Members::Table => "members",
            Members::Id => "id",
            Members::Name => "name",
            Members::Age => "age",
            Members::GroupId => "group_id",
        }
    }
}

/// `groups` table and its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Groups {
    Table,
    Id,
    Name,
}

impl Iden for Groups {
    fn unquoted(&self) -> &str {
        match self {
            Groups::Table => "groups",
            Groups::Id => "id",
            Groups::Name => "name",
        }
    }
}

/// A member record as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub name: Option<String>,
    pub age: i32,
    pub group_id: Option<i64>,
}

impl FromRow for Member {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            age: row.try_get("age")?,
            group_id: row.try_get("group_id")?,
        })
    }
}

/// A group record as stored. Members reference it; no back-reference
/// collection is kept here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

impl FromRow for Group {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    }
}

/// Flattened member+group projection returned by the search operations.
///
/// Group columns are `None` for members without a group assignment — the
/// search join is a LEFT JOIN, so such members still appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberGroupRow {
    pub member_id: i64,
    pub member_name: Option<String>,
    pub age: i32,
    pub group_id: Option<i64>,
    pub group_name: Option<String>,
}

impl FromRow for MemberGroupRow {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(Self {
            member_id: row.try_get("member_id")?,
            member_name: row.try_get("member_name")?,
            age: row.try_get("age")?,
            group_id: row.try_get("group_id")?,
            group_name: row.try_get("group_name")?,
        })
    }
}
