// ABOUTME: Typed predicate builder for the subscription cost aggregation query
// ABOUTME: Keeps $n placeholders and bound parameters in lockstep for PostgreSQL and SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Query parameter binding helpers
//!
//! Filters are appended as [`Predicate`] values. Rendering a predicate takes
//! the next `$n` placeholder and pushes its [`QueryParam`] in the same call,
//! so the SQL text and the parameter list cannot drift apart. Both backends
//! accept `$n` numbered parameters; only the binding of each typed value
//! differs (UUIDs are stored as `TEXT` in `SQLite`).

use crate::constants::tables;
use crate::models::CostQuery;
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;
use uuid::Uuid;

#[cfg(feature = "postgresql")]
use sqlx::postgres::PgArguments;
#[cfg(feature = "postgresql")]
use sqlx::Postgres;

/// A typed value bound to one placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    /// UUID (native in `PostgreSQL`, hyphenated text in `SQLite`)
    Uuid(Uuid),
    /// Text value
    Text(String),
    /// Timestamp with time zone
    Timestamp(DateTime<Utc>),
    /// 64-bit integer
    BigInt(i64),
}

impl QueryParam {
    /// Bind this value onto a `SQLite` query
    #[must_use]
    pub fn bind_sqlite<'q>(
        self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match self {
            Self::Uuid(value) => query.bind(value.to_string()),
            Self::Text(value) => query.bind(value),
            Self::Timestamp(value) => query.bind(value),
            Self::BigInt(value) => query.bind(value),
        }
    }

    /// Bind this value onto a `PostgreSQL` query
    #[cfg(feature = "postgresql")]
    #[must_use]
    pub fn bind_postgres(
        self,
        query: Query<'_, Postgres, PgArguments>,
    ) -> Query<'_, Postgres, PgArguments> {
        match self {
            Self::Uuid(value) => query.bind(value),
            Self::Text(value) => query.bind(value),
            Self::Timestamp(value) => query.bind(value),
            Self::BigInt(value) => query.bind(value),
        }
    }
}

/// One filter condition over a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `column = $n`
    Eq(&'static str, QueryParam),
    /// `column <= $n`
    AtMost(&'static str, QueryParam),
    /// `(column IS NULL OR column >= $n)`; a NULL bound is treated as unbounded
    AtLeastOrNull(&'static str, QueryParam),
}

impl Predicate {
    fn render(&self, placeholder: usize) -> String {
        match self {
            Self::Eq(column, _) => format!("{column} = ${placeholder}"),
            Self::AtMost(column, _) => format!("{column} <= ${placeholder}"),
            Self::AtLeastOrNull(column, _) => {
                format!("({column} IS NULL OR {column} >= ${placeholder})")
            }
        }
    }

    fn into_param(self) -> QueryParam {
        match self {
            Self::Eq(_, param) | Self::AtMost(_, param) | Self::AtLeastOrNull(_, param) => param,
        }
    }
}

/// Builder for `SELECT SUM(price)` over subscriptions overlapping a period
#[derive(Debug, Default)]
pub struct CostQueryBuilder {
    conditions: Vec<String>,
    params: Vec<QueryParam>,
}

impl CostQueryBuilder {
    /// Empty builder with no conditions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-loaded with the overlap filter and any optional filters of `query`
    ///
    /// A subscription overlaps `[range_start, range_end]` when it starts no
    /// later than `range_end` and either never ends or ends no earlier than
    /// `range_start`.
    #[must_use]
    pub fn from_query(query: &CostQuery) -> Self {
        let mut builder = Self::new()
            .with(Predicate::AtMost(
                "start_date",
                QueryParam::Timestamp(query.range_end.to_timestamp()),
            ))
            .with(Predicate::AtLeastOrNull(
                "end_date",
                QueryParam::Timestamp(query.range_start.to_timestamp()),
            ));

        if let Some(user_id) = query.user_id {
            builder = builder.with(Predicate::Eq("user_id", QueryParam::Uuid(user_id)));
        }
        if let Some(service_name) = &query.service_name {
            builder = builder.with(Predicate::Eq(
                "service_name",
                QueryParam::Text(service_name.clone()),
            ));
        }
        builder
    }

    /// Append a predicate, assigning it the next placeholder
    #[must_use]
    pub fn with(mut self, predicate: Predicate) -> Self {
        let placeholder = self.params.len() + 1;
        self.conditions.push(predicate.render(placeholder));
        self.params.push(predicate.into_param());
        self
    }

    /// Number of bound parameters so far
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Finish into SQL text and the parameters to bind, in placeholder order
    ///
    /// The result column `total` is never NULL: an empty match set sums to 0.
    #[must_use]
    pub fn build(self) -> (String, Vec<QueryParam>) {
        let mut sql = format!(
            "SELECT CAST(COALESCE(SUM(price), 0) AS BIGINT) AS total FROM {}",
            tables::SUBSCRIPTIONS
        );
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        (sql, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthYear;

    fn period() -> CostQuery {
        CostQuery::for_period(MonthYear::new(2024, 1).unwrap(), MonthYear::new(2024, 6).unwrap())
    }

    #[test]
    fn test_period_only_query() {
        let (sql, params) = CostQueryBuilder::from_query(&period()).build();

        assert_eq!(
            sql,
            "SELECT CAST(COALESCE(SUM(price), 0) AS BIGINT) AS total FROM subscriptions \
             WHERE start_date <= $1 AND (end_date IS NULL OR end_date >= $2)"
        );
        assert_eq!(
            params,
            vec![
                QueryParam::Timestamp(MonthYear::new(2024, 6).unwrap().to_timestamp()),
                QueryParam::Timestamp(MonthYear::new(2024, 1).unwrap().to_timestamp()),
            ]
        );
    }

    #[test]
    fn test_placeholders_follow_optional_filters() {
        let user_id = Uuid::new_v4();

        let (sql, params) =
            CostQueryBuilder::from_query(&period().with_user(user_id).with_service("Netflix"))
                .build();
        assert!(sql.ends_with("AND user_id = $3 AND service_name = $4"));
        assert_eq!(params.len(), 4);
        assert_eq!(params[2], QueryParam::Uuid(user_id));
        assert_eq!(params[3], QueryParam::Text("Netflix".to_owned()));

        let (sql, params) =
            CostQueryBuilder::from_query(&period().with_service("Netflix")).build();
        assert!(sql.ends_with("AND service_name = $3"));
        assert!(!sql.contains("user_id"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_every_placeholder_has_a_param() {
        let builder = CostQueryBuilder::new()
            .with(Predicate::Eq("service_name", QueryParam::Text("a".to_owned())))
            .with(Predicate::AtMost("price", QueryParam::BigInt(10)));
        assert_eq!(builder.param_count(), 2);

        let (sql, params) = builder.build();
        for n in 1..=params.len() {
            assert!(sql.contains(&format!("${n}")));
        }
        assert!(!sql.contains(&format!("${}", params.len() + 1)));
    }

    #[test]
    fn test_empty_builder_has_no_where_clause() {
        let (sql, params) = CostQueryBuilder::new().build();
        assert!(!sql.contains("WHERE"));
        assert!(params.is_empty());
    }
}
