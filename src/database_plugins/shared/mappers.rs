// ABOUTME: Model to SQL row conversion helpers for database operations
// ABOUTME: Maps subscription rows from PostgreSQL and SQLite into the domain model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Model ↔ SQL row conversion helpers
//!
//! Both backends store `start_date`/`end_date` as timestamps at the first
//! instant of the month; they differ only in how `user_id` is stored, so the
//! caller decodes that column and passes the parsed value in.

use crate::errors::{DatabaseError, DatabaseResult};
use crate::models::{MonthYear, Subscription};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Column list selected by every subscription read, in struct order
pub const SUBSCRIPTION_COLUMNS: &str = "id, service_name, price, user_id, start_date, end_date";

fn column<'r, R, T>(row: &'r R, name: &'static str) -> DatabaseResult<T>
where
    R: sqlx::Row,
    &'static str: sqlx::ColumnIndex<R>,
    T: sqlx::Decode<'r, R::Database> + sqlx::Type<R::Database>,
{
    row.try_get(name).map_err(|e| DatabaseError::InvalidData {
        column: name,
        reason: e.to_string(),
    })
}

/// Parse a `Subscription` from a database row (database-agnostic)
///
/// # Errors
///
/// Returns [`DatabaseError::InvalidData`] if a column is missing, has the
/// wrong type, or holds a timestamp outside the `MM-YYYY` year range
pub fn parse_subscription_from_row<R>(row: &R, user_id: Uuid) -> DatabaseResult<Subscription>
where
    R: sqlx::Row,
    &'static str: sqlx::ColumnIndex<R>,
    i64: for<'a> sqlx::Decode<'a, R::Database> + sqlx::Type<R::Database>,
    String: for<'a> sqlx::Decode<'a, R::Database> + sqlx::Type<R::Database>,
    DateTime<Utc>: for<'a> sqlx::Decode<'a, R::Database> + sqlx::Type<R::Database>,
    Option<DateTime<Utc>>: for<'a> sqlx::Decode<'a, R::Database> + sqlx::Type<R::Database>,
{
    let start_date: DateTime<Utc> = column(row, "start_date")?;
    let end_date: Option<DateTime<Utc>> = column(row, "end_date")?;

    Ok(Subscription {
        id: column(row, "id")?,
        service_name: column(row, "service_name")?,
        price: column(row, "price")?,
        user_id,
        start_date: month_from_timestamp("start_date", start_date)?,
        end_date: end_date
            .map(|timestamp| month_from_timestamp("end_date", timestamp))
            .transpose()?,
    })
}

/// Parse a UUID stored as hyphenated text (`SQLite`)
///
/// # Errors
///
/// Returns [`DatabaseError::InvalidData`] if the text is not a UUID
pub fn parse_uuid_text(column: &'static str, raw: &str) -> DatabaseResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| DatabaseError::InvalidData {
        column,
        reason: e.to_string(),
    })
}

fn month_from_timestamp(
    column: &'static str,
    timestamp: DateTime<Utc>,
) -> DatabaseResult<MonthYear> {
    MonthYear::from_timestamp(timestamp).map_err(|e| DatabaseError::InvalidData {
        column,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid_text() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid_text("user_id", &id.to_string()).unwrap(), id);

        let error = parse_uuid_text("user_id", "not-a-uuid").unwrap_err();
        assert!(matches!(
            error,
            DatabaseError::InvalidData {
                column: "user_id",
                ..
            }
        ));
    }

    #[test]
    fn test_month_from_timestamp_truncates() {
        let timestamp = MonthYear::new(2025, 7).unwrap().to_timestamp() + chrono::Duration::days(9);
        assert_eq!(
            month_from_timestamp("start_date", timestamp).unwrap(),
            MonthYear::new(2025, 7).unwrap()
        );
    }
}
