// ABOUTME: SQLite implementation of the subscription store
// ABOUTME: Used for local development, tests, and in-memory deployments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `SQLite` database implementation
//!
//! `user_id` is stored as hyphenated `TEXT` and month values as `DATETIME`
//! text at the first instant of the month, so range comparisons stay
//! lexicographically consistent.

use super::shared::builders::CostQueryBuilder;
use super::shared::{mappers, validation};
use super::SubscriptionStore;
use crate::constants::tables;
use crate::errors::{DatabaseError, DatabaseResult};
use crate::logging::AppLogger;
use crate::models::{CostQuery, NewSubscription, Subscription};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// `SQLite` database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a connection pool for `database_url`
    ///
    /// In-memory databases live only as long as their connection, so they get
    /// a single connection that is never recycled.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the database cannot be opened
    pub async fn new(database_url: &str) -> DatabaseResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?
            .create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Underlying connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn parse_row(row: &SqliteRow) -> DatabaseResult<Subscription> {
        let raw_user_id: String = row
            .try_get("user_id")
            .map_err(|e| DatabaseError::InvalidData {
                column: "user_id",
                reason: e.to_string(),
            })?;
        let user_id = mappers::parse_uuid_text("user_id", &raw_user_id)?;
        mappers::parse_subscription_from_row(row, user_id)
    }
}

#[async_trait]
impl SubscriptionStore for SqliteDatabase {
    async fn migrate(&self) -> DatabaseResult<()> {
        let started = Instant::now();

        let create_table = format!(
            r"
            CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                service_name TEXT NOT NULL CHECK (length(service_name) <= 256),
                price INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                start_date DATETIME NOT NULL,
                end_date DATETIME
            )
            ",
            table = tables::SUBSCRIPTIONS
        );
        sqlx::query(&create_table)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

        let create_index = format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_user_id ON {table}(user_id)",
            table = tables::SUBSCRIPTIONS
        );
        sqlx::query(&create_index)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

        AppLogger::log_database_operation(
            "migrate",
            tables::SUBSCRIPTIONS,
            true,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(())
    }

    async fn health_check(&self) -> DatabaseResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_subscription(&self, subscription: &NewSubscription) -> DatabaseResult<i64> {
        validation::validate_subscription_write(subscription)?;

        let sql = format!(
            r"
            INSERT INTO {table} (service_name, price, user_id, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
            table = tables::SUBSCRIPTIONS
        );
        let row = sqlx::query(&sql)
            .bind(&subscription.service_name)
            .bind(subscription.price)
            .bind(subscription.user_id.to_string())
            .bind(subscription.start_date.to_timestamp())
            .bind(subscription.end_date.map(|end_date| end_date.to_timestamp()))
            .fetch_one(&self.pool)
            .await?;

        let id: i64 = row.try_get("id")?;
        debug!(
            db.operation = "insert",
            db.table = tables::SUBSCRIPTIONS,
            subscription.id = id,
            "Subscription inserted"
        );
        Ok(id)
    }

    async fn get_subscription(&self, user_id: Uuid, id: i64) -> DatabaseResult<Subscription> {
        let sql = format!(
            "SELECT {} FROM {} WHERE user_id = $1 AND id = $2",
            mappers::SUBSCRIPTION_COLUMNS,
            tables::SUBSCRIPTIONS
        );
        let row = sqlx::query(&sql)
            .bind(user_id.to_string())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::subscription_not_found(id))?;

        Self::parse_row(&row)
    }

    async fn list_subscriptions(&self, user_id: Uuid) -> DatabaseResult<Vec<Subscription>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE user_id = $1 ORDER BY id ASC",
            mappers::SUBSCRIPTION_COLUMNS,
            tables::SUBSCRIPTIONS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        debug!(
            db.operation = "list",
            db.table = tables::SUBSCRIPTIONS,
            db.rows = rows.len(),
            "Subscriptions listed"
        );
        rows.iter().map(Self::parse_row).collect()
    }

    async fn update_subscription(
        &self,
        id: i64,
        subscription: &NewSubscription,
    ) -> DatabaseResult<()> {
        validation::validate_subscription_write(subscription)?;

        let sql = format!(
            r"
            UPDATE {table}
            SET service_name = $1, price = $2, user_id = $3, start_date = $4, end_date = $5
            WHERE id = $6
            ",
            table = tables::SUBSCRIPTIONS
        );
        let result = sqlx::query(&sql)
            .bind(&subscription.service_name)
            .bind(subscription.price)
            .bind(subscription.user_id.to_string())
            .bind(subscription.start_date.to_timestamp())
            .bind(subscription.end_date.map(|end_date| end_date.to_timestamp()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        validation::ensure_subscription_affected(result.rows_affected(), id)
    }

    async fn delete_subscription(&self, id: i64) -> DatabaseResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", tables::SUBSCRIPTIONS);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await?;

        validation::ensure_subscription_affected(result.rows_affected(), id)
    }

    async fn calculate_total_cost(&self, query: &CostQuery) -> DatabaseResult<i64> {
        let (sql, params) = CostQueryBuilder::from_query(query).build();
        debug!(
            db.operation = "sum",
            db.table = tables::SUBSCRIPTIONS,
            db.statement = %sql,
            "Calculating total cost"
        );

        let row = params
            .into_iter()
            .fold(sqlx::query(&sql), |statement, param| param.bind_sqlite(statement))
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("total")?)
    }
}
