// ABOUTME: PostgreSQL implementation of the subscription store
// ABOUTME: Production backend with native UUID and TIMESTAMPTZ columns and a tunable pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `PostgreSQL` database implementation
//!
//! Implements the same interface as the `SQLite` version for server deployments.

use super::shared::builders::CostQueryBuilder;
use super::shared::{mappers, validation};
use super::SubscriptionStore;
use crate::config::PostgresPoolConfig;
use crate::constants::tables;
use crate::errors::{DatabaseError, DatabaseResult};
use crate::logging::AppLogger;
use crate::models::{CostQuery, NewSubscription, Subscription};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

/// `PostgreSQL` database implementation
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    /// Connect a pool sized by `pool_config`
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or rejects the credentials
    pub async fn new(database_url: &str, pool_config: &PostgresPoolConfig) -> DatabaseResult<Self> {
        info!(
            max_connections = pool_config.max_connections,
            min_connections = pool_config.min_connections,
            acquire_timeout_secs = pool_config.acquire_timeout_secs,
            "Connecting PostgreSQL pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(pool_config.max_connections)
            .min_connections(pool_config.min_connections)
            .acquire_timeout(Duration::from_secs(pool_config.acquire_timeout_secs))
            .connect(database_url)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        Ok(Self { pool })
    }

    fn parse_row(row: &PgRow) -> DatabaseResult<Subscription> {
        let user_id: Uuid = row
            .try_get("user_id")
            .map_err(|e| DatabaseError::InvalidData {
                column: "user_id",
                reason: e.to_string(),
            })?;
        mappers::parse_subscription_from_row(row, user_id)
    }
}

#[async_trait]
impl SubscriptionStore for PostgresDatabase {
    async fn migrate(&self) -> DatabaseResult<()> {
        let started = Instant::now();

        let create_table = format!(
            r"
            CREATE TABLE IF NOT EXISTS {table} (
                id BIGSERIAL PRIMARY KEY,
                service_name VARCHAR(256) NOT NULL,
                price BIGINT NOT NULL,
                user_id UUID NOT NULL,
                start_date TIMESTAMPTZ NOT NULL,
                end_date TIMESTAMPTZ
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
            .bind(subscription.user_id)
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
            .bind(user_id)
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
        let rows = sqlx::query(&sql).bind(user_id).fetch_all(&self.pool).await?;

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
            .bind(subscription.user_id)
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
            .fold(sqlx::query(&sql), |statement, param| {
                param.bind_postgres(statement)
            })
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("total")?)
    }
}
