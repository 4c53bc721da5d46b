// ABOUTME: Database abstraction layer for the subscription service
// ABOUTME: Plugin architecture for database support with SQLite and PostgreSQL backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::DatabaseResult;
use crate::models::{CostQuery, NewSubscription, Subscription};
use async_trait::async_trait;
use uuid::Uuid;

/// Runtime backend selection
pub mod factory;
/// Logic shared by both backends
pub mod shared;
/// `SQLite` backend
pub mod sqlite;

/// `PostgreSQL` backend
#[cfg(feature = "postgresql")]
pub mod postgres;

/// Core persistence abstraction for subscription records
///
/// Every statement is independent: there are no transactions and nothing is
/// retried. Missing rows surface as `DatabaseError::NotFound`; every other
/// failure is a storage error.
#[async_trait]
pub trait SubscriptionStore: Send + Sync + Clone {
    /// Create the `subscriptions` table and its `user_id` index if missing
    async fn migrate(&self) -> DatabaseResult<()>;

    /// Round-trip a trivial statement to prove the store is reachable
    async fn health_check(&self) -> DatabaseResult<()>;

    /// Insert a record and return its store-assigned id
    async fn insert_subscription(&self, subscription: &NewSubscription) -> DatabaseResult<i64>;

    /// Fetch one record matching both `user_id` and `id`
    async fn get_subscription(&self, user_id: Uuid, id: i64) -> DatabaseResult<Subscription>;

    /// All records owned by `user_id`, ordered by id ascending
    async fn list_subscriptions(&self, user_id: Uuid) -> DatabaseResult<Vec<Subscription>>;

    /// Replace every mutable field of record `id`
    async fn update_subscription(&self, id: i64, subscription: &NewSubscription)
        -> DatabaseResult<()>;

    /// Remove record `id`
    async fn delete_subscription(&self, id: i64) -> DatabaseResult<()>;

    /// Sum of prices of records matching `query`; 0 when nothing matches
    async fn calculate_total_cost(&self, query: &CostQuery) -> DatabaseResult<i64>;
}
