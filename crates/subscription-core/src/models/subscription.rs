// ABOUTME: Subscription record, write payload validation, and cost query models
// ABOUTME: Encodes the period-overlap rule used by cost aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{limits, messages};
use crate::dates::MonthYear;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored subscription: one user's paid service over a range of months
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Store-assigned identifier
    pub id: i64,
    /// Name of the subscribed service
    pub service_name: String,
    /// Monthly price in minor currency units
    pub price: i64,
    /// Owning user
    pub user_id: Uuid,
    /// First billed month
    pub start_date: MonthYear,
    /// Last billed month (inclusive); `None` while the subscription is active
    pub end_date: Option<MonthYear>,
}

impl Subscription {
    /// Attach a store-assigned id to a write payload
    #[must_use]
    pub fn from_new(id: i64, new: NewSubscription) -> Self {
        Self {
            id,
            service_name: new.service_name,
            price: new.price,
            user_id: new.user_id,
            start_date: new.start_date,
            end_date: new.end_date,
        }
    }
}

/// Client payload for create and full-replacement update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubscription {
    /// Name of the subscribed service
    pub service_name: String,
    /// Monthly price in minor currency units
    pub price: i64,
    /// Owning user
    pub user_id: Uuid,
    /// First billed month
    pub start_date: MonthYear,
    /// Last billed month (inclusive), omitted or `null` for open-ended
    #[serde(default)]
    pub end_date: Option<MonthYear>,
}

impl NewSubscription {
    /// Check field-level invariants before the record reaches the store
    ///
    /// # Errors
    ///
    /// Returns a 400-class [`AppError`] when the name is blank or too long,
    /// the price is negative, or the end month precedes the start month
    pub fn validate(&self) -> AppResult<()> {
        if self.service_name.trim().is_empty() {
            return Err(AppError::invalid_input("service_name must not be empty"));
        }
        if self.service_name.chars().count() > limits::SERVICE_NAME_MAX_LEN {
            return Err(AppError::out_of_range(format!(
                "service_name must be at most {} characters",
                limits::SERVICE_NAME_MAX_LEN
            )));
        }
        if self.price < 0 {
            return Err(AppError::out_of_range("price must not be negative"));
        }
        if let Some(end_date) = self.end_date {
            if end_date < self.start_date {
                return Err(AppError::out_of_range(format!(
                    "end_date {end_date} is before start_date {}",
                    self.start_date
                )));
            }
        }
        Ok(())
    }
}

/// Body of `POST /calculate`
///
/// Every field is optional at the decoding stage so that a missing period
/// bound produces a specific message instead of a generic decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostCalculationRequest {
    /// Restrict to one service
    #[serde(default)]
    pub service_name: Option<String>,
    /// Restrict to one user
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// First month of the period
    #[serde(default)]
    pub start_date: Option<MonthYear>,
    /// Last month of the period (inclusive)
    #[serde(default)]
    pub end_date: Option<MonthYear>,
}

impl CostCalculationRequest {
    /// Turn the request into a validated query
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` when either bound is absent and
    /// `VALUE_OUT_OF_RANGE` when the period is inverted
    pub fn into_query(self) -> AppResult<CostQuery> {
        let (Some(range_start), Some(range_end)) = (self.start_date, self.end_date) else {
            return Err(AppError::missing_field(messages::PERIOD_BOUNDS_REQUIRED));
        };
        if range_start > range_end {
            return Err(AppError::out_of_range(format!(
                "start_date {range_start} is after end_date {range_end}"
            )));
        }
        Ok(CostQuery {
            user_id: self.user_id,
            service_name: self.service_name,
            range_start,
            range_end,
        })
    }
}

/// Validated filter for summing subscription prices over a period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostQuery {
    /// Only this user's subscriptions; all users when `None`
    pub user_id: Option<Uuid>,
    /// Only this service; all services when `None`
    pub service_name: Option<String>,
    /// First month of the period
    pub range_start: MonthYear,
    /// Last month of the period (inclusive)
    pub range_end: MonthYear,
}

impl CostQuery {
    /// Query over a period with no user or service filter
    #[must_use]
    pub const fn for_period(range_start: MonthYear, range_end: MonthYear) -> Self {
        Self {
            user_id: None,
            service_name: None,
            range_start,
            range_end,
        }
    }

    /// Restrict to one user
    #[must_use]
    pub const fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Restrict to one service
    #[must_use]
    pub fn with_service(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    /// In-memory form of the SQL filter: conjunctive filters plus period overlap
    ///
    /// An absent `end_date` never ends, so only the start bound can exclude it.
    #[must_use]
    pub fn matches(&self, subscription: &Subscription) -> bool {
        let user_matches = self
            .user_id
            .is_none_or(|user_id| user_id == subscription.user_id);
        let service_matches = self
            .service_name
            .as_deref()
            .is_none_or(|name| name == subscription.service_name);
        let overlaps = subscription.start_date <= self.range_end
            && subscription
                .end_date
                .is_none_or(|end_date| end_date >= self.range_start);

        user_matches && service_matches && overlaps
    }
}

/// Response of `POST /calculate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Sum of matching prices; zero when nothing matches
    pub price: i64,
}
