// ABOUTME: Core data models re-exported from subscription-core
// ABOUTME: Re-exports Subscription, NewSubscription, CostQuery, and the MonthYear date value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Subscription`: a stored record with its assigned id
//! - `NewSubscription`: create/update payload, validated before it reaches the store
//! - `CostCalculationRequest` / `CostQuery`: aggregation input before and after validation
//! - `MonthYear`: `MM-YYYY` calendar value with month precision

pub use subscription_core::dates::{MonthYear, MonthYearError};
pub use subscription_core::models::*;
