// ABOUTME: Core data models for subscription records and cost queries
// ABOUTME: Shared by the HTTP layer and every storage backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Subscription record, write payload, and cost query types
pub mod subscription;

pub use subscription::{
    CostCalculationRequest, CostQuery, CostSummary, NewSubscription, Subscription,
};
