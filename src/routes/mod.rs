// ABOUTME: Route module organization for the subscription service HTTP endpoints
// ABOUTME: Groups route definitions by domain with thin handlers over the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the subscription service
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the subscription store.

/// Health check and readiness routes
pub mod health;
/// Subscription CRUD and cost calculation routes
pub mod subscriptions;

pub use health::HealthRoutes;
pub use subscriptions::SubscriptionRoutes;
