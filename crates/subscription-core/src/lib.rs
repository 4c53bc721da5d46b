// ABOUTME: Core types for the subscription cost service
// ABOUTME: Foundation crate with error handling, month-year dates, models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Subscription Core
//!
//! Foundation crate providing shared types for the subscription cost service.
//! It holds no I/O: the server crate owns HTTP and storage, this crate owns the
//! vocabulary they exchange.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **dates**: `MonthYear`, the `MM-YYYY` calendar value with month precision
//! - **models**: Subscription records, write payloads, and cost queries
//! - **constants**: Limits, messages, and service identifiers

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Month-year calendar values (`MM-YYYY`)
pub mod dates;

/// Subscription domain models and request payloads
pub mod models;

/// Application constants organized by domain
pub mod constants;
