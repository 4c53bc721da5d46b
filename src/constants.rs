// ABOUTME: Application constants re-exported from subscription-core
// ABOUTME: Limits, messages, endpoints, and configuration defaults grouped by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use subscription_core::constants::*;
