// ABOUTME: Error types re-exported from subscription-core for unified type identity
// ABOUTME: AppError, ErrorCode, and DatabaseError are the same types across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use subscription_core::errors::*;
