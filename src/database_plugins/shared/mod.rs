// ABOUTME: Shared database logic for PostgreSQL and SQLite implementations
// ABOUTME: Query building, row mapping, and write-result checks used by both backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Typed predicate builder for the cost aggregation query
pub mod builders;

/// Model ↔ SQL row conversion helpers
pub mod mappers;

/// Write-result and key validation shared by both backends
pub mod validation;
