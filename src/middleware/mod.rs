// ABOUTME: HTTP middleware for request tracing and correlation ids
// ABOUTME: Provides request ID generation and per-request spans for structured logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Request id assignment and propagation
pub mod request_id;
/// Per-request tracing spans
pub mod tracing;

pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use self::tracing::{create_request_span, http_trace_layer, HttpTraceLayer};
