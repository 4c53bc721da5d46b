// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Creates one span per HTTP request and records status and latency on completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::request_id::RequestId;
use axum::http::{Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultOnBodyChunk, DefaultOnEos, DefaultOnFailure, DefaultOnRequest, MakeSpan, OnResponse,
    TraceLayer,
};
use tracing::{info, warn, Level, Span};

/// `TraceLayer` configured with [`RequestSpan`] and [`RecordResponse`]
pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    DefaultOnRequest,
    RecordResponse,
    DefaultOnBodyChunk,
    DefaultOnEos,
    DefaultOnFailure,
>;

/// Build the HTTP tracing layer
#[must_use]
pub fn http_trace_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(RecordResponse)
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}

/// Create a tracing span for HTTP requests
pub fn create_request_span(method: &str, path: &str, request_id: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Span factory reading method, path, and the id assigned by the request-id middleware
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map_or("-", RequestId::as_str);
        create_request_span(request.method().as_str(), request.uri().path(), request_id)
    }
}

/// Records status and latency on the request span and logs completion
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordResponse;

impl<B> OnResponse<B> for RecordResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status = response.status();
        let duration_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        span.record("status_code", status.as_u16());
        span.record("duration_ms", duration_ms);

        if status.is_server_error() {
            warn!(parent: span, status = status.as_u16(), duration_ms, "Request failed");
        } else {
            info!(parent: span, status = status.as_u16(), duration_ms, "Request completed");
        }
    }
}
