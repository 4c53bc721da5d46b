// ABOUTME: Route handlers for the subscription CRUD and cost calculation REST API
// ABOUTME: Decodes path and body input, delegates to the store, and shapes JSON responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Subscription routes
//!
//! Mounted under `/api/v1`. Any decoding failure (malformed JSON, UUID,
//! `MM-YYYY` date, or numeric id) is a 400; a missing record is a 404.

use crate::{
    constants::messages,
    database_plugins::SubscriptionStore,
    errors::{AppError, AppResult},
    logging::AppLogger,
    models::{CostCalculationRequest, CostSummary, NewSubscription},
    resources::ServerResources,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Response for a created subscription
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Store-assigned id
    pub id: i64,
}

/// Acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    /// Human-readable outcome
    pub detail: String,
}

/// Subscription routes implementation
pub struct SubscriptionRoutes;

impl SubscriptionRoutes {
    /// Create all subscription routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/calculate", post(Self::handle_calculate))
            .route("/subscriptions", post(Self::handle_create))
            .route(
                "/subscriptions/:id",
                get(Self::handle_list)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route(
                "/subscriptions/:id/:subscription_id",
                get(Self::handle_get),
            )
            .with_state(resources)
    }

    /// Handle POST /calculate - Sum prices of subscriptions overlapping a period
    async fn handle_calculate(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<CostCalculationRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let query = json_body(payload)?.into_query()?;

        let price = resources.database.calculate_total_cost(&query).await?;

        AppLogger::log_cost_calculation(
            query.user_id.map(|id| id.to_string()).as_deref(),
            query.service_name.as_deref(),
            &format!("{}..{}", query.range_start, query.range_end),
            price,
        );
        Ok((StatusCode::OK, Json(CostSummary { price })).into_response())
    }

    /// Handle GET /subscriptions/:user_id - List a user's subscriptions
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;

        let subscriptions = resources.database.list_subscriptions(user_id).await?;

        Ok((StatusCode::OK, Json(subscriptions)).into_response())
    }

    /// Handle GET /subscriptions/:user_id/:subscription_id - Fetch one subscription
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, subscription_id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let id = parse_subscription_id(&subscription_id)?;

        let subscription = resources.database.get_subscription(user_id, id).await?;

        Ok((StatusCode::OK, Json(subscription)).into_response())
    }

    /// Handle POST /subscriptions - Create a subscription
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<NewSubscription>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let subscription = json_body(payload)?;
        subscription.validate()?;

        let id = resources
            .database
            .insert_subscription(&subscription)
            .await?;

        info!(
            subscription.id = id,
            user.id = %subscription.user_id,
            subscription.service = %subscription.service_name,
            "Subscription created"
        );
        Ok((StatusCode::CREATED, Json(CreatedResponse { id })).into_response())
    }

    /// Handle PUT /subscriptions/:id - Replace a subscription
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        payload: Result<Json<NewSubscription>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = parse_subscription_id(&id)?;
        let subscription = json_body(payload)?;
        subscription.validate()?;

        resources
            .database
            .update_subscription(id, &subscription)
            .await?;

        info!(subscription.id = id, "Subscription updated");
        Ok(StatusCode::ACCEPTED.into_response())
    }

    /// Handle DELETE /subscriptions/:id - Remove a subscription
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_subscription_id(&id)?;

        resources.database.delete_subscription(id).await?;

        info!(subscription.id = id, "Subscription deleted");
        let body = DetailResponse {
            detail: messages::SUBSCRIPTION_DELETED.to_owned(),
        };
        Ok((StatusCode::ACCEPTED, Json(body)).into_response())
    }
}

/// Unwrap a JSON body, turning any extractor rejection into a 400
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}

fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::invalid_format(format!("Invalid user_id: {e}")))
}

fn parse_subscription_id(raw: &str) -> AppResult<i64> {
    raw.parse()
        .map_err(|e| AppError::invalid_format(format!("Invalid subscription id '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_parse_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);
        assert_eq!(
            parse_user_id("not-a-uuid").unwrap_err().code,
            ErrorCode::InvalidFormat
        );
    }

    #[test]
    fn test_parse_subscription_id() {
        assert_eq!(parse_subscription_id("42").unwrap(), 42);
        assert!(parse_subscription_id("forty-two").is_err());
        assert!(parse_subscription_id("").is_err());
    }
}
