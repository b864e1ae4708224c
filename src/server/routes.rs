//! Router e handlers HTTP.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware as axum_middleware, Json, Router};

use crate::service::FeedService;
use crate::types::requests::FeedQuery;
use crate::types::responses::{ErrorResponse, FeedResponse, HealthResponse};
use crate::FeedError;

use super::middleware::{log_requests, set_request_id};

/// Monta o router da aplicação em torno de um [`FeedService`] compartilhado.
pub fn build_router(service: Arc<FeedService>) -> Router {
    Router::new()
        .route("/feed", get(feed))
        .route("/health", get(health))
        .with_state(service)
        .layer(axum_middleware::from_fn(log_requests))
        .layer(axum_middleware::from_fn(set_request_id))
}

async fn feed(
    State(service): State<Arc<FeedService>>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, FeedError> {
    let response = service.feed(query.user_id()).await?;
    Ok(Json(response))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
