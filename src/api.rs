//! HTTP API
//!
//! JSON routes over the order service, plus health, Prometheus metrics and
//! the static frontend served from the configured directory.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::config::Config;
use crate::error::OrderBoardError;
use crate::order::{Order, OrderRequest, OrderView};
use crate::orderbook::{OrderBoard, OrderBoardMetrics};
use crate::AppState;

type ApiResult<T> = std::result::Result<T, OrderBoardError>;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/submit", post(submit_order))
        .route("/orders/cancel/:id", delete(cancel_order))
        .route("/orders/summary", get(order_summary))
        .route("/orders/summary/metrics", get(summary_metrics))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS layer from the configured origins
fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(origins)
}

impl IntoResponse for OrderBoardError {
    fn into_response(self) -> Response {
        let status = match &self {
            OrderBoardError::Validation(_) => StatusCode::BAD_REQUEST,
            OrderBoardError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

async fn submit_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let Json(request) = payload.map_err(|rejection| {
        state.service.metrics().orders_rejected.inc();
        OrderBoardError::Validation(rejection.body_text())
    })?;

    let order = state.service.submit(request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn cancel_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.service.cancel(&id).await?;
    Ok(StatusCode::OK)
}

async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<OrderView>>> {
    Ok(Json(state.service.list().await?))
}

async fn order_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<OrderBoard>> {
    Ok(Json(state.service.summary().await?))
}

async fn summary_metrics(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<OrderBoardMetrics>> {
    Ok(Json(state.service.board_metrics().await?))
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "component": state.config.component_name,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn metrics(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let body = state.service.metrics().render()?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
