use api_types::ApiResponse;
use axum::{
    Json, Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use std::sync::Arc;

use crate::{analytics, expenses};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Timezone deciding what "today" is for default dates and the budget month.
    pub timezone: Tz,
}

impl ServerState {
    pub fn new(engine: Engine, timezone: Tz) -> Self {
        Self {
            engine: Arc::new(engine),
            timezone,
        }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    let status = response.status();
    if status.is_server_error() {
        tracing::error!(%method, %path, %status, "request failed");
    } else {
        tracing::debug!(%method, %path, %status, "request handled");
    }
    response
}

async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("ok"))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("not found")),
    )
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route("/api/expenses/{id}", delete(expenses::delete))
        .route("/api/analytics/monthly", get(analytics::monthly))
        .route("/api/analytics/categories", get(analytics::categories))
        .route(
            "/api/analytics/spending-alert",
            get(analytics::spending_alert),
        )
        .route("/health", get(health))
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
