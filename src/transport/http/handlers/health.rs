use crate::transport::http::types::{AppState, HealthBody, STORE_UNREACHABLE};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (store reachable)", body = HealthBody),
        (status = 503, description = "Service is unhealthy (store unreachable)", body = HealthBody)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let probe = match state.books.ping().await {
        Ok(()) => state.books.count().await,
        Err(e) => Err(e),
    };

    match probe {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthBody {
                status: "ok".to_string(),
                books: Some(count),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthBody {
                    status: "unhealthy".to_string(),
                    books: None,
                    error: Some(STORE_UNREACHABLE.to_string()),
                }),
            )
        }
    }
}
