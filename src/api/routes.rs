use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::models::{DownloadRequest, GenerationRequest, StylesResponse};
use crate::api::{page, response};
use crate::error::GENERATION_FAILED_MESSAGE;
use crate::generator::{DOWNLOAD_FILE_NAME, DOWNLOAD_MIME_TYPE};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/styles", get(styles_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/download", post(download_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler() -> Html<&'static str> {
    Html(page::index_page())
}

async fn styles_handler(State(state): State<AppState>) -> impl IntoResponse {
    response::success(StylesResponse::new(state.generator.news_enabled()))
}

async fn generate_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerationRequest>,
) -> Response {
    let start_time = std::time::Instant::now();
    let timeout = state.config.request_timeout;

    let result = tokio::time::timeout(timeout, state.generator.generate(&req)).await;

    match result {
        Ok(Ok(post)) => {
            info!(topic = %post.topic, elapsed = ?start_time.elapsed(), "blog generated");
            response::success(post).into_response()
        }
        Ok(Err(err)) => err.into_response(),
        Err(_) => {
            warn!(topic = %req.topic, ?timeout, "generation timed out");
            response::error::<()>(
                StatusCode::GATEWAY_TIMEOUT,
                GENERATION_FAILED_MESSAGE.to_string(),
                Some(format!("Request processing timed out after {:?}", timeout)),
            )
            .into_response()
        }
    }
}

/// Hands already-generated content back as a file; nothing is regenerated.
///
/// Takes JSON so line endings survive unchanged.
async fn download_handler(Json(req): Json<DownloadRequest>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, format!("{}; charset=utf-8", DOWNLOAD_MIME_TYPE)),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
            ),
        ],
        req.content,
    )
}
