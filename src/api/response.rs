use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    pub status: String,
    pub status_code: u16,
    pub timestamp: String,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

fn envelope<T>(
    label: &str,
    status: StatusCode,
    data: Option<T>,
    message: Option<String>,
    detail: Option<String>,
) -> (StatusCode, Json<ApiResponse<T>>) {
    let meta = ResponseMeta {
        status: label.to_string(),
        status_code: status.as_u16(),
        timestamp: Utc::now().to_rfc3339(),
        message,
        detail,
    };

    (status, Json(ApiResponse { data, meta }))
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    envelope("success", StatusCode::OK, Some(data), None, None)
}

/// Non-fatal problem with the user's input.
pub fn warning<T>(status: StatusCode, message: String) -> (StatusCode, Json<ApiResponse<T>>) {
    envelope("warning", status, None, Some(message), None)
}

pub fn error<T>(status: StatusCode, message: String, detail: Option<String>) -> (StatusCode, Json<ApiResponse<T>>) {
    envelope("error", status, None, Some(message), detail)
}
