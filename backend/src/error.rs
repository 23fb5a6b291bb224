use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use studio_shared::ValidationError;
use thiserror::Error;

/// Errors a handler can answer with. Rendered as `{"error": ...}` JSON.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed request: {}", .0.body_text())]
    Malformed(#[from] JsonRejection),

    #[error("Too many requests, please try again in a minute")]
    RateLimited,

    #[error("Could not deliver your message right now")]
    Delivery(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Malformed(rejection) => rejection.status(),
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Delivery(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(err) => json!({
                "error": self.to_string(),
                "fields": err.missing,
            }),
            ApiError::Delivery(detail) => {
                tracing::error!("Contact delivery failed: {}", detail);
                json!({"error": self.to_string()})
            }
            ApiError::Malformed(_) | ApiError::RateLimited => json!({"error": self.to_string()}),
        };
        (status, Json(body)).into_response()
    }
}
