//! Common API types

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub mod validated_json;

pub use validated_json::ValidatedJson;

/// Standard API response envelope.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler's return type
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

impl From<DomainError> for ApiResponse<()> {
    fn from(e: DomainError) -> Self {
        ApiResponse::error(e.to_string())
    }
}

/// Map a domain failure to a status code and envelope.
pub fn api_error(e: DomainError) -> ApiError {
    let status = if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("Request failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(e.into()))
}

/// Error half of the station endpoint: status plus a plain-text message
pub type PlainError = (StatusCode, String);

/// Like [`api_error`], without the envelope.
pub fn plain_error(e: DomainError) -> PlainError {
    let status = if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("Request failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, e.to_string())
}
