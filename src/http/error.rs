use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub const AUTHENTICATION_ERROR: &str = "AUTHENTICATION_ERROR";
pub const BAD_REQUEST_ERROR: &str = "BAD_REQUEST_ERROR";
pub const NOT_FOUND_ERROR: &str = "NOT_FOUND_ERROR";
pub const INVALID_VPA: &str = "INVALID_VPA";
pub const INVALID_CARD: &str = "INVALID_CARD";

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub description: String,
}

/// Domain failures carry a machine-readable code and map to 4xx. Anything
/// unexpected is logged server-side and rendered as an opaque 500.
#[derive(Debug)]
pub enum ApiError {
    Domain {
        status: StatusCode,
        code: &'static str,
        description: String,
    },
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Domain {
            status: StatusCode::UNAUTHORIZED,
            code: AUTHENTICATION_ERROR,
            description: "Invalid API credentials".to_string(),
        }
    }

    pub fn bad_request(description: &str) -> Self {
        ApiError::Domain {
            status: StatusCode::BAD_REQUEST,
            code: BAD_REQUEST_ERROR,
            description: description.to_string(),
        }
    }

    pub fn not_found(description: &str) -> Self {
        ApiError::Domain {
            status: StatusCode::NOT_FOUND,
            code: NOT_FOUND_ERROR,
            description: description.to_string(),
        }
    }

    pub fn invalid_vpa() -> Self {
        ApiError::Domain {
            status: StatusCode::BAD_REQUEST,
            code: INVALID_VPA,
            description: "Invalid VPA format".to_string(),
        }
    }

    pub fn invalid_card() -> Self {
        ApiError::Domain {
            status: StatusCode::BAD_REQUEST,
            code: INVALID_CARD,
            description: "Invalid card".to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain { status, code, description } => (
                status,
                Json(ErrorEnvelope {
                    error: ErrorPayload {
                        code: code.to_string(),
                        description,
                    },
                }),
            )
                .into_response(),
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "unhandled internal fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Internal Server Error"})),
                )
                    .into_response()
            }
        }
    }
}
