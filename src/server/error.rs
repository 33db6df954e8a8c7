//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::core::check::CheckError;
use crate::core::correction::NormalizeError;
use crate::core::gateway::GatewayError;
use crate::core::util::{PREVIEW_CHARS, bounded_preview};

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// Status plus JSON body returned to the client.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: &str) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.to_string(),
                message: None,
                raw_response: None,
            },
        }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }

    fn with_raw(mut self, raw: &str) -> Self {
        self.body.raw_response = Some(bounded_preview(raw, PREVIEW_CHARS).to_string());
        self
    }

    pub fn bad_request(error: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::bad_request("Invalid request body").with_message(message)
    }

    pub fn verification_failed() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Turnstile verification failed")
    }
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::MissingApiKey => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "OpenRouter API key is not configured",
            ),
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                .with_message(other.to_string()),
        }
    }
}

impl From<CheckError> for ApiError {
    fn from(e: CheckError) -> Self {
        match e {
            CheckError::Gateway(g) => g.into(),
            CheckError::NoContent => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid response from OpenRouter API",
            ),
            CheckError::Normalize { source, raw } => {
                let tag = match source {
                    NormalizeError::Parse(_) => "Failed to parse OpenRouter response as JSON",
                    NormalizeError::Shape(_) => "Invalid response structure",
                };
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, tag)
                    .with_raw(&raw)
                    .with_message(source.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
