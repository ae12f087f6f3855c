//! Request and response types for the HTTP surface
//!
//! Wire-level DTOs for the `/ask`, `/stats`, and session endpoints, plus
//! the error wrapper that maps service errors onto HTTP statuses.

use crate::error::FolioError;
use crate::response_mode::ResponseMode;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The user's question
    pub question: String,
    /// Session to continue; omitted means mint a fresh session
    #[serde(default)]
    pub session_id: Option<String>,
    /// Requested response mode; omitted means use the configured default
    #[serde(default)]
    pub mode: Option<String>,
}

/// Body of a successful `POST /ask` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The generated answer
    pub answer: String,
    /// The session the exchange was recorded under
    pub session_id: String,
    /// The mode the answer was generated with
    pub mode_used: ResponseMode,
    /// Exchanges stored in the session after this one
    pub conversation_length: usize,
    /// Wall-clock handling time in seconds
    pub response_time: f64,
}

/// Body of `POST /session/new`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    /// The freshly minted session id
    pub session_id: String,
    /// Human-readable confirmation
    pub message: String,
}

/// One role-tagged message in a session history listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// "user" or "assistant"
    pub role: String,
    /// The message text
    pub content: String,
    /// The mode of the exchange this message belongs to
    pub mode: ResponseMode,
}

/// Body of `GET /session/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHistoryResponse {
    /// The session being listed
    pub session_id: String,
    /// Number of role-tagged messages (two per exchange)
    pub message_count: usize,
    /// Chronological role-tagged history
    pub history: Vec<HistoryEntry>,
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service banner
    pub message: String,
    /// Crate version
    pub version: String,
    /// Model answers are generated with
    pub model: String,
    /// Supported response modes and their descriptions
    pub response_modes: BTreeMap<String, String>,
    /// Endpoint paths by name
    pub endpoints: BTreeMap<String, String>,
}

/// Generic error body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error description
    pub error: String,
}

/// Handler error carrying an HTTP status mapping
///
/// Maps the service error taxonomy onto statuses: invalid input is 400,
/// an unknown session is 404, provider failures surface as 502 after the
/// provider's bounded retries, and anything else is 500.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// The mapped HTTP status
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        let status = match error.downcast_ref::<FolioError>() {
            Some(FolioError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            Some(FolioError::SessionNotFound(_)) => StatusCode::NOT_FOUND,
            Some(FolioError::Provider(_) | FolioError::ProviderUnavailable(_)) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}
