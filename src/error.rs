// Action layer error types and the user-facing error normalizer
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::types::ActionResult;

/// A form field failed a presence, format or range check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError(message.into())
    }
}

/// Everything that can go wrong between a form submit and the remote API
#[derive(Debug, Clone, Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("authentication required")]
    AuthRequired,

    /// Connection refused or host lookup failed
    #[error("cannot connect to server: {0}")]
    Connection(String),

    /// The remote API answered with a non-success status
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The request went out but no response came back
    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ActionError {
    pub fn status(status: u16, message: Option<String>) -> Self {
        ActionError::Status { status, message }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        ActionError::Unexpected(message.into())
    }
}

impl From<reqwest::Error> for ActionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ActionError::Connection(err.to_string())
        } else if err.is_timeout() || err.is_request() {
            ActionError::Network(err.to_string())
        } else if let Some(status) = err.status() {
            ActionError::status(status.as_u16(), None)
        } else {
            ActionError::Unexpected(err.to_string())
        }
    }
}

/// Remote entity an action operates on; drives the 404/409 wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Room,
    Meeting,
    Minutes,
    Profile,
    Search,
}

impl Entity {
    pub fn label(self) -> &'static str {
        match self {
            Entity::User | Entity::Profile => "User",
            Entity::Room => "Room",
            Entity::Meeting => "Meeting",
            Entity::Minutes => "Minutes record",
            Entity::Search => "Search result",
        }
    }

    pub fn not_found_message(self) -> String {
        format!("{} not found.", self.label())
    }

    pub fn id_required_message(self) -> String {
        format!("{} ID is required.", self.label())
    }

    pub fn conflict_message(self) -> String {
        match self {
            Entity::User | Entity::Profile => "A user with this email already exists.".to_string(),
            other => format!(
                "A {} with these details already exists.",
                other.label().to_lowercase()
            ),
        }
    }
}

pub const CONNECTION_FAILED_MESSAGE: &str =
    "Cannot connect to server. Please make sure the API server is running.";
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required. Please log in again.";
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Please log in again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Map a failure to the text shown inline under the form.
///
/// Priority: connection failure, missing auth, HTTP status, missing response,
/// then whatever the error says about itself.
pub fn user_message(error: &ActionError, entity: Entity, operation: &str) -> String {
    match error {
        ActionError::Connection(_) => CONNECTION_FAILED_MESSAGE.to_string(),
        ActionError::AuthRequired => AUTH_REQUIRED_MESSAGE.to_string(),
        ActionError::Status { status, message } => {
            let server_message = message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            match status {
                400 => server_message.unwrap_or_else(|| "Invalid data provided.".to_string()),
                401 => AUTH_FAILED_MESSAGE.to_string(),
                403 => format!("You don't have permission to {}.", operation),
                404 => entity.not_found_message(),
                409 => entity.conflict_message(),
                500 => server_message.unwrap_or_else(|| "Server error occurred.".to_string()),
                other => server_message.unwrap_or_else(|| format!("Server error ({}).", other)),
            }
        }
        ActionError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        ActionError::Validation(err) if !err.0.trim().is_empty() => err.0.clone(),
        ActionError::Unexpected(msg) if !msg.trim().is_empty() => msg.clone(),
        _ => format!("Failed to {}. Please try again.", operation),
    }
}

/// Convert any action failure into a failed `ActionResult`
pub fn handle_api_error<T>(error: &ActionError, entity: Entity, operation: &str) -> ActionResult<T> {
    let message = user_message(error, entity, operation);
    match error {
        ActionError::Validation(_) => tracing::warn!("{} rejected: {}", operation, message),
        _ => tracing::error!("Failed to {}: {} ({})", operation, message, error),
    }
    ActionResult::fail(message)
}

impl ActionError {
    /// HTTP status for a failure that is returned to the caller rather than
    /// folded into an `ActionResult`
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Validation(_) => StatusCode::BAD_REQUEST,
            ActionError::AuthRequired => StatusCode::UNAUTHORIZED,
            ActionError::Connection(_) | ActionError::Network(_) => StatusCode::BAD_GATEWAY,
            ActionError::Status { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ActionError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON error response worded for the entity and operation that failed
    pub fn into_response_for(self, entity: Entity, operation: &str) -> Response {
        let body = json!({
            "success": false,
            "error": user_message(&self, entity, operation),
        });
        (self.status_code(), Json(body)).into_response()
    }
}
