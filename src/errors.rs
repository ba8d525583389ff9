use axum::http::StatusCode;
use thiserror::Error;

/// Failures surfaced by the client side: the router, the views and the
/// services they call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Session(String),

    #[error("failed to load view `{route}`: {reason}")]
    RouteLoad { route: String, reason: String },

    #[error("malformed payload: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn no_session() -> Self {
        Self::Session("no user is currently logged in".to_string())
    }

    pub fn route_load(route: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::RouteLoad {
            route: route.into(),
            reason: reason.to_string(),
        }
    }

    /// Text shown to the user in a view's feedback element.
    pub fn message(&self) -> String {
        match self {
            Self::Network(_) => "Could not reach the server.".to_string(),
            Self::Http { message, .. } => message.clone(),
            Self::Validation(message) | Self::Session(message) => message.clone(),
            Self::RouteLoad { .. } => "Error loading the view.".to_string(),
            Self::Decode(_) => "Unexpected response from the server.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Error returned by the fragment host's handlers.
#[derive(Debug)]
pub struct HostError {
    pub status: StatusCode,
    pub message: String,
}

impl HostError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for HostError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_server_message() {
        let err = ClientError::Http {
            status: 409,
            message: "email already registered".to_string(),
        };
        assert_eq!(err.to_string(), "email already registered");
        assert_eq!(err.message(), "email already registered");
    }

    #[test]
    fn route_load_message_is_generic() {
        let err = ClientError::route_load("board", "HTTP 500");
        assert_eq!(err.message(), "Error loading the view.");
        assert!(err.to_string().contains("board"));
    }
}
