//! Client error types

use shared::ErrorCode;
use thiserror::Error;

use crate::session::StoreError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("API error {status} ({code}): {message}")]
    Api {
        code: ErrorCode,
        status: u16,
        /// Server-provided text, empty if the body carried none
        message: String,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local file IO failed (export target, session file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No session token is available for an authenticated call
    #[error("Authentication required")]
    NotAuthenticated,

    /// Session store failure
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
}

impl ClientError {
    /// Structured code of an API failure
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            ClientError::NotAuthenticated => Some(ErrorCode::NotAuthenticated),
            ClientError::Http(e) if e.is_timeout() => Some(ErrorCode::TimeoutError),
            ClientError::Http(_) => Some(ErrorCode::NetworkError),
            _ => None,
        }
    }

    /// HTTP status of an API failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure is a referential conflict that blocks a delete
    pub fn is_delete_blocker(&self) -> bool {
        self.code().is_some_and(|c| c.is_delete_blocker())
    }

    /// Text for the inline alert shown to the operator.
    ///
    /// Uses the server's message when it sent one, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ClientError::Api {
            code: ErrorCode::NotAuthenticated,
            status: 401,
            message: "Неверный логин или пароль".into(),
        };
        assert_eq!(err.user_message("Ошибка авторизации"), "Неверный логин или пароль");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ClientError::Api {
            code: ErrorCode::InternalError,
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message("Ошибка авторизации"), "Ошибка авторизации");

        let err = ClientError::InvalidResponse("truncated".into());
        assert_eq!(err.user_message("Ошибка загрузки"), "Ошибка загрузки");
    }

    #[test]
    fn test_delete_blocker() {
        let err = ClientError::Api {
            code: ErrorCode::LocationHasCartridges,
            status: 500,
            message: "… 2 связанных картриджей …".into(),
        };
        assert!(err.is_delete_blocker());
        assert!(!ClientError::NotAuthenticated.is_delete_blocker());
    }
}
