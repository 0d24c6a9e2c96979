//! Error body returned by the REST API

use serde::{Deserialize, Serialize};

use super::codes::ErrorCode;

/// JSON error body: `{timestamp, status, error, message}`
///
/// Every field is optional; some endpoints send only part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Build a body the way the backend does for a given status
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Some(
                chrono::Local::now()
                    .naive_local()
                    .format("%Y-%m-%dT%H:%M:%S")
                    .to_string(),
            ),
            status: Some(status),
            error: Some(error.into()),
            message: Some(message.into()),
        }
    }

    /// Most specific non-blank text in the body: `message`, then `error`
    pub fn best_message(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    /// Parse a raw response body.
    ///
    /// A JSON object is read as an error body; any other non-blank text
    /// becomes the message.
    pub fn from_text(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('{') {
            return serde_json::from_str::<ApiErrorBody>(trimmed)
                .ok()
                .filter(|b| b.message.is_some() || b.error.is_some() || b.status.is_some());
        }
        Some(Self {
            message: Some(trimmed.to_string()),
            ..Default::default()
        })
    }

    /// Classify this body, using `status` when the body does not carry one
    pub fn code(&self, status: u16) -> ErrorCode {
        ErrorCode::classify(
            self.status.unwrap_or(status),
            self.best_message().unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_body() {
        let text = r#"{"timestamp":"2024-05-01T10:15:30","status":404,"error":"Объект не найден","message":"Объект с ID: 1 не найден"}"#;
        let body = ApiErrorBody::from_text(text).unwrap();
        assert_eq!(body.status, Some(404));
        assert_eq!(body.best_message(), Some("Объект с ID: 1 не найден"));
        assert_eq!(body.code(500), ErrorCode::NotFound);
    }

    #[test]
    fn test_from_plain_text() {
        let body = ApiErrorBody::from_text("Неверный логин или пароль").unwrap();
        assert_eq!(body.best_message(), Some("Неверный логин или пароль"));
        assert_eq!(body.code(401), ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_empty_and_unrelated_json() {
        assert!(ApiErrorBody::from_text("  ").is_none());
        assert!(ApiErrorBody::from_text(r#"{"foo":1}"#).is_none());
    }

    #[test]
    fn test_best_message_falls_back_to_error() {
        let body = ApiErrorBody {
            error: Some("Внутренняя ошибка сервера".into()),
            message: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(body.best_message(), Some("Внутренняя ошибка сервера"));
    }

    #[test]
    fn test_new_sets_fields() {
        let body = ApiErrorBody::new(409, "Conflict", "dup");
        assert_eq!(body.status, Some(409));
        assert!(body.timestamp.is_some());
    }
}
