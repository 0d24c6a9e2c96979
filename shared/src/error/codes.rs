//! Error codes for the cartridge accounting API
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Location errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker the backend puts in the message of a refused location delete.
const LOCATION_HAS_CARTRIDGES_MARKER: &str = "связанных картриджей";

/// Unified error code enum
///
/// The backend only replies with an HTTP status and a free-text message;
/// [`ErrorCode::classify`] turns that pair into a code once, at the API
/// boundary, so callers can match on variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Location ====================
    /// Location still has cartridges attached and cannot be deleted
    LocationHasCartridges = 4002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Whether this code marks a referential conflict that blocks a delete
    #[inline]
    pub const fn is_delete_blocker(&self) -> bool {
        matches!(self, ErrorCode::LocationHasCartridges)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Location
            ErrorCode::LocationHasCartridges => "Location has associated cartridges",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }

    /// Classify an API failure from its HTTP status and message.
    ///
    /// This is the only place that inspects message text.
    pub fn classify(status: u16, message: &str) -> Self {
        if message.contains(LOCATION_HAS_CARTRIDGES_MARKER) {
            return ErrorCode::LocationHasCartridges;
        }

        match status {
            400 | 422 => ErrorCode::ValidationFailed,
            401 => ErrorCode::NotAuthenticated,
            403 => ErrorCode::PermissionDenied,
            404 => ErrorCode::NotFound,
            409 => ErrorCode::AlreadyExists,
            408 | 504 => ErrorCode::TimeoutError,
            500..=599 => ErrorCode::InternalError,
            _ => ErrorCode::Unknown,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Location
            4002 => Ok(ErrorCode::LocationHasCartridges),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::LocationHasCartridges.code(), 4002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::LocationHasCartridges).unwrap();
        assert_eq!(json, "4002");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("3").unwrap();
        assert_eq!(code, ErrorCode::NotFound);

        let code: ErrorCode = serde_json::from_str("4002").unwrap();
        assert_eq!(code, ErrorCode::LocationHasCartridges);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
        assert_eq!(ErrorCode::try_from(3001), Err(InvalidErrorCode(3001)));
    }

    #[test]
    fn test_classify_location_conflict_by_message() {
        let message = "Невозможно удалить объект \"Склад\", так как он имеет 3 связанных картриджей. \
                       Сначала переместите или удалите все картриджи.";
        assert_eq!(
            ErrorCode::classify(500, message),
            ErrorCode::LocationHasCartridges
        );
        assert_eq!(
            ErrorCode::classify(409, message),
            ErrorCode::LocationHasCartridges
        );
        assert!(ErrorCode::LocationHasCartridges.is_delete_blocker());
    }

    #[test]
    fn test_classify_by_status() {
        assert_eq!(ErrorCode::classify(400, ""), ErrorCode::ValidationFailed);
        assert_eq!(
            ErrorCode::classify(401, "Неверный логин или пароль"),
            ErrorCode::NotAuthenticated
        );
        assert_eq!(ErrorCode::classify(403, ""), ErrorCode::PermissionDenied);
        assert_eq!(ErrorCode::classify(404, ""), ErrorCode::NotFound);
        assert_eq!(ErrorCode::classify(409, ""), ErrorCode::AlreadyExists);
        assert_eq!(ErrorCode::classify(504, ""), ErrorCode::TimeoutError);
        assert_eq!(ErrorCode::classify(503, ""), ErrorCode::InternalError);
        assert_eq!(ErrorCode::classify(418, ""), ErrorCode::Unknown);
        assert!(!ErrorCode::NotFound.is_delete_blocker());
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
