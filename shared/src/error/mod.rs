//! Error classification for the cartridge accounting API
//!
//! - [`ErrorCode`]: structured codes callers match on
//! - [`ApiErrorBody`]: the JSON (or plain-text) body the backend sends on failure
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Location errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiErrorBody, ErrorCode};
//!
//! let body = ApiErrorBody::from_text("Неверный логин или пароль").unwrap();
//! assert_eq!(body.code(401), ErrorCode::NotAuthenticated);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::ApiErrorBody;
