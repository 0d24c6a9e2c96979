//! Auth API DTOs
//!
//! Request/response shapes of `/api/auth/*`.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
///
/// `role` is kept as the raw authority string the server returned; it is
/// persisted verbatim next to the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
}

impl LoginResponse {
    /// Parses the returned authority into a [`Role`], tolerating a `ROLE_` prefix.
    pub fn parsed_role(&self) -> Option<Role> {
        let raw = self.role.strip_prefix("ROLE_").unwrap_or(&self.role);
        raw.parse().ok()
    }
}

/// Self-registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}
