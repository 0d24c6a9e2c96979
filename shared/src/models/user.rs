//! User Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ParseEnumError;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    WarehouseManager,
    ObjectUser,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::WarehouseManager, Role::ObjectUser];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::WarehouseManager => "WAREHOUSE_MANAGER",
            Role::ObjectUser => "OBJECT_USER",
        }
    }

    /// Display label shown to operators
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Администратор",
            Role::WarehouseManager => "Заведующий складом",
            Role::ObjectUser => "Пользователь объекта",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("role", s))
    }
}

/// Label for a raw role string as stored in the session, falling back to the raw value
pub fn role_label(raw: &str) -> String {
    let trimmed = raw.strip_prefix("ROLE_").unwrap_or(raw);
    trimmed
        .parse::<Role>()
        .map(|r| r.label().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub enabled: bool,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

/// Update user payload; absent fields are left unchanged by the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.role.is_none()
            && self.enabled.is_none()
            && self.password.is_none()
    }
}
