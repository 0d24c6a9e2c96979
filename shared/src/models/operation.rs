//! Operation Model
//!
//! Operations are append-only stock movements; the client never edits or
//! deletes one.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ParseEnumError;

/// Stock movement kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Receipt,
    Issue,
    Return,
    Refill,
    Disposal,
    Transfer,
}

impl OperationType {
    pub const ALL: [OperationType; 6] = [
        OperationType::Receipt,
        OperationType::Issue,
        OperationType::Return,
        OperationType::Refill,
        OperationType::Disposal,
        OperationType::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Receipt => "RECEIPT",
            OperationType::Issue => "ISSUE",
            OperationType::Return => "RETURN",
            OperationType::Refill => "REFILL",
            OperationType::Disposal => "DISPOSAL",
            OperationType::Transfer => "TRANSFER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OperationType::Receipt => "Поступление",
            OperationType::Issue => "Выдача",
            OperationType::Return => "Возврат",
            OperationType::Refill => "Заправка",
            OperationType::Disposal => "Списание",
            OperationType::Transfer => "Перемещение",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationType::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("operation type", s))
    }
}

/// Recorded stock movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: String,
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    pub count: i32,
    pub cartridge_id: String,
    #[serde(default)]
    pub cartridge_model: Option<String>,
    #[serde(default)]
    pub cartridge_serial_number: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default, alias = "performedById")]
    pub performed_by: Option<String>,
    #[serde(default, alias = "performedByUsername")]
    pub performed_by_name: Option<String>,
    #[serde(default)]
    pub operation_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create operation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    pub count: i32,
    pub cartridge_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
