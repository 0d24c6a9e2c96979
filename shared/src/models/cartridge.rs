//! Cartridge Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ParseEnumError;

/// Cartridge lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartridgeStatus {
    InStock,
    InUse,
    Refilling,
    Disposed,
}

impl CartridgeStatus {
    pub const ALL: [CartridgeStatus; 4] = [
        CartridgeStatus::InStock,
        CartridgeStatus::InUse,
        CartridgeStatus::Refilling,
        CartridgeStatus::Disposed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CartridgeStatus::InStock => "IN_STOCK",
            CartridgeStatus::InUse => "IN_USE",
            CartridgeStatus::Refilling => "REFILLING",
            CartridgeStatus::Disposed => "DISPOSED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CartridgeStatus::InStock => "На складе",
            CartridgeStatus::InUse => "В использовании",
            CartridgeStatus::Refilling => "На заправке",
            CartridgeStatus::Disposed => "Списан",
        }
    }
}

impl std::fmt::Display for CartridgeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CartridgeStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CartridgeStatus::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("cartridge status", s))
    }
}

/// Cartridge colour; the wire value is the label itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CartridgeColor {
    Black,
    Cyan,
    Magenta,
    Yellow,
    Drum,
    Other,
}

impl CartridgeColor {
    pub const ALL: [CartridgeColor; 6] = [
        CartridgeColor::Black,
        CartridgeColor::Cyan,
        CartridgeColor::Magenta,
        CartridgeColor::Yellow,
        CartridgeColor::Drum,
        CartridgeColor::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CartridgeColor::Black => "Black",
            CartridgeColor::Cyan => "Cyan",
            CartridgeColor::Magenta => "Magenta",
            CartridgeColor::Yellow => "Yellow",
            CartridgeColor::Drum => "Drum",
            CartridgeColor::Other => "Other",
        }
    }

    pub fn label(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for CartridgeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CartridgeColor {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CartridgeColor::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("cartridge color", s))
    }
}

/// Cartridge entity
///
/// `color` stays a free string on the read side: the backend stores it
/// unvalidated, so older rows may carry values outside [`CartridgeColor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cartridge {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub resource_pages: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: CartridgeStatus,
    #[serde(default)]
    pub current_location_id: Option<String>,
    #[serde(default)]
    pub current_location_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub compatible_printers: Option<String>,
}

impl Cartridge {
    /// Parsed colour, if it is one of the known values
    pub fn color(&self) -> Option<CartridgeColor> {
        self.color.as_deref().and_then(|c| c.parse().ok())
    }

    /// Request body carrying this cartridge's editable fields
    pub fn to_request(&self) -> CartridgeRequest {
        CartridgeRequest {
            model: self.model.clone(),
            serial_number: self.serial_number.clone(),
            resource_pages: self.resource_pages,
            description: self.description.clone(),
            status: self.status,
            current_location_id: self.current_location_id.clone(),
            brand: self.brand.clone(),
            part_number: self.part_number.clone(),
            color: self.color(),
            compatible_printers: self.compatible_printers.clone(),
        }
    }
}

/// Create/update cartridge payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartridgeRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_pages: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: CartridgeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<CartridgeColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatible_printers: Option<String>,
}

impl CartridgeRequest {
    pub fn new(model: impl Into<String>, status: CartridgeStatus) -> Self {
        Self {
            model: model.into(),
            serial_number: None,
            resource_pages: None,
            description: None,
            status,
            current_location_id: None,
            brand: None,
            part_number: None,
            color: None,
            compatible_printers: None,
        }
    }
}
