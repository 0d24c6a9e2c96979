//! Location Model

use serde::{Deserialize, Serialize};

/// Physical site holding cartridges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub cabinet: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub active: bool,
    /// Server-computed, read-only
    #[serde(default)]
    pub cartridge_count: u32,
}

impl Location {
    pub fn to_request(&self) -> LocationRequest {
        LocationRequest {
            name: self.name.clone(),
            address: self.address.clone(),
            cabinet: self.cabinet.clone(),
            contact_person: self.contact_person.clone(),
            contact_phone: self.contact_phone.clone(),
            description: self.description.clone(),
            active: Some(self.active),
        }
    }
}

/// Create/update location payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabinet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl LocationRequest {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            cabinet: None,
            contact_person: None,
            contact_phone: None,
            description: None,
            active: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cartridge_count_defaults_to_zero() {
        let json = r#"{"id":"l1","name":"Склад","address":"ул. Ленина, 1","active":true}"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.cartridge_count, 0);
        assert!(loc.active);
    }

    #[test]
    fn test_request_from_location() {
        let json = r#"{"id":"l1","name":"Склад","address":"ул. Ленина, 1","contactPhone":"+7 900","active":false,"cartridgeCount":4}"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        let req = loc.to_request();
        assert_eq!(req.contact_phone.as_deref(), Some("+7 900"));
        assert_eq!(req.active, Some(false));

        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("cartridgeCount").is_none());
        assert!(body.get("cabinet").is_none());
    }
}
