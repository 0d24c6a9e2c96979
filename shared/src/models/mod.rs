//! Data models
//!
//! Client-visible shapes of the REST API. All JSON is camelCase and all
//! IDs are UUID strings issued by the server.

pub mod cartridge;
pub mod location;
pub mod operation;
pub mod page;
pub mod user;

// Re-exports
pub use cartridge::*;
pub use location::*;
pub use operation::*;
pub use page::*;
pub use user::*;

use thiserror::Error;

/// Error parsing a closed enumeration from its wire value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
