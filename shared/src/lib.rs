//! Shared types for the cartridge accounting console
//!
//! Wire-level DTOs exchanged with the remote REST API, the closed
//! enumerations they carry, the page envelope and the structured error
//! codes used to classify API failures.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiErrorBody, ErrorCode};
pub use models::Page;
