//! Cartridge Client - HTTP client for the cartridge accounting API
//!
//! Typed endpoints, the local session guard, list controllers shared by the
//! resource pages, delete confirmations and the spreadsheet export trigger.

pub mod api;
pub mod auth;
pub mod config;
pub mod confirm;
pub mod error;
pub mod export;
pub mod http;
pub mod listing;
pub mod query;
pub mod session;

pub use api::ApiClient;
pub use auth::Authenticator;
pub use config::ClientConfig;
pub use confirm::{DeleteConfirmation, DeleteState};
pub use error::{ClientError, ClientResult};
pub use export::ExportRequest;
pub use http::{HttpClient, NetworkHttpClient};
pub use listing::{ListController, ListFilter, ListResource, Mutation};
pub use session::{GuardDecision, SessionContext, SessionGuard, TokenState};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, RegisterRequest};
pub use shared::{ErrorCode, Page};
