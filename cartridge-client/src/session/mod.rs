//! Session handling: stores, token decoding, guard

mod context;
mod guard;
mod store;
mod token;

pub use context::{REDIRECT_KEY, ROLE_KEY, SESSION_FILE, SessionContext, TOKEN_KEY};
pub use guard::{DEFAULT_LANDING, GuardDecision, LOGIN_PATH, SessionGuard, TokenState};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use token::{TokenClaims, TokenError, decode_claims};
