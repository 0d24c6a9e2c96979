//! Session guard for protected routes
//!
//! Decides locally, without a network round trip, whether the caller holds
//! a usable session. The check is advisory; the backend re-validates every
//! request.

use super::context::SessionContext;
use super::store::StoreError;
use super::token::{TokenClaims, decode_claims};

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_LANDING: &str = "/dashboard";

/// Classification of the stored token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    NoToken,
    MalformedToken,
    ExpiredToken,
    ValidToken(TokenClaims),
}

impl TokenState {
    /// Classify `token` against `now_secs`
    pub fn classify(token: Option<&str>, now_secs: i64) -> Self {
        let Some(token) = token else {
            return TokenState::NoToken;
        };
        match decode_claims(token) {
            Err(_) => TokenState::MalformedToken,
            Ok(claims) if claims.is_expired_at(now_secs) => TokenState::ExpiredToken,
            Ok(claims) => TokenState::ValidToken(claims),
        }
    }
}

/// Guard outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(TokenClaims),
    Redirect { to: &'static str, reason: TokenState },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow(_))
    }
}

/// Session guard
#[derive(Debug, Clone)]
pub struct SessionGuard {
    session: SessionContext,
}

impl SessionGuard {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// Check against the current clock
    pub fn check(&self, path: &str) -> Result<GuardDecision, StoreError> {
        self.check_at(path, shared::util::now_secs())
    }

    /// Check `path` as of `now_secs`.
    ///
    /// Malformed and expired tokens are purged from both tiers. Every
    /// redirect records `path` for after login unless it is the login page.
    pub fn check_at(&self, path: &str, now_secs: i64) -> Result<GuardDecision, StoreError> {
        let token = self.session.token();
        let state = TokenState::classify(token.as_deref(), now_secs);

        match state {
            TokenState::ValidToken(claims) => Ok(GuardDecision::Allow(claims)),
            reason => {
                if matches!(reason, TokenState::MalformedToken | TokenState::ExpiredToken) {
                    self.session.clear()?;
                }
                if path != LOGIN_PATH {
                    self.session.remember_redirect(path)?;
                }
                tracing::info!(path = %path, reason = ?reason, "redirecting to login");
                Ok(GuardDecision::Redirect {
                    to: LOGIN_PATH,
                    reason,
                })
            }
        }
    }
}
