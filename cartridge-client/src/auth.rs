//! Login, registration and logout flows

use shared::client::RegisterRequest;

use crate::api::ApiClient;
use crate::session::{DEFAULT_LANDING, SessionContext};
use crate::{ClientError, ClientResult};

/// Alert shown when login fails without a server message
pub const LOGIN_FAILED: &str = "Ошибка авторизации";
/// Alert shown when registration fails without a server message
pub const REGISTER_FAILED: &str = "Ошибка регистрации";

/// Ties the API client to the session context
#[derive(Debug, Clone)]
pub struct Authenticator {
    api: ApiClient,
    session: SessionContext,
}

impl Authenticator {
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    /// Log in and store the session.
    ///
    /// Returns where to navigate next: the path remembered by the guard
    /// (cleared on read), or the dashboard.
    pub async fn login(&self, username: &str, password: &str, remember: bool) -> ClientResult<String> {
        let resp = self.api.auth().login(username, password).await?;
        if resp.token.is_empty() {
            return Err(ClientError::InvalidResponse("login response without token".into()));
        }

        self.session.set_session(&resp.token, &resp.role, remember)?;
        self.api.set_token(Some(resp.token));

        let target = self
            .session
            .take_redirect()?
            .unwrap_or_else(|| DEFAULT_LANDING.to_string());
        tracing::info!(username = %username, role = %resp.role, target = %target, "logged in");
        Ok(target)
    }

    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<()> {
        self.api.auth().register(req).await?;
        tracing::info!(username = %req.username, "registered");
        Ok(())
    }

    /// Forget the session locally; the API has no logout endpoint
    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear()?;
        self.api.set_token(None);
        tracing::info!("logged out");
        Ok(())
    }
}
