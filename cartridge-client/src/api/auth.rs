//! `/api/auth`

use shared::client::{LoginRequest, LoginResponse, RegisterRequest};

use crate::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};

pub struct AuthApi<'a> {
    http: &'a NetworkHttpClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(http: &'a NetworkHttpClient) -> Self {
        Self { http }
    }

    /// Exchange credentials for a token; the token is not stored here
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.http.post("/api/auth/login", &req).await
    }

    /// Self-registration; the plain-text confirmation is discarded
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<()> {
        let _ = self.http.post_text("/api/auth/register", req).await?;
        Ok(())
    }
}
