//! Console state and command dispatch

use cartridge_client::{ApiClient, Authenticator, SessionContext, SessionGuard};

use crate::cli::Command;
use crate::config::ConsoleConfig;
use crate::pages;
use crate::routes::{Route, ensure_access};

/// Everything a page handler needs
pub struct App {
    pub config: ConsoleConfig,
    pub api: ApiClient,
    pub session: SessionContext,
    pub guard: SessionGuard,
    pub auth: Authenticator,
}

impl App {
    /// Open the session directory and build the API client around its token
    pub fn new(config: ConsoleConfig) -> anyhow::Result<Self> {
        let session = SessionContext::with_session_dir(config.session_dir.clone())?;
        Self::with_session(config, session)
    }

    pub fn with_session(config: ConsoleConfig, session: SessionContext) -> anyhow::Result<Self> {
        let api = config.client_config(session.token()).build_api_client()?;
        let guard = SessionGuard::new(session.clone());
        let auth = Authenticator::new(api.clone(), session.clone());
        Ok(Self {
            config,
            api,
            session,
            guard,
            auth,
        })
    }

    /// Guard, then run the page handler
    pub async fn dispatch(&self, command: Command) -> anyhow::Result<()> {
        if let Some(route) = Route::of(&command) {
            ensure_access(&self.guard, route)?;
        }

        match command {
            Command::Login {
                username,
                password,
                no_remember,
            } => pages::login::login(self, &username, password, !no_remember).await,
            Command::Register(args) => pages::login::register(self, args).await,
            Command::Logout => pages::login::logout(self),
            Command::Dashboard => pages::dashboard::show(self).await,
            Command::Users(cmd) => pages::users::run(self, cmd).await,
            Command::Cartridges(cmd) => pages::cartridges::run(self, cmd).await,
            Command::Locations(cmd) => pages::locations::run(self, cmd).await,
            Command::Operations(cmd) => pages::operations::run(self, cmd).await,
            Command::Export(cmd) => pages::reports::run(self, cmd).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_protected_command_fails_before_any_request() {
        // Nothing listens on this port; a request would fail with a network error instead
        let config = ConsoleConfig {
            api_url: "http://127.0.0.1:9".into(),
            ..ConsoleConfig::default()
        };
        let session = SessionContext::in_memory();
        let app = App::with_session(config, session.clone()).unwrap();

        let err = app.dispatch(Command::Dashboard).await.unwrap_err();
        assert!(err.to_string().contains("Требуется вход"));
        assert_eq!(session.redirect().as_deref(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn test_logout_needs_no_session() {
        let session = SessionContext::in_memory();
        session.set_session("a.b.c", "ADMIN", true).unwrap();
        let app = App::with_session(ConsoleConfig::default(), session.clone()).unwrap();

        app.dispatch(Command::Logout).await.unwrap();
        assert_eq!(session.token(), None);
        assert_eq!(app.api.token(), None);
    }
}
