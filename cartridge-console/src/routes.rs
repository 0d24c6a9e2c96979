//! Console routes and their access rules

use std::fmt;

use cartridge_client::session::{GuardDecision, LOGIN_PATH, SessionGuard, TokenState};

use crate::cli::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Users,
    Cartridges,
    Locations,
    Operations,
    Reports,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => LOGIN_PATH,
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Users => "/users",
            Route::Cartridges => "/cartridges",
            Route::Locations => "/locations",
            Route::Operations => "/operations",
            Route::Reports => "/reports",
        }
    }

    /// Everything except the sign-in pages requires a session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    /// Route a command belongs to; `logout` has none
    pub fn of(command: &Command) -> Option<Route> {
        match command {
            Command::Login { .. } => Some(Route::Login),
            Command::Register(_) => Some(Route::Register),
            Command::Logout => None,
            Command::Dashboard => Some(Route::Dashboard),
            Command::Users(_) => Some(Route::Users),
            Command::Cartridges(_) => Some(Route::Cartridges),
            Command::Locations(_) => Some(Route::Locations),
            Command::Operations(_) => Some(Route::Operations),
            Command::Export(_) => Some(Route::Reports),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Operator-facing notice for a redirect to the login page
pub fn redirect_notice(reason: &TokenState) -> &'static str {
    match reason {
        TokenState::NoToken => "Требуется вход в систему. Выполните: cartridge-console login <имя>",
        TokenState::MalformedToken => "Сохранённая сессия повреждена и была сброшена. Войдите снова.",
        TokenState::ExpiredToken => "Срок действия сессии истёк. Войдите снова.",
        TokenState::ValidToken(_) => "Войдите снова.",
    }
}

/// Run the guard for a protected route
///
/// Unprotected routes pass without touching the session.
pub fn ensure_access(guard: &SessionGuard, route: Route) -> anyhow::Result<()> {
    if !route.is_protected() {
        return Ok(());
    }
    match guard.check(route.path())? {
        GuardDecision::Allow(claims) => {
            tracing::debug!(route = %route, user = ?claims.sub, "access granted");
            Ok(())
        }
        GuardDecision::Redirect { to, reason } => {
            tracing::info!(route = %route, redirect = to, "session required");
            anyhow::bail!(redirect_notice(&reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartridge_client::SessionContext;

    #[test]
    fn test_protection_table() {
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        for route in [
            Route::Dashboard,
            Route::Users,
            Route::Cartridges,
            Route::Locations,
            Route::Operations,
            Route::Reports,
        ] {
            assert!(route.is_protected(), "{} must be protected", route);
        }
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::Reports.to_string(), "/reports");
    }

    #[test]
    fn test_protected_route_without_session_is_refused() {
        let session = SessionContext::in_memory();
        let guard = SessionGuard::new(session.clone());

        let err = ensure_access(&guard, Route::Users).unwrap_err();
        assert_eq!(err.to_string(), redirect_notice(&TokenState::NoToken));
        assert_eq!(session.redirect().as_deref(), Some("/users"));
    }

    #[test]
    fn test_login_route_skips_guard() {
        let session = SessionContext::in_memory();
        let guard = SessionGuard::new(session.clone());

        ensure_access(&guard, Route::Login).unwrap();
        assert_eq!(session.redirect(), None);
    }
}
