//! Session context: the token/role pair and the post-login redirect

use std::path::PathBuf;
use std::sync::Arc;

use super::store::{FileStore, KeyValueStore, MemoryStore, StoreError};

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const REDIRECT_KEY: &str = "redirectPath";

/// Filename of the durable tier inside the session directory
pub const SESSION_FILE: &str = "session.json";

/// Session state shared by the guard, the login flow and the API client
///
/// Reads look at the durable tier first, then the ephemeral one.
#[derive(Clone)]
pub struct SessionContext {
    durable: Arc<dyn KeyValueStore>,
    ephemeral: Arc<dyn KeyValueStore>,
}

impl SessionContext {
    pub fn new(durable: Arc<dyn KeyValueStore>, ephemeral: Arc<dyn KeyValueStore>) -> Self {
        Self { durable, ephemeral }
    }

    /// Durable tier in `<dir>/session.json`, in-memory ephemeral tier
    pub fn with_session_dir(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let durable = FileStore::open(dir, SESSION_FILE)?;
        Ok(Self::new(Arc::new(durable), Arc::new(MemoryStore::new())))
    }

    /// Both tiers in memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// First non-empty value, durable tier before ephemeral
    fn lookup(&self, key: &str) -> Option<String> {
        let non_empty = |store: &Arc<dyn KeyValueStore>| store.get(key).filter(|v| !v.is_empty());
        non_empty(&self.durable).or_else(|| non_empty(&self.ephemeral))
    }

    pub fn token(&self) -> Option<String> {
        self.lookup(TOKEN_KEY)
    }

    pub fn role(&self) -> Option<String> {
        self.lookup(ROLE_KEY)
    }

    /// Store the session in the durable tier if `remember`, else the ephemeral one
    pub fn set_session(&self, token: &str, role: &str, remember: bool) -> Result<(), StoreError> {
        let store = if remember { &self.durable } else { &self.ephemeral };
        store.set(TOKEN_KEY, token)?;
        store.set(ROLE_KEY, role)?;
        tracing::debug!(remember, "session stored");
        Ok(())
    }

    /// Remove token and role from both tiers
    pub fn clear(&self) -> Result<(), StoreError> {
        for store in [&self.durable, &self.ephemeral] {
            store.remove(TOKEN_KEY)?;
            store.remove(ROLE_KEY)?;
        }
        Ok(())
    }

    pub fn remember_redirect(&self, path: &str) -> Result<(), StoreError> {
        self.durable.set(REDIRECT_KEY, path)
    }

    pub fn redirect(&self) -> Option<String> {
        self.durable.get(REDIRECT_KEY).filter(|v| !v.is_empty())
    }

    /// Read and clear the stored redirect path
    pub fn take_redirect(&self) -> Result<Option<String>, StoreError> {
        let path = self.redirect();
        if path.is_some() {
            self.durable.remove(REDIRECT_KEY)?;
        }
        Ok(path)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("has_token", &self.token().is_some())
            .field("role", &self.role())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remember_selects_tier() {
        let durable = Arc::new(MemoryStore::new());
        let ephemeral = Arc::new(MemoryStore::new());
        let ctx = SessionContext::new(durable.clone(), ephemeral.clone());

        ctx.set_session("t1", "ADMIN", false).unwrap();
        assert!(durable.get(TOKEN_KEY).is_none());
        assert_eq!(ephemeral.get(TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(ctx.token().as_deref(), Some("t1"));

        ctx.set_session("t2", "OBJECT_USER", true).unwrap();
        assert_eq!(durable.get(TOKEN_KEY).as_deref(), Some("t2"));
        // durable tier wins
        assert_eq!(ctx.token().as_deref(), Some("t2"));
        assert_eq!(ctx.role().as_deref(), Some("OBJECT_USER"));
    }

    #[test]
    fn test_empty_durable_value_falls_through() {
        let durable = Arc::new(MemoryStore::new());
        let ctx = SessionContext::new(durable.clone(), Arc::new(MemoryStore::new()));
        durable.set(TOKEN_KEY, "").unwrap();
        durable.set(ROLE_KEY, "").unwrap();
        assert!(ctx.token().is_none());

        ctx.set_session("t1", "ADMIN", false).unwrap();
        assert_eq!(ctx.token().as_deref(), Some("t1"));
        assert_eq!(ctx.role().as_deref(), Some("ADMIN"));
    }

    #[test]
    fn test_clear_purges_both_tiers() {
        let ctx = SessionContext::in_memory();
        ctx.set_session("t1", "ADMIN", true).unwrap();
        ctx.set_session("t2", "ADMIN", false).unwrap();
        ctx.remember_redirect("/users").unwrap();

        ctx.clear().unwrap();
        assert!(ctx.token().is_none());
        assert!(ctx.role().is_none());
        assert_eq!(ctx.redirect().as_deref(), Some("/users"));
    }

    #[test]
    fn test_take_redirect_clears() {
        let ctx = SessionContext::in_memory();
        assert_eq!(ctx.take_redirect().unwrap(), None);
        ctx.remember_redirect("/operations").unwrap();
        assert_eq!(ctx.take_redirect().unwrap().as_deref(), Some("/operations"));
        assert_eq!(ctx.take_redirect().unwrap(), None);
    }

    #[test]
    fn test_session_dir_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = SessionContext::with_session_dir(temp_dir.path()).unwrap();
        ctx.set_session("durable", "ADMIN", true).unwrap();

        let restarted = SessionContext::with_session_dir(temp_dir.path()).unwrap();
        assert_eq!(restarted.token().as_deref(), Some("durable"));

        let ctx = SessionContext::with_session_dir(temp_dir.path()).unwrap();
        ctx.clear().unwrap();
        ctx.set_session("ephemeral", "ADMIN", false).unwrap();
        let restarted = SessionContext::with_session_dir(temp_dir.path()).unwrap();
        assert!(restarted.token().is_none());
    }
}
