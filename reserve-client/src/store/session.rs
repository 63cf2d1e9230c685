//! SessionStore - staff authentication state
//!
//! The only client state that survives a reload. The authentication subset
//! (`is_authenticated`, `user`, `token`, `remember_me`) is written to a JSON
//! file after every mutation; loading/busy flags and errors stay in memory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::client::User;
use thiserror::Error;
use tokio::sync::broadcast;

use super::{Store, StoreChange, StoreSlice};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    // Authentication
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub token: Option<String>,

    // UI
    pub is_login_modal_visible: bool,
    pub remember_me: bool,

    // Loading
    pub is_logging_in: bool,
    pub is_logging_out: bool,
    pub is_validating_token: bool,

    // Errors
    pub login_error: Option<String>,
}

/// Persisted subset of [`SessionState`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub token: Option<String>,
    pub remember_me: bool,
}

impl From<&SessionState> for PersistedSession {
    fn from(s: &SessionState) -> Self {
        Self {
            is_authenticated: s.is_authenticated,
            user: s.user.clone(),
            token: s.token.clone(),
            remember_me: s.remember_me,
        }
    }
}

impl PersistedSession {
    pub fn load(path: &Path) -> Result<Option<Self>, SessionError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn into_state(self) -> SessionState {
        SessionState {
            is_authenticated: self.is_authenticated,
            user: self.user,
            token: self.token,
            remember_me: self.remember_me,
            ..SessionState::default()
        }
    }
}

#[derive(Debug)]
pub struct SessionStore {
    inner: Store<SessionState>,
    path: Option<PathBuf>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl SessionStore {
    /// A session that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            inner: Store::new(StoreSlice::Session, SessionState::default()),
            path: None,
        }
    }

    /// Restore the session persisted at `path` (if any) and keep it in sync
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let state = PersistedSession::load(&path)?
            .map(PersistedSession::into_state)
            .unwrap_or_default();
        tracing::debug!(path = %path.display(), authenticated = state.is_authenticated, "Session loaded");
        Ok(Self {
            inner: Store::new(StoreSlice::Session, state),
            path: Some(path),
        })
    }

    pub(crate) fn attach_upstream(self, upstream: broadcast::Sender<StoreChange>) -> Self {
        Self {
            inner: self.inner.with_upstream(upstream),
            path: self.path,
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.inner.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read(|s| s.is_authenticated)
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read(|s| s.token.clone())
    }

    /// Apply a mutation and persist the authentication subset
    fn update(&self, action: &'static str, f: impl FnOnce(&mut SessionState)) {
        let persisted = self.inner.update(action, |s| {
            f(&mut *s);
            PersistedSession::from(&*s)
        });
        if let Some(path) = &self.path {
            if let Err(e) = persisted.save(path) {
                tracing::error!(path = %path.display(), error = %e, "Failed to persist session");
            }
        }
    }

    // ========== Authentication ==========

    pub fn login(&self, user: User, token: impl Into<String>) {
        let token = token.into();
        self.update("login", |s| {
            s.is_authenticated = true;
            s.user = Some(user);
            s.token = Some(token);
            s.login_error = None;
        });
    }

    pub fn logout(&self) {
        self.update("logout", |s| {
            s.is_authenticated = false;
            s.user = None;
            s.token = None;
            s.login_error = None;
        });
    }

    pub fn set_user(&self, user: Option<User>) {
        self.update("setUser", |s| s.user = user);
    }

    pub fn set_token(&self, token: Option<String>) {
        self.update("setToken", |s| s.token = token);
    }

    // ========== UI ==========

    pub fn set_login_modal_visible(&self, visible: bool) {
        self.update("setIsLoginModalVisible", |s| s.is_login_modal_visible = visible);
    }

    pub fn set_remember_me(&self, remember: bool) {
        self.update("setRememberMe", |s| s.remember_me = remember);
    }

    // ========== Loading ==========

    pub fn set_logging_in(&self, loading: bool) {
        self.update("setIsLoggingIn", |s| s.is_logging_in = loading);
    }

    pub fn set_logging_out(&self, loading: bool) {
        self.update("setIsLoggingOut", |s| s.is_logging_out = loading);
    }

    pub fn set_validating_token(&self, validating: bool) {
        self.update("setIsValidatingToken", |s| s.is_validating_token = validating);
    }

    // ========== Errors ==========

    pub fn set_login_error(&self, error: impl Into<String>) {
        let error = error.into();
        self.update("setLoginError", |s| s.login_error = Some(error));
    }

    pub fn clear_login_error(&self) {
        self.update("clearLoginError", |s| s.login_error = None);
    }

    // ========== Reset ==========

    pub fn reset(&self) {
        self.update("resetLoginState", |s| *s = SessionState::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff() -> User {
        User {
            id: "u-1".into(),
            username: "host".into(),
            email: "host@example.com".into(),
            role: "staff".into(),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn test_login_logout() {
        let store = SessionStore::in_memory();
        store.set_login_error("bad password");
        store.login(staff(), "jwt");

        let state = store.snapshot();
        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("jwt"));
        assert!(state.login_error.is_none());

        store.logout();
        let state = store.snapshot();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(state.token.is_none());
    }

    #[test]
    fn test_persisted_subset_excludes_transient_flags() {
        let state = SessionState {
            is_authenticated: true,
            token: Some("jwt".into()),
            is_logging_in: true,
            login_error: Some("x".into()),
            remember_me: true,
            ..SessionState::default()
        };
        let restored = PersistedSession::from(&state).into_state();
        assert!(restored.is_authenticated);
        assert!(restored.remember_me);
        assert!(!restored.is_logging_in);
        assert!(restored.login_error.is_none());
    }
}
