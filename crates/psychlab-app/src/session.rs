//! The local login marker and where it is kept.
//!
//! There is no server-side verification: logging in stores the email and
//! nothing else.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::{info, warn};

use psychlab_core::models::session::Session;

use crate::config::{config_dir, write_private};

/// Persistence for the session marker. Injected into [`SessionManager`].
pub trait SessionStore: Send + Sync {
    fn load(&self) -> eyre::Result<Option<Session>>;
    fn save(&self, session: &Session) -> eyre::Result<()>;
    fn clear(&self) -> eyre::Result<()>;
}

/// A single JSON file holding `{ "email": ..., "isAuthenticated": true }`.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `session.json` next to the config file.
    pub fn default_location() -> eyre::Result<Self> {
        Ok(Self::new(config_dir()?.join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> eyre::Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| eyre::eyre!("failed to read session at {}: {e}", self.path.display()))?;

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) if session.is_authenticated => Ok(Some(session)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> eyre::Result<()> {
        let json = serde_json::to_vec(session)?;
        write_private(&self.path, &json)
    }

    fn clear(&self) -> eyre::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-process store, for tests and ephemeral runs.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> eyre::Result<Option<Session>> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, session: &Session) -> eyre::Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> eyre::Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("email and password are required")]
    MissingCredentials,

    #[error("session store error: {0:#}")]
    Store(eyre::Report),
}

impl From<eyre::Report> for SessionError {
    fn from(e: eyre::Report) -> Self {
        SessionError::Store(e)
    }
}

/// The explicit session object owned by the composition root.
pub struct SessionManager {
    store: Box<dyn SessionStore>,
    current: Option<Session>,
}

impl SessionManager {
    /// Read the persisted session once. A failing store starts logged out.
    pub fn restore(store: Box<dyn SessionStore>) -> Self {
        let current = match store.load() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "could not restore session");
                None
            }
        };
        if let Some(session) = &current {
            info!(email = %session.email, "restored session");
        }
        Self { store, current }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<Session, SessionError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(SessionError::MissingCredentials);
        }

        let session = Session::authenticated(email);
        self.store.save(&session)?;
        self.current = Some(session.clone());
        info!(email, "logged in");
        Ok(session)
    }

    /// Account creation is the same stub as login; the name is not kept.
    pub fn signup(
        &mut self,
        _name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, SessionError> {
        self.login(email, password)
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.clear()?;
        if let Some(session) = self.current.take() {
            info!(email = %session.email, "logged out");
        }
        Ok(())
    }
}
