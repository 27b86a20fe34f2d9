//! Durable session store.
//!
//! One fixed slot on disk holds the serialized session, so a restart does
//! not log the admin out. Loading is self-healing: expired or unreadable
//! payloads are deleted and reported as "no session" rather than surfaced
//! as errors.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;

use crate::errors::AppError;
use crate::models::Session;

/// File-backed single-slot session store.
#[derive(Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist the session, replacing any previous one.
    pub fn save(&self, session: &Session) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Internal(format!("Failed to create session dir: {}", e)))?;
        }
        let json = serde_json::to_vec(session)?;
        fs::write(&self.path, json)
            .map_err(|e| AppError::Internal(format!("Failed to persist session: {}", e)))
    }

    /// Load the stored session, if one exists and is still valid.
    ///
    /// Expired and corrupt payloads are cleared as a side effect.
    pub fn load(&self) -> Option<Session> {
        let bytes = fs::read(&self.path).ok()?;

        let session: Session = match serde_json::from_slice(&bytes) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding unreadable session data: {}", e);
                self.clear();
                return None;
            }
        };

        if !session.is_valid(Utc::now().timestamp_millis()) {
            tracing::debug!("Stored session for {} has expired", session.user.email);
            self.clear();
            return None;
        }

        Some(session)
    }

    /// Remove the stored session. Never fails; a missing file is fine.
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}
