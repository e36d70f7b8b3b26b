//! Access to the signed-in user persisted by the login flow
//!
//! The session file has the shape `{"user": {...}}`. This crate only reads
//! it; the value is handed to the editor explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::CurrentUser;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to read session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    user: Option<CurrentUser>,
}

/// File-backed store for the current user
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current user. A missing file means nobody is signed in.
    pub fn load(&self) -> Result<Option<CurrentUser>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No session file at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let session: SessionFile =
            serde_json::from_str(&raw).map_err(|source| SessionError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let Some(user) = session.user else {
            return Ok(None);
        };

        if user.token.is_empty() {
            warn!("Session for {} has an empty token", user.username);
            return Ok(None);
        }

        debug!("Loaded session for {}", user.username);
        Ok(Some(user))
    }
}
