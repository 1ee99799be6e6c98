//! File-based session store
//!
//! Persists the authenticated session as a JSON file in the application data
//! directory. Restart requests are published on a watch channel that the
//! bootstrap observes to start a fresh session.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::watch;
use tracing::{debug, info};

use am_core::device::PublicKey;
use am_core::ports::{SessionStoreError, SessionStorePort};
use am_core::Anchor;

pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// The persisted session: which anchor, authenticated by which key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub anchor: Anchor,
    pub public_key: PublicKey,
    pub created_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(anchor: Anchor, public_key: PublicKey) -> Self {
        Self {
            anchor,
            public_key,
            created_at: Utc::now(),
        }
    }
}

pub struct FileSessionStore {
    path: PathBuf,
    restart_tx: watch::Sender<bool>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (restart_tx, _) = watch::channel(false);
        Self {
            path: path.into(),
            restart_tx,
        }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_SESSION_FILE))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Observe restart requests. The value flips to `true` once a restart
    /// has been requested.
    pub fn subscribe_restart(&self) -> watch::Receiver<bool> {
        self.restart_tx.subscribe()
    }

    pub async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(SessionStoreError::Storage(format!(
                    "read {} failed: {err}",
                    self.path.display()
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| SessionStoreError::Corrupt(format!("Failed to parse session: {e}")))
    }

    pub async fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| SessionStoreError::Storage(format!("Failed to serialize session: {e}")))?;
        self.atomic_write(&json).await?;
        debug!(path = %self.path.display(), anchor = %session.anchor, "session saved");
        Ok(())
    }

    /// Write to a sibling temp file, then rename over the target.
    async fn atomic_write(&self, content: &str) -> Result<(), SessionStoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(|e| {
                SessionStoreError::Storage(format!("create session dir failed: {}: {e}", dir.display()))
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await.map_err(|e| {
            SessionStoreError::Storage(format!("write temp session failed: {}: {e}", tmp_path.display()))
        })?;

        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            SessionStoreError::Storage(format!(
                "rename temp session to target failed: {} -> {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl SessionStorePort for FileSessionStore {
    async fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                info!(path = %self.path.display(), "session file removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionStoreError::Storage(format!(
                "remove {} failed: {err}",
                self.path.display()
            ))),
        }
    }

    async fn restart(&self) -> Result<(), SessionStoreError> {
        self.restart_tx
            .send(true)
            .map_err(|_| SessionStoreError::Restart("nobody is watching for session restarts".into()))
    }
}
