use async_trait::async_trait;

use super::errors::SessionStoreError;

/// Locally persisted session state.
///
/// Injected into the removal success path: once the authenticated device is
/// gone, the session is wiped and restarted from scratch.
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Delete every piece of persisted session data.
    async fn clear(&self) -> Result<(), SessionStoreError>;

    /// Force the client to start a new session.
    async fn restart(&self) -> Result<(), SessionStoreError>;
}

