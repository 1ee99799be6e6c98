use std::sync::Arc;

use am_core::ports::{SessionStoreError, SessionStorePort};
use tracing::{error, info};

/// Use case for tearing down the session after its own device was removed.
///
/// The credential behind the session no longer exists, so local session
/// data is wiped and the client is forced to start over. A failed clear is
/// logged and does not stop the restart.
pub struct EndSession {
    session_store: Arc<dyn SessionStorePort>,
}

impl EndSession {
    pub fn new(session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { session_store }
    }

    pub async fn clear(&self) {
        match self.session_store.clear().await {
            Ok(()) => info!("local session data cleared"),
            Err(err) => error!(error = %err, "failed to clear local session data"),
        }
    }

    pub async fn restart(&self) -> Result<(), SessionStoreError> {
        self.session_store.restart().await?;
        info!("session restart requested");
        Ok(())
    }

    pub async fn execute(&self) -> Result<(), SessionStoreError> {
        self.clear().await;
        self.restart().await
    }
}
