use std::sync::Arc;

use am_core::ports::{ConnectionError, ConnectionPort};
use am_core::{Anchor, PublicKey};
use tracing::{info, warn};

/// Use case for the remove call itself.
///
/// The guard has already run by the time this executes; a failure says
/// nothing about whether the device is still registered.
pub struct RemoveDevice {
    connection: Arc<dyn ConnectionPort>,
}

impl RemoveDevice {
    pub fn new(connection: Arc<dyn ConnectionPort>) -> Self {
        Self { connection }
    }

    pub async fn execute(&self, anchor: &Anchor, target: &PublicKey) -> Result<(), ConnectionError> {
        match self.connection.remove(anchor, target).await {
            Ok(()) => {
                info!(anchor = %anchor, device = %target.fingerprint(), "device removed");
                Ok(())
            }
            Err(err) => {
                warn!(
                    anchor = %anchor,
                    device = %target.fingerprint(),
                    error = %err,
                    "failed to remove device"
                );
                Err(err)
            }
        }
    }
}
