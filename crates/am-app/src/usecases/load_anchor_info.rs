use std::sync::Arc;

use am_core::ports::{ConnectionError, ConnectionPort};
use am_core::{Anchor, AnchorInfo};
use tracing::{debug, warn};

/// Use case for reading the anchor's current device set.
///
/// The result is passed on as the store reported it, registration included.
pub struct LoadAnchorInfo {
    connection: Arc<dyn ConnectionPort>,
}

impl LoadAnchorInfo {
    pub fn new(connection: Arc<dyn ConnectionPort>) -> Self {
        Self { connection }
    }

    pub async fn execute(&self, anchor: &Anchor) -> Result<AnchorInfo, ConnectionError> {
        match self.connection.get_anchor_info(anchor).await {
            Ok(info) => {
                debug!(
                    anchor = %anchor,
                    devices = info.devices.len(),
                    pending_registration = info.has_pending_registration(),
                    "anchor info loaded"
                );
                Ok(info)
            }
            Err(err) => {
                warn!(anchor = %anchor, error = %err, "failed to load anchor info");
                Err(err)
            }
        }
    }
}
