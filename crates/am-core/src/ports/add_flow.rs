use anyhow::Result;
use async_trait::async_trait;

use crate::anchor::Anchor;
use crate::device::DeviceSet;
use crate::manage::AddFlowChoice;

/// "Add new device" wizard entry point.
#[async_trait]
pub trait AddFlowChooserPort: Send + Sync {
    async fn choose(&self) -> AddFlowChoice;
}

/// Registers an authenticator available on this client.
#[async_trait]
pub trait LocalDeviceAddPort: Send + Sync {
    /// `existing` lets the wizard exclude credentials already registered.
    async fn add_local_device(&self, anchor: &Anchor, existing: &DeviceSet) -> Result<()>;
}

/// Owns the UI while a tentative remote registration is in progress.
///
/// Returns once the registration has been resolved one way or another.
#[async_trait]
pub trait TentativeDevicePollerPort: Send + Sync {
    async fn poll_for_tentative_device(&self, anchor: &Anchor) -> Result<()>;
}
