//! Anchor store kept in process memory.
//!
//! Backs the offline mode of the console and the integration tests. Behaves
//! like the remote store as far as the management page can tell: unknown
//! anchors and devices are reported as not found, every read returns a
//! fresh snapshot, and a registration whose window closed is cleaned up on
//! the next read.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use am_core::device::{Device, DeviceSet, PublicKey};
use am_core::ports::{ConnectionError, ConnectionPort};
use am_core::registration::{AnchorInfo, DeviceRegistration};
use am_core::Anchor;

#[derive(Default)]
pub struct InMemoryAnchorDirectory {
    anchors: RwLock<HashMap<Anchor, AnchorInfo>>,
}

impl InMemoryAnchorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the directory before it is shared.
    pub fn with_anchor(mut self, anchor: Anchor, devices: Vec<Device>) -> Self {
        self.anchors
            .get_mut()
            .insert(anchor, AnchorInfo::new(DeviceSet::new(devices)));
        self
    }

    pub async fn insert(&self, anchor: Anchor, info: AnchorInfo) {
        self.anchors.write().await.insert(anchor, info);
    }

    pub async fn snapshot(&self, anchor: &Anchor) -> Option<AnchorInfo> {
        self.anchors.read().await.get(anchor).cloned()
    }

    /// Open or resolve (with `None`) a tentative registration.
    pub async fn set_registration(
        &self,
        anchor: &Anchor,
        registration: Option<DeviceRegistration>,
    ) -> Result<(), ConnectionError> {
        let mut anchors = self.anchors.write().await;
        let info = anchors
            .get_mut(anchor)
            .ok_or_else(|| ConnectionError::AnchorNotFound(anchor.to_string()))?;
        info.device_registration = registration;
        Ok(())
    }
}

#[async_trait]
impl ConnectionPort for InMemoryAnchorDirectory {
    async fn get_anchor_info(&self, anchor: &Anchor) -> Result<AnchorInfo, ConnectionError> {
        let mut anchors = self.anchors.write().await;
        let info = anchors
            .get_mut(anchor)
            .ok_or_else(|| ConnectionError::AnchorNotFound(anchor.to_string()))?;
        if info.device_registration.is_some() {
            let cleaned = info.clone().without_expired_registration(Utc::now());
            if !cleaned.has_pending_registration() {
                debug!(%anchor, "lapsed registration cleaned up");
            }
            *info = cleaned;
        }
        Ok(info.clone())
    }

    async fn remove(&self, anchor: &Anchor, public_key: &PublicKey) -> Result<(), ConnectionError> {
        let mut anchors = self.anchors.write().await;
        let info = anchors
            .get_mut(anchor)
            .ok_or_else(|| ConnectionError::AnchorNotFound(anchor.to_string()))?;
        if !info.devices.contains(public_key) {
            return Err(ConnectionError::DeviceNotFound(public_key.fingerprint()));
        }

        let remaining: Vec<Device> = info
            .devices
            .iter()
            .filter(|device| device.public_key() != public_key)
            .cloned()
            .collect();
        info.devices = DeviceSet::new(remaining);
        debug!(%anchor, key = %public_key.fingerprint(), "device removed from in-memory directory");
        Ok(())
    }

    async fn add(&self, anchor: &Anchor, device: Device) -> Result<(), ConnectionError> {
        let mut anchors = self.anchors.write().await;
        let info = anchors
            .get_mut(anchor)
            .ok_or_else(|| ConnectionError::AnchorNotFound(anchor.to_string()))?;
        if info.devices.contains(device.public_key()) {
            return Err(ConnectionError::Status {
                status: 409,
                body: format!("device {} already registered", device.public_key().fingerprint()),
            });
        }

        let mut devices = info.devices.clone().into_inner();
        debug!(%anchor, alias = %device.alias(), "device added to in-memory directory");
        devices.push(device);
        info.devices = DeviceSet::new(devices);
        Ok(())
    }
}
