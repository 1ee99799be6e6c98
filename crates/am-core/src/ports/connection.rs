use async_trait::async_trait;

use super::errors::ConnectionError;
use crate::anchor::Anchor;
use crate::device::{Device, PublicKey};
use crate::registration::AnchorInfo;

/// Authoritative store of anchors and their devices.
#[async_trait]
pub trait ConnectionPort: Send + Sync {
    async fn get_anchor_info(&self, anchor: &Anchor) -> Result<AnchorInfo, ConnectionError>;

    /// Not assumed idempotent.
    async fn remove(&self, anchor: &Anchor, public_key: &PublicKey) -> Result<(), ConnectionError>;

    /// Used by the add wizards only.
    async fn add(&self, anchor: &Anchor, device: Device) -> Result<(), ConnectionError>;
}

