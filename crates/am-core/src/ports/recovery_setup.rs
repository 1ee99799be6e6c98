use anyhow::Result;
use async_trait::async_trait;

use crate::anchor::Anchor;

#[async_trait]
pub trait RecoverySetupPort: Send + Sync {
    async fn setup_recovery(&self, anchor: &Anchor) -> Result<()>;
}
