use async_trait::async_trait;

use crate::manage::{ManageCommand, ManageView};

/// Delivers the next command the user issued on the rendered view.
#[async_trait]
pub trait CommandSourcePort: Send + Sync {
    /// `view` is the page currently on screen. `None` means the input is gone.
    async fn next_command(&self, view: &ManageView) -> Option<ManageCommand>;
}
