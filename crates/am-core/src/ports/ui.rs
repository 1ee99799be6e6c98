use async_trait::async_trait;

use crate::manage::{ErrorDialog, ManageView, Notice};

/// Draws the management page. Each call fully replaces what was shown.
#[async_trait]
pub trait ManageViewPort: Send + Sync {
    async fn render(&self, view: &ManageView);
}

/// Presents a recoverable error and resolves when it is dismissed.
#[async_trait]
pub trait ErrorDisplayPort: Send + Sync {
    async fn show_error(&self, dialog: &ErrorDialog);
}

#[async_trait]
pub trait ConfirmPort: Send + Sync {
    /// `true` when the user accepts.
    async fn confirm(&self, message: &str) -> bool;
}

#[async_trait]
pub trait NoticePort: Send + Sync {
    async fn notice(&self, notice: Notice);
}
