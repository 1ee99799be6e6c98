use serde::Serialize;

use crate::removal::BlockedReason;

/// Recoverable error presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
    pub detail: String,
    pub primary_button: String,
}

impl ErrorDialog {
    pub fn failed_to_list_devices(detail: impl Into<String>) -> Self {
        Self {
            title: "Failed to list your devices".to_string(),
            message: "An unexpected error occurred when displaying your devices. Please try again"
                .to_string(),
            detail: detail.into(),
            primary_button: "Try again".to_string(),
        }
    }

    pub fn failed_to_remove_device(detail: impl Into<String>) -> Self {
        Self {
            title: "Failed to remove the device".to_string(),
            message:
                "An unexpected error occurred when trying to remove the device. Please try again"
                    .to_string(),
            detail: detail.into(),
            primary_button: "Back to Manage".to_string(),
        }
    }
}

/// Blocking, informational message that does not count as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Notice {
    RemovalBlocked(BlockedReason),
    /// The command targeted a key that is not in the rendered device list.
    UnknownDevice,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::RemovalBlocked(reason) => reason.message(),
            Notice::UnknownDevice => "This device is no longer registered on your anchor.",
        }
    }
}
