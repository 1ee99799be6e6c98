use crate::device::PublicKey;
use crate::registration::AnchorInfo;

/// Outcome of the "choose add flow" wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFlowChoice {
    Cancel,
    /// Register an authenticator on this client.
    Local,
    /// Register a device from another client (tentative registration).
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageEvent {
    // Loading
    Refresh,
    AnchorInfoLoaded { info: AnchorInfo },
    AnchorInfoFailed { detail: String },
    RegistrationPollFinished,

    // Add device
    AddDeviceRequested,
    AddFlowChosen { choice: AddFlowChoice },
    LocalDeviceAddFinished,

    // Recovery
    AddRecoveryRequested,
    RecoverySetupFinished,

    // Removal
    RemoveRequested { target: PublicKey, authenticated: PublicKey },
    ConfirmationAnswered { accepted: bool },
    RemoveSucceeded,
    RemoveFailed { detail: String },

    // Control
    Close,
}

impl ManageEvent {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ManageEvent::Refresh => "refresh",
            ManageEvent::AnchorInfoLoaded { .. } => "anchor_info_loaded",
            ManageEvent::AnchorInfoFailed { .. } => "anchor_info_failed",
            ManageEvent::RegistrationPollFinished => "registration_poll_finished",
            ManageEvent::AddDeviceRequested => "add_device_requested",
            ManageEvent::AddFlowChosen { .. } => "add_flow_chosen",
            ManageEvent::LocalDeviceAddFinished => "local_device_add_finished",
            ManageEvent::AddRecoveryRequested => "add_recovery_requested",
            ManageEvent::RecoverySetupFinished => "recovery_setup_finished",
            ManageEvent::RemoveRequested { .. } => "remove_requested",
            ManageEvent::ConfirmationAnswered { .. } => "confirmation_answered",
            ManageEvent::RemoveSucceeded => "remove_succeeded",
            ManageEvent::RemoveFailed { .. } => "remove_failed",
            ManageEvent::Close => "close",
        }
    }
}
