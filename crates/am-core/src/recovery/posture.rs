use crate::device::{Device, DeviceSet};

/// How the management view presents recovery.
///
/// Exactly one of the two layouts applies: either the warning nag (no
/// recovery device registered) or the list of recovery devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryPosture {
    /// No recovery device: show the warning and its "add recovery" button.
    Nag,
    /// At least one recovery device: list them under "Recovery mechanisms".
    RecoveryList { devices: Vec<Device> },
}

impl RecoveryPosture {
    pub fn evaluate(devices: &DeviceSet) -> Self {
        if devices.lacks_recovery_device() {
            RecoveryPosture::Nag
        } else {
            RecoveryPosture::RecoveryList {
                devices: devices.partition().recovery,
            }
        }
    }

    pub fn shows_nag(&self) -> bool {
        matches!(self, RecoveryPosture::Nag)
    }

    pub fn recovery_devices(&self) -> Option<&[Device]> {
        match self {
            RecoveryPosture::Nag => None,
            RecoveryPosture::RecoveryList { devices } => Some(devices),
        }
    }

    /// Label of the call-to-action that starts the recovery setup.
    pub fn add_recovery_label(&self) -> &'static str {
        match self {
            RecoveryPosture::Nag => "Add Recovery Key",
            RecoveryPosture::RecoveryList { .. } => "ADD RECOVERY MECHANISM",
        }
    }
}

pub const RECOVERY_NAG_TITLE: &str = "Recovery Mechanism";
pub const RECOVERY_NAG_MESSAGE: &str =
    "Add a recovery mechanism to help protect this Identity Anchor.";
