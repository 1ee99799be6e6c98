use serde::Serialize;

use crate::device::{Device, DeviceSet, PublicKey};

/// Warning shown before removing the device the session authenticated with.
pub const SAME_DEVICE_WARNING: &str =
    "This will remove your current device and you will be logged out.";

/// Why a removal request was refused without touching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockedReason {
    /// The anchor would be left without any device.
    LastDevice,
}

impl BlockedReason {
    pub fn message(self) -> &'static str {
        match self {
            BlockedReason::LastDevice => "You can not remove your last device.",
        }
    }
}

/// Outcome of the removal guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalDecision {
    /// Proceed with the remove call straight away.
    Allow,
    /// The target is the authenticated device; the user has to confirm
    /// that they accept being logged out.
    RequiresConfirmation { warning: &'static str },
    /// Refuse and tell the user why.
    Blocked { reason: BlockedReason },
}

impl RemovalDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, RemovalDecision::Blocked { .. })
    }

    pub fn requires_confirmation(&self) -> bool {
        matches!(self, RemovalDecision::RequiresConfirmation { .. })
    }
}

/// Removal policy.
///
/// 1. A set with fewer than two devices never allows removal, whatever the target.
/// 2. Removing the device whose key authenticated the session needs confirmation.
/// 3. Anything else is allowed.
pub struct RemovalGuard;

impl RemovalGuard {
    pub fn evaluate(
        target: &PublicKey,
        devices: &DeviceSet,
        authenticated: &PublicKey,
    ) -> RemovalDecision {
        if devices.is_only_device() {
            return RemovalDecision::Blocked {
                reason: BlockedReason::LastDevice,
            };
        }

        if Self::is_same_device(target, authenticated) {
            return RemovalDecision::RequiresConfirmation {
                warning: SAME_DEVICE_WARNING,
            };
        }

        RemovalDecision::Allow
    }

    pub fn can_remove(
        device: &Device,
        devices: &DeviceSet,
        authenticated: &PublicKey,
    ) -> RemovalDecision {
        Self::evaluate(device.public_key(), devices, authenticated)
    }

    /// Whether `target` is the credential behind the current session.
    pub fn is_same_device(target: &PublicKey, authenticated: &PublicKey) -> bool {
        target == authenticated
    }
}
