use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use super::value_objects::{DeviceAlias, PublicKey};

/// What a registered credential is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePurpose {
    /// Everyday sign-in device.
    Authentication,
    /// Backup credential kept for account recovery.
    Recovery,
}

impl DevicePurpose {
    pub fn is_recovery(self) -> bool {
        matches!(self, DevicePurpose::Recovery)
    }
}

impl Display for DevicePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevicePurpose::Authentication => write!(f, "authentication"),
            DevicePurpose::Recovery => write!(f, "recovery"),
        }
    }
}

/// One registered credential bound to an anchor.
///
/// Devices are value objects identified by their public key; two devices
/// with the same key are the same device whatever their alias says.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub alias: DeviceAlias,
    #[serde(rename = "pubkey")]
    pub public_key: PublicKey,
    pub purpose: DevicePurpose,
}

impl Device {
    pub fn new(alias: impl Into<DeviceAlias>, public_key: PublicKey, purpose: DevicePurpose) -> Self {
        Self {
            alias: alias.into(),
            public_key,
            purpose,
        }
    }

    pub fn authentication(alias: &str, public_key: PublicKey) -> Self {
        Self::new(alias, public_key, DevicePurpose::Authentication)
    }

    pub fn recovery(alias: &str, public_key: PublicKey) -> Self {
        Self::new(alias, public_key, DevicePurpose::Recovery)
    }

    pub fn alias(&self) -> &DeviceAlias {
        &self.alias
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn purpose(&self) -> DevicePurpose {
        self.purpose
    }

    pub fn is_recovery(&self) -> bool {
        self.purpose.is_recovery()
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for Device {}
