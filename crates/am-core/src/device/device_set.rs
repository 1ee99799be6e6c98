use serde::{Deserialize, Serialize};

use super::device::Device;
use super::value_objects::PublicKey;

/// Ordered snapshot of every device registered on an anchor.
///
/// A set is rebuilt from a fresh read after every operation and is never
/// edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceSet(Vec<Device>);

/// Devices split by purpose, relative order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevicePartition {
    pub authentication: Vec<Device>,
    pub recovery: Vec<Device>,
}

impl DeviceSet {
    pub fn new(devices: Vec<Device>) -> Self {
        Self(devices)
    }

    pub fn devices(&self) -> &[Device] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.0.iter()
    }

    /// True when removing any device would leave the anchor without one.
    pub fn is_only_device(&self) -> bool {
        self.0.len() < 2
    }

    /// True iff no device in the set is a recovery device.
    ///
    /// Drives the recovery nag: `true` shows the nag and hides the recovery
    /// list, `false` shows the list and hides the nag.
    pub fn lacks_recovery_device(&self) -> bool {
        !self.0.iter().any(Device::is_recovery)
    }

    pub fn find(&self, public_key: &PublicKey) -> Option<&Device> {
        self.0.iter().find(|device| device.public_key() == public_key)
    }

    pub fn contains(&self, public_key: &PublicKey) -> bool {
        self.find(public_key).is_some()
    }

    pub fn partition(&self) -> DevicePartition {
        let (recovery, authentication) = self.0.iter().cloned().partition(Device::is_recovery);
        DevicePartition {
            authentication,
            recovery,
        }
    }

    pub fn into_inner(self) -> Vec<Device> {
        self.0
    }
}

impl From<Vec<Device>> for DeviceSet {
    fn from(devices: Vec<Device>) -> Self {
        Self(devices)
    }
}

impl<'a> IntoIterator for &'a DeviceSet {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
