//! Device domain models.

pub mod device;
pub mod device_set;
pub mod value_objects;

pub use device::{Device, DevicePurpose};
pub use device_set::{DevicePartition, DeviceSet};
pub use value_objects::{DeviceAlias, PublicKey, PublicKeyParseError};
