use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceSet};

/// An in-flight tentative (remote) device registration on an anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRegistration {
    /// Device submitted by the new client, if it already got that far.
    pub tentative_device: Option<Device>,
    /// When the registration window closes.
    pub expiration: DateTime<Utc>,
}

impl DeviceRegistration {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration
    }
}

/// Anchor state as reported by the authoritative store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorInfo {
    pub devices: DeviceSet,
    #[serde(default)]
    pub device_registration: Option<DeviceRegistration>,
}

impl AnchorInfo {
    pub fn new(devices: DeviceSet) -> Self {
        Self {
            devices,
            device_registration: None,
        }
    }

    pub fn with_registration(mut self, registration: DeviceRegistration) -> Self {
        self.device_registration = Some(registration);
        self
    }

    pub fn has_pending_registration(&self) -> bool {
        self.device_registration.is_some()
    }

    /// Forget a registration whose window closed before `now`.
    ///
    /// Store-side cleanup. Readers of the store never apply it themselves:
    /// whatever the store reports as pending is pending.
    pub fn without_expired_registration(mut self, now: DateTime<Utc>) -> Self {
        if self
            .device_registration
            .as_ref()
            .is_some_and(|registration| registration.is_expired_at(now))
        {
            self.device_registration = None;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::PublicKey;
    use chrono::Duration;

    #[test]
    fn missing_registration_field_means_none() {
        let json = r#"{"devices":[{"alias":"laptop","pubkey":"01","purpose":"authentication"}]}"#;
        let info: AnchorInfo = serde_json::from_str(json).unwrap();

        assert!(!info.has_pending_registration());
        assert_eq!(info.devices.len(), 1);
    }

    #[test]
    fn registration_expiry() {
        let now = Utc::now();
        let registration = DeviceRegistration {
            tentative_device: Some(Device::authentication("new phone", PublicKey::new(vec![7]))),
            expiration: now + Duration::minutes(15),
        };

        assert!(!registration.is_expired_at(now));
        assert!(registration.is_expired_at(now + Duration::minutes(15)));
    }

    #[test]
    fn expired_registration_is_dropped() {
        let now = Utc::now();
        let devices = DeviceSet::new(vec![Device::authentication("laptop", PublicKey::new(vec![1]))]);
        let lapsed = AnchorInfo::new(devices.clone()).with_registration(DeviceRegistration {
            tentative_device: None,
            expiration: now - Duration::seconds(1),
        });
        let open = AnchorInfo::new(devices).with_registration(DeviceRegistration {
            tentative_device: None,
            expiration: now + Duration::minutes(5),
        });

        assert!(!lapsed.without_expired_registration(now).has_pending_registration());
        assert!(open.without_expired_registration(now).has_pending_registration());
    }
}
