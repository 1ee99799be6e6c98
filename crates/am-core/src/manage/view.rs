use crate::anchor::Anchor;
use crate::device::{Device, DeviceAlias, DevicePurpose, DeviceSet};
use crate::manage::command::ManageCommand;
use crate::recovery::RecoveryPosture;

/// One row of a device list, bound to its own remove command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceListItem {
    pub alias: DeviceAlias,
    pub purpose: DevicePurpose,
    pub remove: ManageCommand,
}

impl DeviceListItem {
    fn from_device(device: &Device) -> Self {
        Self {
            alias: device.alias.clone(),
            purpose: device.purpose,
            remove: ManageCommand::RemoveDevice {
                target: device.public_key.clone(),
            },
        }
    }
}

/// Everything a front-end needs to draw the management page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageView {
    pub anchor: Anchor,
    /// "Added devices": authentication devices only.
    pub devices: Vec<DeviceListItem>,
    /// Nag or recovery list, never both.
    pub posture: RecoveryPosture,
}

impl ManageView {
    pub fn build(anchor: Anchor, devices: &DeviceSet) -> Self {
        let partition = devices.partition();
        let posture = RecoveryPosture::evaluate(devices);

        Self {
            anchor,
            devices: partition
                .authentication
                .iter()
                .map(DeviceListItem::from_device)
                .collect(),
            posture,
        }
    }

    /// Recovery rows, present only when the posture is a list.
    pub fn recovery_devices(&self) -> Option<Vec<DeviceListItem>> {
        self.posture
            .recovery_devices()
            .map(|devices| devices.iter().map(DeviceListItem::from_device).collect())
    }

    /// Every command the view can emit, in display order.
    pub fn commands(&self) -> Vec<ManageCommand> {
        let mut commands = vec![ManageCommand::AddDevice, ManageCommand::AddRecovery];
        commands.extend(self.devices.iter().map(|item| item.remove.clone()));
        if let Some(recovery) = self.recovery_devices() {
            commands.extend(recovery.into_iter().map(|item| item.remove));
        }
        commands
    }
}
