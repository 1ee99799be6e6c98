use crate::device::{DeviceSet, PublicKey};

/// A network call or sub-flow that is currently running.
///
/// 正在进行的网络调用或子流程。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    RemoveDevice { target: PublicKey, same_device: bool },
    AddLocalDevice,
    SetupRecovery,
}

/// Management view state.
///
/// 设备管理页状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageState {
    /// Fetching anchor info.
    ///
    /// 正在获取锚点信息。
    Loading,

    /// A tentative remote registration is in flight; the polling flow owns the UI.
    ///
    /// 远程设备注册进行中，界面交给轮询流程。
    PendingRegistration,

    /// Device list rendered, commands armed.
    ///
    /// 设备列表已渲染，可接收命令。
    Normal { devices: DeviceSet },

    /// Waiting for the add-flow chooser.
    ///
    /// 等待选择添加方式。
    ChoosingAddFlow { devices: DeviceSet },

    /// Removing the current device; waiting for the user to confirm.
    ///
    /// 删除当前设备，等待用户确认。
    AwaitingConfirmation { devices: DeviceSet, target: PublicKey },

    Mutating { mutation: Mutation },

    /// The authenticated device was removed; the session has to start over.
    ///
    /// 当前设备已被删除，会话需要重新开始。
    SessionEnded,

    /// The user left the management view.
    ///
    /// 用户已离开管理页。
    Closed,
}

impl ManageState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ManageState::SessionEnded | ManageState::Closed)
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ManageState::Loading => "loading",
            ManageState::PendingRegistration => "pending_registration",
            ManageState::Normal { .. } => "normal",
            ManageState::ChoosingAddFlow { .. } => "choosing_add_flow",
            ManageState::AwaitingConfirmation { .. } => "awaiting_confirmation",
            ManageState::Mutating { .. } => "mutating",
            ManageState::SessionEnded => "session_ended",
            ManageState::Closed => "closed",
        }
    }

    /// Snapshot of the devices the user is currently looking at, if any.
    pub fn devices(&self) -> Option<&DeviceSet> {
        match self {
            ManageState::Normal { devices }
            | ManageState::ChoosingAddFlow { devices }
            | ManageState::AwaitingConfirmation { devices, .. } => Some(devices),
            _ => None,
        }
    }
}
