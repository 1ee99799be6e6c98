use crate::device::{DeviceSet, PublicKey};
use crate::manage::dialog::{ErrorDialog, Notice};

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageAction {
    /// Read anchor info from the connection.
    FetchAnchorInfo,

    /// Hand the UI to the tentative device poller.
    PollTentativeDevice,

    /// Draw the management page for this snapshot.
    RenderView { devices: DeviceSet },

    /// Run the add-flow chooser.
    ChooseAddFlow,

    /// Run the local device registration wizard.
    AddLocalDevice { existing: DeviceSet },

    /// Run the recovery setup wizard.
    SetupRecovery,

    /// Ask the user to accept a warning.
    RequestConfirmation { message: &'static str },

    ShowNotice { notice: Notice },

    /// Show a recoverable error and wait until it is dismissed.
    ShowError { dialog: ErrorDialog },

    /// Issue the remove call for this key.
    RemoveDevice { target: PublicKey },

    /// Wipe locally persisted session data.
    ClearSession,

    /// Force the client to start a fresh session.
    RestartSession,
}
