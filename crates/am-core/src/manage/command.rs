use crate::device::PublicKey;

/// User intent emitted by the rendered management view.
///
/// Every list item carries its own `RemoveDevice` command, so the view only
/// has to hand the command back; it never needs to know the removal rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageCommand {
    AddDevice,
    AddRecovery,
    RemoveDevice { target: PublicKey },
    Refresh,
    Close,
}
