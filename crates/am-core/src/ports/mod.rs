//! Port interfaces for the application layer
//!
//! Ports define the contract between the management use cases and the
//! collaborators they drive: the remote anchor store, the local session,
//! the add/recovery wizards and the presentation layer. Core logic never
//! touches any of them directly.

pub mod add_flow;
pub mod command_source;
pub mod connection;
pub mod errors;
pub mod identity;
pub mod recovery_setup;
pub mod session_store;
pub mod ui;

pub use add_flow::{AddFlowChooserPort, LocalDeviceAddPort, TentativeDevicePollerPort};
pub use command_source::CommandSourcePort;
pub use connection::ConnectionPort;
pub use errors::{ConnectionError, SessionStoreError};
pub use identity::IdentityPort;
pub use recovery_setup::RecoverySetupPort;
pub use session_store::SessionStorePort;
pub use ui::{ConfirmPort, ErrorDisplayPort, ManageViewPort, NoticePort};
