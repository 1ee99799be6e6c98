//! Anchor management domain module.
//!
//! This module defines the management view state machine, its commands and
//! the presentation models handed to the view port.

pub mod action;
pub mod command;
pub mod dialog;
pub mod event;
pub mod state;
pub mod state_machine;
pub mod view;

pub use action::ManageAction;
pub use command::ManageCommand;
pub use dialog::{ErrorDialog, Notice};
pub use event::{AddFlowChoice, ManageEvent};
pub use state::{ManageState, Mutation};
pub use state_machine::ManageStateMachine;
pub use view::{DeviceListItem, ManageView};
