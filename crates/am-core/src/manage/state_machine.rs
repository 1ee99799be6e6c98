//! Management view state machine.
//!
//! Defines a pure state transition function for the device management page:
//! load, branch on pending registration, render, then route add/remove
//! commands. Every mutation attempt ends in a refetch, except removal of the
//! authenticated device, which ends the session.

use crate::manage::action::ManageAction;
use crate::manage::dialog::{ErrorDialog, Notice};
use crate::manage::event::{AddFlowChoice, ManageEvent};
use crate::manage::state::{ManageState, Mutation};
use crate::removal::{RemovalDecision, RemovalGuard};

/// Pure management state machine: no side effects.
///
/// 纯状态机，不产生副作用。
pub struct ManageStateMachine;

impl ManageStateMachine {
    /// Compute the next state and the actions the caller must execute.
    ///
    /// 计算下一个状态以及调用方需要执行的动作。
    pub fn transition(state: ManageState, event: ManageEvent) -> (ManageState, Vec<ManageAction>) {
        match (state, event) {
            // ===== Loading =====
            (ManageState::Loading | ManageState::Normal { .. }, ManageEvent::Refresh) => {
                (ManageState::Loading, vec![ManageAction::FetchAnchorInfo])
            }
            (ManageState::Loading, ManageEvent::AnchorInfoLoaded { info }) => {
                if info.has_pending_registration() {
                    (
                        ManageState::PendingRegistration,
                        vec![ManageAction::PollTentativeDevice],
                    )
                } else {
                    let devices = info.devices;
                    (
                        ManageState::Normal {
                            devices: devices.clone(),
                        },
                        vec![ManageAction::RenderView { devices }],
                    )
                }
            }
            (ManageState::Loading, ManageEvent::AnchorInfoFailed { detail }) => (
                ManageState::Loading,
                vec![
                    ManageAction::ShowError {
                        dialog: ErrorDialog::failed_to_list_devices(detail),
                    },
                    ManageAction::FetchAnchorInfo,
                ],
            ),
            (ManageState::PendingRegistration, ManageEvent::RegistrationPollFinished) => {
                (ManageState::Loading, vec![ManageAction::FetchAnchorInfo])
            }

            // ===== Add device =====
            (ManageState::Normal { devices }, ManageEvent::AddDeviceRequested) => (
                ManageState::ChoosingAddFlow { devices },
                vec![ManageAction::ChooseAddFlow],
            ),
            (ManageState::ChoosingAddFlow { devices }, ManageEvent::AddFlowChosen { choice }) => {
                match choice {
                    AddFlowChoice::Cancel => {
                        (ManageState::Loading, vec![ManageAction::FetchAnchorInfo])
                    }
                    AddFlowChoice::Local => (
                        ManageState::Mutating {
                            mutation: Mutation::AddLocalDevice,
                        },
                        vec![ManageAction::AddLocalDevice { existing: devices }],
                    ),
                    AddFlowChoice::Remote => (
                        ManageState::PendingRegistration,
                        vec![ManageAction::PollTentativeDevice],
                    ),
                }
            }
            (
                ManageState::Mutating {
                    mutation: Mutation::AddLocalDevice,
                },
                ManageEvent::LocalDeviceAddFinished,
            ) => (ManageState::Loading, vec![ManageAction::FetchAnchorInfo]),

            // ===== Recovery =====
            (ManageState::Normal { .. }, ManageEvent::AddRecoveryRequested) => (
                ManageState::Mutating {
                    mutation: Mutation::SetupRecovery,
                },
                vec![ManageAction::SetupRecovery],
            ),
            (
                ManageState::Mutating {
                    mutation: Mutation::SetupRecovery,
                },
                ManageEvent::RecoverySetupFinished,
            ) => (ManageState::Loading, vec![ManageAction::FetchAnchorInfo]),

            // ===== Removal =====
            (
                ManageState::Normal { devices },
                ManageEvent::RemoveRequested {
                    target,
                    authenticated,
                },
            ) => {
                let decision = RemovalGuard::evaluate(&target, &devices, &authenticated);
                match decision {
                    RemovalDecision::Blocked { reason } => (
                        ManageState::Normal { devices },
                        vec![ManageAction::ShowNotice {
                            notice: Notice::RemovalBlocked(reason),
                        }],
                    ),
                    _ if !devices.contains(&target) => (
                        ManageState::Normal { devices },
                        vec![ManageAction::ShowNotice {
                            notice: Notice::UnknownDevice,
                        }],
                    ),
                    RemovalDecision::RequiresConfirmation { warning } => (
                        ManageState::AwaitingConfirmation { devices, target },
                        vec![ManageAction::RequestConfirmation { message: warning }],
                    ),
                    RemovalDecision::Allow => (
                        ManageState::Mutating {
                            mutation: Mutation::RemoveDevice {
                                target: target.clone(),
                                same_device: false,
                            },
                        },
                        vec![ManageAction::RemoveDevice { target }],
                    ),
                }
            }
            (
                ManageState::AwaitingConfirmation { devices, target },
                ManageEvent::ConfirmationAnswered { accepted },
            ) => {
                if accepted {
                    (
                        ManageState::Mutating {
                            mutation: Mutation::RemoveDevice {
                                target: target.clone(),
                                same_device: true,
                            },
                        },
                        vec![ManageAction::RemoveDevice { target }],
                    )
                } else {
                    (ManageState::Normal { devices }, Vec::new())
                }
            }
            (
                ManageState::Mutating {
                    mutation: Mutation::RemoveDevice { same_device, .. },
                },
                ManageEvent::RemoveSucceeded,
            ) => {
                if same_device {
                    (
                        ManageState::SessionEnded,
                        vec![ManageAction::ClearSession, ManageAction::RestartSession],
                    )
                } else {
                    (ManageState::Loading, vec![ManageAction::FetchAnchorInfo])
                }
            }
            (
                ManageState::Mutating {
                    mutation: Mutation::RemoveDevice { .. },
                },
                ManageEvent::RemoveFailed { detail },
            ) => (
                ManageState::Loading,
                vec![
                    ManageAction::ShowError {
                        dialog: ErrorDialog::failed_to_remove_device(detail),
                    },
                    ManageAction::FetchAnchorInfo,
                ],
            ),

            // ===== Control =====
            (state, ManageEvent::Close) if !state.is_terminal() => (ManageState::Closed, Vec::new()),

            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(state = ?state, event = ?_event, "manage event ignored in current state");
                (state, Vec::new())
            }
        }
    }
}
