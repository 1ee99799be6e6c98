//! Management orchestrator.
//!
//! Drives the management state machine: feeds it events, runs the actions it
//! returns against the ports and turns their outcomes into follow-up events.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use am_core::{
    manage::{ManageAction, ManageCommand, ManageEvent, ManageState, ManageStateMachine, ManageView},
    ports::{
        AddFlowChooserPort, CommandSourcePort, ConfirmPort, ConnectionPort, ErrorDisplayPort,
        IdentityPort, LocalDeviceAddPort, ManageViewPort, NoticePort, RecoverySetupPort,
        SessionStoreError, SessionStorePort, TentativeDevicePollerPort,
    },
    Anchor,
};

use crate::usecases::manage::context::ManageContext;
use crate::usecases::{EndSession, LoadAnchorInfo, RemoveDevice};

/// Errors produced by the management orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ManageOrchestratorError {
    #[error("session restart failed: {0}")]
    SessionRestart(#[from] SessionStoreError),
    #[error("management view stalled in state {0}")]
    Stalled(&'static str),
}

/// How the management loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageExit {
    /// The user left the page.
    Closed,
    /// The device behind the session was removed and the session restarted.
    SessionRestarted,
}

/// Collaborators of [`ManageOrchestrator`].
pub struct ManageOrchestratorDeps {
    pub connection: Arc<dyn ConnectionPort>,
    pub identity: Arc<dyn IdentityPort>,
    pub session_store: Arc<dyn SessionStorePort>,
    pub add_flow_chooser: Arc<dyn AddFlowChooserPort>,
    pub local_device_add: Arc<dyn LocalDeviceAddPort>,
    pub tentative_poller: Arc<dyn TentativeDevicePollerPort>,
    pub recovery_setup: Arc<dyn RecoverySetupPort>,
    pub view: Arc<dyn ManageViewPort>,
    pub error_display: Arc<dyn ErrorDisplayPort>,
    pub confirm: Arc<dyn ConfirmPort>,
    pub notice: Arc<dyn NoticePort>,
    pub commands: Arc<dyn CommandSourcePort>,
}

/// Orchestrator that drives the management page for one anchor.
///
/// 管理页编排器：驱动状态机并执行其产生的动作。
pub struct ManageOrchestrator {
    anchor: Anchor,
    context: Arc<ManageContext>,
    /// Last page handed to the view port; commands are read against it.
    current_view: Mutex<Option<ManageView>>,

    load_anchor_info: LoadAnchorInfo,
    remove_device: RemoveDevice,
    end_session: EndSession,

    identity: Arc<dyn IdentityPort>,
    add_flow_chooser: Arc<dyn AddFlowChooserPort>,
    local_device_add: Arc<dyn LocalDeviceAddPort>,
    tentative_poller: Arc<dyn TentativeDevicePollerPort>,
    recovery_setup: Arc<dyn RecoverySetupPort>,
    view: Arc<dyn ManageViewPort>,
    error_display: Arc<dyn ErrorDisplayPort>,
    confirm: Arc<dyn ConfirmPort>,
    notice: Arc<dyn NoticePort>,
    commands: Arc<dyn CommandSourcePort>,
}

impl ManageOrchestrator {
    pub fn new(anchor: Anchor, deps: ManageOrchestratorDeps) -> Self {
        let ManageOrchestratorDeps {
            connection,
            identity,
            session_store,
            add_flow_chooser,
            local_device_add,
            tentative_poller,
            recovery_setup,
            view,
            error_display,
            confirm,
            notice,
            commands,
        } = deps;

        Self {
            anchor,
            context: ManageContext::default().arc(),
            current_view: Mutex::new(None),
            load_anchor_info: LoadAnchorInfo::new(connection.clone()),
            remove_device: RemoveDevice::new(connection),
            end_session: EndSession::new(session_store),
            identity,
            add_flow_chooser,
            local_device_add,
            tentative_poller,
            recovery_setup,
            view,
            error_display,
            confirm,
            notice,
            commands,
        }
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Load the anchor and render the page.
    ///
    /// 加载锚点并渲染页面。
    pub async fn open(&self) -> Result<ManageState, ManageOrchestratorError> {
        self.dispatch_event(ManageEvent::Refresh).await
    }

    /// Apply one user command and run every step it triggers.
    ///
    /// 处理一条用户命令，并执行其触发的所有步骤。
    pub async fn dispatch(
        &self,
        command: ManageCommand,
    ) -> Result<ManageState, ManageOrchestratorError> {
        let event = match command {
            ManageCommand::AddDevice => ManageEvent::AddDeviceRequested,
            ManageCommand::AddRecovery => ManageEvent::AddRecoveryRequested,
            ManageCommand::RemoveDevice { target } => ManageEvent::RemoveRequested {
                target,
                authenticated: self.identity.public_key(),
            },
            ManageCommand::Refresh => ManageEvent::Refresh,
            ManageCommand::Close => ManageEvent::Close,
        };
        self.dispatch_event(event).await
    }

    pub async fn get_state(&self) -> ManageState {
        self.context.get_state().await
    }

    /// Open the page and keep serving commands until it is left.
    pub async fn run(&self) -> Result<ManageExit, ManageOrchestratorError> {
        let mut state = self.open().await?;
        loop {
            match state {
                ManageState::Closed => return Ok(ManageExit::Closed),
                ManageState::SessionEnded => return Ok(ManageExit::SessionRestarted),
                ManageState::Normal { .. } => {
                    let view = self.current_view.lock().await.clone();
                    let command = match view {
                        Some(view) => self.commands.next_command(&view).await,
                        None => Some(ManageCommand::Refresh),
                    };
                    // Input gone: leave the page.
                    let command = command.unwrap_or(ManageCommand::Close);
                    state = self.dispatch(command).await?;
                }
                other => return Err(ManageOrchestratorError::Stalled(other.label())),
            }
        }
    }

    async fn dispatch_event(&self, event: ManageEvent) -> Result<ManageState, ManageOrchestratorError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!(
            "usecase.manage_orchestrator.dispatch",
            anchor = %self.anchor,
            event = event.label()
        );
        async {
            let mut current = self.context.get_state().await;
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = current.label();
                let event_name = event.label();
                let (next, actions) = ManageStateMachine::transition(current, event);
                info!(from, to = next.label(), event = event_name, "manage state transition");
                self.context.set_state(next.clone()).await;
                let follow_up_events = self.execute_actions(actions).await?;
                current = next;
                pending_events.extend(follow_up_events);
            }

            Ok(current)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        actions: Vec<ManageAction>,
    ) -> Result<Vec<ManageEvent>, ManageOrchestratorError> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "manage executing action");
            match action {
                ManageAction::FetchAnchorInfo => {
                    let event = match self.load_anchor_info.execute(&self.anchor).await {
                        Ok(info) => ManageEvent::AnchorInfoLoaded { info },
                        Err(err) => ManageEvent::AnchorInfoFailed {
                            detail: err.to_string(),
                        },
                    };
                    follow_up_events.push(event);
                }
                ManageAction::PollTentativeDevice => {
                    if let Err(err) = self
                        .tentative_poller
                        .poll_for_tentative_device(&self.anchor)
                        .await
                    {
                        warn!(error = %err, "tentative device polling failed");
                    }
                    follow_up_events.push(ManageEvent::RegistrationPollFinished);
                }
                ManageAction::RenderView { devices } => {
                    let view = ManageView::build(self.anchor.clone(), &devices);
                    self.view.render(&view).await;
                    *self.current_view.lock().await = Some(view);
                }
                ManageAction::ChooseAddFlow => {
                    let choice = self.add_flow_chooser.choose().await;
                    debug!(?choice, "add flow chosen");
                    follow_up_events.push(ManageEvent::AddFlowChosen { choice });
                }
                ManageAction::AddLocalDevice { existing } => {
                    if let Err(err) = self
                        .local_device_add
                        .add_local_device(&self.anchor, &existing)
                        .await
                    {
                        warn!(error = %err, "local device registration failed");
                    }
                    follow_up_events.push(ManageEvent::LocalDeviceAddFinished);
                }
                ManageAction::SetupRecovery => {
                    if let Err(err) = self.recovery_setup.setup_recovery(&self.anchor).await {
                        warn!(error = %err, "recovery setup failed");
                    }
                    follow_up_events.push(ManageEvent::RecoverySetupFinished);
                }
                ManageAction::RequestConfirmation { message } => {
                    let accepted = self.confirm.confirm(message).await;
                    follow_up_events.push(ManageEvent::ConfirmationAnswered { accepted });
                }
                ManageAction::ShowNotice { notice } => {
                    self.notice.notice(notice).await;
                }
                ManageAction::ShowError { dialog } => {
                    self.error_display.show_error(&dialog).await;
                }
                ManageAction::RemoveDevice { target } => {
                    let event = match self.remove_device.execute(&self.anchor, &target).await {
                        Ok(()) => ManageEvent::RemoveSucceeded,
                        Err(err) => ManageEvent::RemoveFailed {
                            detail: err.to_string(),
                        },
                    };
                    follow_up_events.push(event);
                }
                ManageAction::ClearSession => {
                    self.end_session.clear().await;
                }
                ManageAction::RestartSession => {
                    self.end_session.restart().await?;
                }
            }
        }
        Ok(follow_up_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use am_core::device::{Device, DeviceSet, PublicKey};
    use am_core::manage::{AddFlowChoice, ErrorDialog, Notice};
    use am_core::ports::ConnectionError;
    use am_core::registration::{AnchorInfo, DeviceRegistration};
    use am_core::removal::{BlockedReason, SAME_DEVICE_WARNING};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    fn key(byte: u8) -> PublicKey {
        PublicKey::new(vec![byte; 4])
    }

    struct FakeConnection {
        devices: StdMutex<Vec<Device>>,
        fetch_failures: StdMutex<usize>,
        pending_fetches: StdMutex<usize>,
        registration_lifetime: StdMutex<Duration>,
        remove_failures: StdMutex<usize>,
        fetches: StdMutex<usize>,
        removed: StdMutex<Vec<PublicKey>>,
    }

    impl FakeConnection {
        fn new(devices: Vec<Device>) -> Self {
            Self {
                devices: StdMutex::new(devices),
                fetch_failures: StdMutex::new(0),
                pending_fetches: StdMutex::new(0),
                registration_lifetime: StdMutex::new(Duration::minutes(15)),
                remove_failures: StdMutex::new(0),
                fetches: StdMutex::new(0),
                removed: StdMutex::new(Vec::new()),
            }
        }

        fn fetches(&self) -> usize {
            *self.fetches.lock().unwrap()
        }

        fn removed(&self) -> Vec<PublicKey> {
            self.removed.lock().unwrap().clone()
        }
    }

    fn take_one(counter: &StdMutex<usize>) -> bool {
        let mut remaining = counter.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }

    #[async_trait]
    impl ConnectionPort for FakeConnection {
        async fn get_anchor_info(&self, _anchor: &Anchor) -> Result<AnchorInfo, ConnectionError> {
            *self.fetches.lock().unwrap() += 1;
            if take_one(&self.fetch_failures) {
                return Err(ConnectionError::Transport("connection reset".into()));
            }
            let info = AnchorInfo::new(DeviceSet::new(self.devices.lock().unwrap().clone()));
            if take_one(&self.pending_fetches) {
                return Ok(info.with_registration(DeviceRegistration {
                    tentative_device: None,
                    expiration: Utc::now() + *self.registration_lifetime.lock().unwrap(),
                }));
            }
            Ok(info)
        }

        async fn remove(&self, _anchor: &Anchor, public_key: &PublicKey) -> Result<(), ConnectionError> {
            self.removed.lock().unwrap().push(public_key.clone());
            if take_one(&self.remove_failures) {
                return Err(ConnectionError::Status {
                    status: 500,
                    body: "canister trapped".into(),
                });
            }
            self.devices
                .lock()
                .unwrap()
                .retain(|device| device.public_key() != public_key);
            Ok(())
        }

        async fn add(&self, _anchor: &Anchor, device: Device) -> Result<(), ConnectionError> {
            self.devices.lock().unwrap().push(device);
            Ok(())
        }
    }

    struct FixedIdentity(PublicKey);

    impl IdentityPort for FixedIdentity {
        fn public_key(&self) -> PublicKey {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingSession {
        calls: StdMutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl SessionStorePort for RecordingSession {
        async fn clear(&self) -> Result<(), SessionStoreError> {
            self.calls.lock().unwrap().push("clear");
            Ok(())
        }

        async fn restart(&self) -> Result<(), SessionStoreError> {
            self.calls.lock().unwrap().push("restart");
            Ok(())
        }
    }

    struct RecordingUi {
        rendered: StdMutex<Vec<ManageView>>,
        errors: StdMutex<Vec<ErrorDialog>>,
        notices: StdMutex<Vec<Notice>>,
        confirmations: StdMutex<Vec<String>>,
        accept: bool,
    }

    impl RecordingUi {
        fn new(accept: bool) -> Self {
            Self {
                rendered: StdMutex::new(Vec::new()),
                errors: StdMutex::new(Vec::new()),
                notices: StdMutex::new(Vec::new()),
                confirmations: StdMutex::new(Vec::new()),
                accept,
            }
        }

        fn last_view(&self) -> ManageView {
            self.rendered.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ManageViewPort for RecordingUi {
        async fn render(&self, view: &ManageView) {
            self.rendered.lock().unwrap().push(view.clone());
        }
    }

    #[async_trait]
    impl ErrorDisplayPort for RecordingUi {
        async fn show_error(&self, dialog: &ErrorDialog) {
            self.errors.lock().unwrap().push(dialog.clone());
        }
    }

    #[async_trait]
    impl ConfirmPort for RecordingUi {
        async fn confirm(&self, message: &str) -> bool {
            self.confirmations.lock().unwrap().push(message.to_string());
            self.accept
        }
    }

    #[async_trait]
    impl NoticePort for RecordingUi {
        async fn notice(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    struct RecordingWizards {
        choice: AddFlowChoice,
        calls: StdMutex<Vec<&'static str>>,
        connection: Arc<FakeConnection>,
    }

    #[async_trait]
    impl AddFlowChooserPort for RecordingWizards {
        async fn choose(&self) -> AddFlowChoice {
            self.calls.lock().unwrap().push("choose");
            self.choice
        }
    }

    #[async_trait]
    impl LocalDeviceAddPort for RecordingWizards {
        async fn add_local_device(&self, anchor: &Anchor, existing: &DeviceSet) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("add_local");
            let alias = format!("device {}", existing.len() + 1);
            self.connection
                .add(anchor, Device::new(alias.as_str(), key(0xA0), am_core::DevicePurpose::Authentication))
                .await?;
            Ok(())
        }
    }

    #[async_trait]
    impl TentativeDevicePollerPort for RecordingWizards {
        async fn poll_for_tentative_device(&self, _anchor: &Anchor) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("poll");
            Ok(())
        }
    }

    #[async_trait]
    impl RecoverySetupPort for RecordingWizards {
        async fn setup_recovery(&self, _anchor: &Anchor) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("recovery");
            anyhow::bail!("user cancelled")
        }
    }

    struct ScriptedCommands(StdMutex<VecDeque<ManageCommand>>);

    #[async_trait]
    impl CommandSourcePort for ScriptedCommands {
        async fn next_command(&self, _view: &ManageView) -> Option<ManageCommand> {
            self.0.lock().unwrap().pop_front()
        }
    }

    struct Harness {
        connection: Arc<FakeConnection>,
        session: Arc<RecordingSession>,
        ui: Arc<RecordingUi>,
        wizards: Arc<RecordingWizards>,
        orchestrator: ManageOrchestrator,
    }

    fn harness_with(
        devices: Vec<Device>,
        authenticated: PublicKey,
        accept: bool,
        choice: AddFlowChoice,
        commands: Vec<ManageCommand>,
    ) -> Harness {
        let connection = Arc::new(FakeConnection::new(devices));
        let session = Arc::new(RecordingSession::default());
        let ui = Arc::new(RecordingUi::new(accept));
        let wizards = Arc::new(RecordingWizards {
            choice,
            calls: StdMutex::new(Vec::new()),
            connection: connection.clone(),
        });
        let orchestrator = ManageOrchestrator::new(
            Anchor::from(10_000),
            ManageOrchestratorDeps {
                connection: connection.clone(),
                identity: Arc::new(FixedIdentity(authenticated)),
                session_store: session.clone(),
                add_flow_chooser: wizards.clone(),
                local_device_add: wizards.clone(),
                tentative_poller: wizards.clone(),
                recovery_setup: wizards.clone(),
                view: ui.clone(),
                error_display: ui.clone(),
                confirm: ui.clone(),
                notice: ui.clone(),
                commands: Arc::new(ScriptedCommands(StdMutex::new(commands.into()))),
            },
        );
        Harness {
            connection,
            session,
            ui,
            wizards,
            orchestrator,
        }
    }

    fn harness(devices: Vec<Device>, authenticated: PublicKey) -> Harness {
        harness_with(devices, authenticated, true, AddFlowChoice::Cancel, Vec::new())
    }

    #[tokio::test]
    async fn open_renders_partitioned_view_with_recovery_list() {
        let h = harness(
            vec![
                Device::authentication("laptop", key(1)),
                Device::recovery("phrase", key(2)),
            ],
            key(1),
        );

        let state = h.orchestrator.open().await.unwrap();

        assert!(matches!(state, ManageState::Normal { .. }));
        let view = h.ui.last_view();
        assert_eq!(view.devices.len(), 1);
        assert_eq!(view.recovery_devices().map(|rows| rows.len()), Some(1));
        assert!(!view.posture.shows_nag());
    }

    #[tokio::test]
    async fn failed_fetch_shows_error_then_retries() {
        let h = harness(vec![Device::authentication("laptop", key(1))], key(1));
        *h.connection.fetch_failures.lock().unwrap() = 1;

        let state = h.orchestrator.open().await.unwrap();

        assert!(matches!(state, ManageState::Normal { .. }));
        let errors = h.ui.errors.lock().unwrap().clone();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].title, "Failed to list your devices");
        assert_eq!(errors[0].primary_button, "Try again");
        assert_eq!(h.connection.fetches(), 2);
        assert!(h.ui.last_view().posture.shows_nag());
    }

    #[tokio::test]
    async fn pending_registration_polls_before_rendering() {
        let h = harness(vec![Device::authentication("laptop", key(1))], key(1));
        *h.connection.pending_fetches.lock().unwrap() = 1;

        let state = h.orchestrator.open().await.unwrap();

        assert!(matches!(state, ManageState::Normal { .. }));
        assert_eq!(*h.wizards.calls.lock().unwrap(), vec!["poll"]);
        assert_eq!(h.connection.fetches(), 2);
        assert_eq!(h.ui.rendered.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lapsed_registration_is_still_handed_to_the_poller() {
        let h = harness(vec![Device::authentication("laptop", key(1))], key(1));
        *h.connection.pending_fetches.lock().unwrap() = 1;
        *h.connection.registration_lifetime.lock().unwrap() = Duration::seconds(-5);

        let state = h.orchestrator.open().await.unwrap();

        assert!(matches!(state, ManageState::Normal { .. }));
        assert_eq!(*h.wizards.calls.lock().unwrap(), vec!["poll"]);
        assert_eq!(h.connection.fetches(), 2);
        // Only the list fetched after polling is drawn.
        assert_eq!(h.ui.rendered.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn removing_another_device_refetches_without_confirmation() {
        let h = harness(
            vec![
                Device::authentication("laptop", key(1)),
                Device::authentication("phone", key(2)),
            ],
            key(1),
        );
        h.orchestrator.open().await.unwrap();

        let state = h
            .orchestrator
            .dispatch(ManageCommand::RemoveDevice { target: key(2) })
            .await
            .unwrap();

        assert_eq!(h.connection.removed(), vec![key(2)]);
        assert!(h.ui.confirmations.lock().unwrap().is_empty());
        assert_eq!(h.connection.fetches(), 2);
        match state {
            ManageState::Normal { devices } => assert_eq!(devices.len(), 1),
            other => panic!("unexpected state {other:?}"),
        }
        assert_eq!(h.ui.last_view().devices.len(), 1);
    }

    #[tokio::test]
    async fn removing_the_last_device_is_blocked() {
        let h = harness(vec![Device::authentication("laptop", key(1))], key(1));
        h.orchestrator.open().await.unwrap();

        let state = h
            .orchestrator
            .dispatch(ManageCommand::RemoveDevice { target: key(1) })
            .await
            .unwrap();

        assert!(matches!(state, ManageState::Normal { .. }));
        assert!(h.connection.removed().is_empty());
        assert_eq!(
            *h.ui.notices.lock().unwrap(),
            vec![Notice::RemovalBlocked(BlockedReason::LastDevice)]
        );
        assert_eq!(h.connection.fetches(), 1);
    }

    #[tokio::test]
    async fn removing_the_current_device_ends_the_session() {
        let h = harness(
            vec![
                Device::authentication("laptop", key(1)),
                Device::authentication("phone", key(2)),
            ],
            key(1),
        );
        h.orchestrator.open().await.unwrap();

        let state = h
            .orchestrator
            .dispatch(ManageCommand::RemoveDevice { target: key(1) })
            .await
            .unwrap();

        assert_eq!(state, ManageState::SessionEnded);
        assert_eq!(
            *h.ui.confirmations.lock().unwrap(),
            vec![SAME_DEVICE_WARNING.to_string()]
        );
        assert_eq!(h.connection.removed(), vec![key(1)]);
        assert_eq!(*h.session.calls.lock().unwrap(), vec!["clear", "restart"]);
        // No refetch after the session is gone.
        assert_eq!(h.connection.fetches(), 1);
    }

    #[tokio::test]
    async fn declined_confirmation_keeps_the_device() {
        let h = harness_with(
            vec![
                Device::authentication("laptop", key(1)),
                Device::authentication("phone", key(2)),
            ],
            key(1),
            false,
            AddFlowChoice::Cancel,
            Vec::new(),
        );
        h.orchestrator.open().await.unwrap();

        let state = h
            .orchestrator
            .dispatch(ManageCommand::RemoveDevice { target: key(1) })
            .await
            .unwrap();

        assert!(matches!(state, ManageState::Normal { .. }));
        assert!(h.connection.removed().is_empty());
        assert!(h.session.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_removal_shows_error_and_refetches() {
        let h = harness(
            vec![
                Device::authentication("laptop", key(1)),
                Device::authentication("phone", key(2)),
            ],
            key(1),
        );
        *h.connection.remove_failures.lock().unwrap() = 1;
        h.orchestrator.open().await.unwrap();

        let state = h
            .orchestrator
            .dispatch(ManageCommand::RemoveDevice { target: key(2) })
            .await
            .unwrap();

        let errors = h.ui.errors.lock().unwrap().clone();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].title, "Failed to remove the device");
        assert!(errors[0].detail.contains("canister trapped"));
        assert_eq!(h.connection.fetches(), 2);
        match state {
            ManageState::Normal { devices } => assert_eq!(devices.len(), 2),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_target_is_rejected_without_network_call() {
        let h = harness(
            vec![
                Device::authentication("laptop", key(1)),
                Device::authentication("phone", key(2)),
            ],
            key(1),
        );
        h.orchestrator.open().await.unwrap();

        h.orchestrator
            .dispatch(ManageCommand::RemoveDevice { target: key(9) })
            .await
            .unwrap();

        assert!(h.connection.removed().is_empty());
        assert_eq!(*h.ui.notices.lock().unwrap(), vec![Notice::UnknownDevice]);
    }

    #[tokio::test]
    async fn local_add_flow_refetches_with_new_device() {
        let h = harness_with(
            vec![Device::authentication("laptop", key(1))],
            key(1),
            true,
            AddFlowChoice::Local,
            Vec::new(),
        );
        h.orchestrator.open().await.unwrap();

        let state = h.orchestrator.dispatch(ManageCommand::AddDevice).await.unwrap();

        assert_eq!(*h.wizards.calls.lock().unwrap(), vec!["choose", "add_local"]);
        match state {
            ManageState::Normal { devices } => assert!(devices.contains(&key(0xA0))),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_recovery_setup_still_refetches() {
        let h = harness(vec![Device::authentication("laptop", key(1))], key(1));
        h.orchestrator.open().await.unwrap();

        let state = h.orchestrator.dispatch(ManageCommand::AddRecovery).await.unwrap();

        assert!(matches!(state, ManageState::Normal { .. }));
        assert_eq!(*h.wizards.calls.lock().unwrap(), vec!["recovery"]);
        assert_eq!(h.connection.fetches(), 2);
    }

    #[tokio::test]
    async fn run_serves_commands_until_close() {
        let h = harness_with(
            vec![
                Device::authentication("laptop", key(1)),
                Device::authentication("phone", key(2)),
            ],
            key(1),
            true,
            AddFlowChoice::Cancel,
            vec![
                ManageCommand::RemoveDevice { target: key(2) },
                ManageCommand::Close,
            ],
        );

        let exit = h.orchestrator.run().await.unwrap();

        assert_eq!(exit, ManageExit::Closed);
        assert_eq!(h.connection.removed(), vec![key(2)]);
        assert_eq!(h.orchestrator.get_state().await, ManageState::Closed);
    }

    #[tokio::test]
    async fn run_reports_session_restart() {
        let h = harness_with(
            vec![
                Device::authentication("laptop", key(1)),
                Device::recovery("phrase", key(2)),
            ],
            key(1),
            true,
            AddFlowChoice::Cancel,
            vec![ManageCommand::RemoveDevice { target: key(1) }],
        );

        let exit = h.orchestrator.run().await.unwrap();

        assert_eq!(exit, ManageExit::SessionRestarted);
    }

    #[tokio::test]
    async fn run_closes_when_input_is_exhausted() {
        let h = harness(vec![Device::authentication("laptop", key(1))], key(1));

        let exit = h.orchestrator.run().await.unwrap();

        assert_eq!(exit, ManageExit::Closed);
    }
}
