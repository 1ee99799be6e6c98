//! # Dependency Injection
//!
//! The only place allowed to depend on am-infra, am-app and the console
//! adapters at the same time. Assembly only: no business decisions and no
//! configuration validation beyond what is needed to build an adapter.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::info;

use am_app::{ManageOrchestrator, ManageOrchestratorDeps};
use am_core::config::AppConfig;
use am_core::device::Device;
use am_core::ports::{ConnectionPort, SessionStorePort};
use am_infra::{HttpConnection, InMemoryAnchorDirectory, RegistrationPoller, SessionIdentity, StoredSession};

use crate::adapters::{ConsoleIo, ConsoleLocalDeviceAdd, ConsoleRecoverySetup, ConsoleRegistrationWatcher};

pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Connection initialization failed: {0}")]
    ConnectionInit(String),
}

/// Remote store when an endpoint is configured, otherwise an in-memory
/// directory holding only the session's own anchor and device.
pub fn create_connection(
    config: &AppConfig,
    session: &StoredSession,
) -> WiringResult<Arc<dyn ConnectionPort>> {
    if config.connection_endpoint.is_empty() {
        info!(anchor = %session.anchor, "no endpoint configured, using offline directory");
        let directory = InMemoryAnchorDirectory::new().with_anchor(
            session.anchor.clone(),
            vec![Device::authentication("This device", session.public_key.clone())],
        );
        return Ok(Arc::new(directory));
    }

    let timeout = match config.request_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let connection = HttpConnection::new(config.connection_endpoint.clone(), timeout)
        .map_err(|e| WiringError::ConnectionInit(format!("{e:#}")))?;
    info!(endpoint = %config.connection_endpoint, "using remote anchor store");
    Ok(Arc::new(connection))
}

/// Wire the management orchestrator for the session's anchor.
pub fn wire_manage<R, W>(
    config: &AppConfig,
    session: &StoredSession,
    session_store: Arc<dyn SessionStorePort>,
    console: Arc<ConsoleIo<R, W>>,
) -> WiringResult<ManageOrchestrator>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let connection = create_connection(config, session)?;

    let poller = Arc::new(RegistrationPoller::new(
        connection.clone(),
        Duration::from_millis(config.registration_poll_interval_ms),
    ));

    let deps = ManageOrchestratorDeps {
        connection: connection.clone(),
        identity: Arc::new(SessionIdentity::from_session(session)),
        session_store,
        add_flow_chooser: console.clone(),
        local_device_add: Arc::new(ConsoleLocalDeviceAdd::new(console.clone(), connection.clone())),
        tentative_poller: Arc::new(ConsoleRegistrationWatcher::new(
            console.clone(),
            connection.clone(),
            poller,
        )),
        recovery_setup: Arc::new(ConsoleRecoverySetup::new(console.clone(), connection)),
        view: console.clone(),
        error_display: console.clone(),
        confirm: console.clone(),
        notice: console.clone(),
        commands: console,
    };

    Ok(ManageOrchestrator::new(session.anchor.clone(), deps))
}
