//! Console versions of the add-device, recovery and registration flows.

use std::sync::Arc;

use anyhow::{bail, Context};
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::info;

use am_core::device::{Device, DeviceAlias, DevicePurpose, DeviceSet, PublicKey};
use am_core::ports::{
    ConnectionPort, LocalDeviceAddPort, RecoverySetupPort, TentativeDevicePollerPort,
};
use am_core::Anchor;

use super::console::ConsoleIo;

/// Asks for an alias and a public key, then registers the device.
///
/// Returns `Ok(None)` when the user leaves either answer empty.
async fn prompt_device<R, W>(
    console: &ConsoleIo<R, W>,
    alias_question: &str,
    purpose: DevicePurpose,
) -> anyhow::Result<Option<Device>>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let alias = match console.prompt(alias_question).await? {
        Some(alias) if !alias.is_empty() => alias,
        _ => return Ok(None),
    };
    let key = match console.prompt("Public key (hex, empty to cancel): ").await? {
        Some(key) if !key.is_empty() => key,
        _ => return Ok(None),
    };
    let public_key = PublicKey::from_hex(&key).context("invalid public key")?;

    Ok(Some(Device::new(DeviceAlias::new(alias), public_key, purpose)))
}

pub struct ConsoleLocalDeviceAdd<R, W> {
    console: Arc<ConsoleIo<R, W>>,
    connection: Arc<dyn ConnectionPort>,
}

impl<R, W> ConsoleLocalDeviceAdd<R, W> {
    pub fn new(console: Arc<ConsoleIo<R, W>>, connection: Arc<dyn ConnectionPort>) -> Self {
        Self {
            console,
            connection,
        }
    }
}

#[async_trait]
impl<R, W> LocalDeviceAddPort for ConsoleLocalDeviceAdd<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn add_local_device(&self, anchor: &Anchor, existing: &DeviceSet) -> anyhow::Result<()> {
        let Some(device) = prompt_device(
            &*self.console,
            "\nName of the new device (empty to cancel): ",
            DevicePurpose::Authentication,
        )
        .await?
        else {
            return Ok(());
        };

        if existing.contains(device.public_key()) {
            bail!("this authenticator is already registered on anchor {anchor}");
        }

        info!(%anchor, alias = %device.alias(), "registering local device");
        self.connection.add(anchor, device).await?;
        Ok(())
    }
}

pub struct ConsoleRecoverySetup<R, W> {
    console: Arc<ConsoleIo<R, W>>,
    connection: Arc<dyn ConnectionPort>,
}

impl<R, W> ConsoleRecoverySetup<R, W> {
    pub fn new(console: Arc<ConsoleIo<R, W>>, connection: Arc<dyn ConnectionPort>) -> Self {
        Self {
            console,
            connection,
        }
    }
}

#[async_trait]
impl<R, W> RecoverySetupPort for ConsoleRecoverySetup<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn setup_recovery(&self, anchor: &Anchor) -> anyhow::Result<()> {
        let Some(device) = prompt_device(
            &*self.console,
            "\nName of the recovery mechanism (empty to cancel): ",
            DevicePurpose::Recovery,
        )
        .await?
        else {
            return Ok(());
        };

        info!(%anchor, alias = %device.alias(), "registering recovery device");
        self.connection.add(anchor, device).await?;
        self.console
            .write("Recovery mechanism added.\n")
            .await
            .context("console write failed")?;
        Ok(())
    }
}

/// Tells the user what is going on, then hands over to the real poller.
///
/// The store is read first: without an open registration there is nothing to
/// wait for, and the user is told how to open one instead.
pub struct ConsoleRegistrationWatcher<R, W> {
    console: Arc<ConsoleIo<R, W>>,
    connection: Arc<dyn ConnectionPort>,
    poller: Arc<dyn TentativeDevicePollerPort>,
}

impl<R, W> ConsoleRegistrationWatcher<R, W> {
    pub fn new(
        console: Arc<ConsoleIo<R, W>>,
        connection: Arc<dyn ConnectionPort>,
        poller: Arc<dyn TentativeDevicePollerPort>,
    ) -> Self {
        Self {
            console,
            connection,
            poller,
        }
    }
}

#[async_trait]
impl<R, W> TentativeDevicePollerPort for ConsoleRegistrationWatcher<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn poll_for_tentative_device(&self, anchor: &Anchor) -> anyhow::Result<()> {
        let info = self
            .connection
            .get_anchor_info(anchor)
            .await
            .with_context(|| format!("read registration state of anchor {anchor} failed"))?;

        if !info.has_pending_registration() {
            info!(%anchor, "no registration open, nothing to wait for");
            self.console
                .write(&format!(
                    "\nNo device registration is open on anchor {anchor}.\n\
                     Start adding this anchor from the new device, then choose remote again.\n"
                ))
                .await
                .context("console write failed")?;
            return Ok(());
        }

        self.console
            .write("\nA device registration is in progress. Waiting for it to finish...\n")
            .await
            .context("console write failed")?;
        self.poller.poll_for_tentative_device(anchor).await
    }
}
