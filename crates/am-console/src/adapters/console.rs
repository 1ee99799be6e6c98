//! Line-oriented terminal front-end for the management page.
//!
//! Everything here reads from an [`AsyncBufRead`] and writes to an
//! [`AsyncWrite`], so the same adapter drives stdin/stdout in the binary and
//! in-memory buffers in tests.

use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::warn;

use am_core::manage::{AddFlowChoice, DeviceListItem, ErrorDialog, ManageCommand, ManageView, Notice};
use am_core::ports::{
    AddFlowChooserPort, CommandSourcePort, ConfirmPort, ErrorDisplayPort, ManageViewPort, NoticePort,
};
use am_core::recovery::{RecoveryPosture, RECOVERY_NAG_MESSAGE, RECOVERY_NAG_TITLE};

const COMMAND_HELP: &str = "Commands: add | recovery | remove <n> | refresh | quit";

pub struct ConsoleIo<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl<R, W> ConsoleIo<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    pub async fn write(&self, text: &str) -> io::Result<()> {
        let mut output = self.output.lock().await;
        output.write_all(text.as_bytes()).await?;
        output.flush().await
    }

    /// Trimmed line, or `None` at end of input.
    pub async fn read_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.lock().await.read_line(&mut line).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub async fn prompt(&self, question: &str) -> io::Result<Option<String>> {
        self.write(question).await?;
        self.read_line().await
    }

    /// Write, logging instead of failing: a broken terminal must not abort a flow.
    async fn say(&self, text: &str) {
        if let Err(err) = self.write(text).await {
            warn!(error = %err, "console write failed");
        }
    }

    async fn wait_for_enter(&self, label: &str) {
        if let Err(err) = self.prompt(&format!("Press Enter to {label}. ")).await {
            warn!(error = %err, "console read failed");
        }
    }
}

impl<R> ConsoleIo<R, Vec<u8>> {
    /// Everything written so far.
    pub async fn written(&self) -> String {
        String::from_utf8_lossy(&self.output.lock().await).into_owned()
    }
}

/// Rows in the order they are numbered on screen.
fn numbered_rows(view: &ManageView) -> Vec<DeviceListItem> {
    view.devices
        .iter()
        .cloned()
        .chain(view.recovery_devices().into_iter().flatten())
        .collect()
}

pub fn format_view(view: &ManageView) -> String {
    let mut out = format!("\nIdentity Anchor {}\n\nAdded devices\n", view.anchor);
    let mut number = 0;
    for item in &view.devices {
        number += 1;
        out.push_str(&format!("  [{number}] {}\n", item.alias));
    }
    if view.devices.is_empty() {
        out.push_str("  (none)\n");
    }

    match &view.posture {
        RecoveryPosture::Nag => {
            out.push_str(&format!("\n! {RECOVERY_NAG_TITLE}\n  {RECOVERY_NAG_MESSAGE}\n"));
        }
        RecoveryPosture::RecoveryList { .. } => {
            out.push_str("\nRecovery mechanisms\n");
            for item in view.recovery_devices().into_iter().flatten() {
                number += 1;
                out.push_str(&format!("  [{number}] {}\n", item.alias));
            }
        }
    }
    out.push_str(&format!(
        "  > {} (type \"recovery\")\n\n{COMMAND_HELP}\n",
        view.posture.add_recovery_label()
    ));
    out
}

pub fn parse_command(input: &str, view: &ManageView) -> Result<ManageCommand, String> {
    let mut words = input.split_whitespace();
    let command = match (words.next(), words.next()) {
        (Some("add"), None) => ManageCommand::AddDevice,
        (Some("recovery"), None) => ManageCommand::AddRecovery,
        (Some("refresh"), None) => ManageCommand::Refresh,
        (Some("quit" | "q" | "exit"), None) => ManageCommand::Close,
        (Some("remove"), Some(index)) => {
            let rows = numbered_rows(view);
            let item = index
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| rows.get(i))
                .ok_or_else(|| format!("No device numbered {index}."))?;
            item.remove.clone()
        }
        _ => return Err(format!("Unknown command \"{input}\". {COMMAND_HELP}")),
    };
    if words.next().is_some() {
        return Err(format!("Unknown command \"{input}\". {COMMAND_HELP}"));
    }
    Ok(command)
}

pub fn format_error(dialog: &ErrorDialog) -> String {
    format!(
        "\nError: {}\n  {}\n  Details: {}\n",
        dialog.title, dialog.message, dialog.detail
    )
}

#[async_trait]
impl<R, W> ManageViewPort for ConsoleIo<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn render(&self, view: &ManageView) {
        self.say(&format_view(view)).await;
    }
}

#[async_trait]
impl<R, W> CommandSourcePort for ConsoleIo<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn next_command(&self, view: &ManageView) -> Option<ManageCommand> {
        loop {
            let line = match self.prompt("> ").await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(err) => {
                    warn!(error = %err, "console read failed");
                    return None;
                }
            };
            if line.is_empty() {
                continue;
            }
            match parse_command(&line, view) {
                Ok(command) => return Some(command),
                Err(message) => self.say(&format!("{message}\n")).await,
            }
        }
    }
}

#[async_trait]
impl<R, W> ConfirmPort for ConsoleIo<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn confirm(&self, message: &str) -> bool {
        match self.prompt(&format!("{message} Continue? [y/N] ")).await {
            Ok(Some(answer)) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "console read failed");
                false
            }
        }
    }
}

#[async_trait]
impl<R, W> NoticePort for ConsoleIo<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn notice(&self, notice: Notice) {
        self.say(&format!("\n{}\n", notice.message())).await;
        self.wait_for_enter("continue").await;
    }
}

#[async_trait]
impl<R, W> ErrorDisplayPort for ConsoleIo<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn show_error(&self, dialog: &ErrorDialog) {
        self.say(&format_error(dialog)).await;
        self.wait_for_enter(&dialog.primary_button.to_lowercase()).await;
    }
}

#[async_trait]
impl<R, W> AddFlowChooserPort for ConsoleIo<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn choose(&self) -> AddFlowChoice {
        let answer = self
            .prompt("\nAdd a new device: [l]ocal authenticator, [r]emote device, [c]ancel: ")
            .await;
        match answer {
            Ok(Some(answer)) => match answer.to_ascii_lowercase().as_str() {
                "l" | "local" => AddFlowChoice::Local,
                "r" | "remote" => AddFlowChoice::Remote,
                _ => AddFlowChoice::Cancel,
            },
            Ok(None) => AddFlowChoice::Cancel,
            Err(err) => {
                warn!(error = %err, "console read failed");
                AddFlowChoice::Cancel
            }
        }
    }
}
