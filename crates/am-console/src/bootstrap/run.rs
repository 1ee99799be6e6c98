use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::io::BufReader;
use tracing::{info, warn};

use am_app::ManageExit;
use am_core::config::AppConfig;
use am_core::device::PublicKey;
use am_core::Anchor;
use am_infra::fs::app_data_dir;
use am_infra::{FileSessionStore, StoredSession};

use super::config::{load_config, DEFAULT_CONFIG_FILE};
use super::tracing::init_tracing_subscriber;
use super::wiring::wire_manage;
use crate::adapters::ConsoleIo;

/// Command line overrides.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub anchor: Option<String>,
    pub public_key: Option<String>,
}

/// Load the configuration, start a session and serve the management page
/// on stdin/stdout until it is left.
pub async fn run(args: RunArgs) -> anyhow::Result<ManageExit> {
    let data_dir = app_data_dir()?;
    let loaded = match &args.config {
        Some(path) => load_config(path.clone())?,
        None => {
            let default_path = data_dir.join(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load_config(default_path)?
            } else {
                AppConfig::empty()
            }
        }
    };
    let config = apply_fallbacks(loaded, AppConfig::with_system_defaults(data_dir));

    if let Err(err) = init_tracing_subscriber(&config.log_directory) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let session_store = Arc::new(FileSessionStore::new(config.session_store_path.clone()));
    let anchor = args.anchor.as_deref().or(Some(config.anchor.as_str()).filter(|a| !a.is_empty()));
    let session = resolve_session(&session_store, anchor, args.public_key.as_deref()).await?;
    info!(
        anchor = %session.anchor,
        key = %session.public_key.fingerprint(),
        "session ready"
    );

    let restart_rx = session_store.subscribe_restart();
    let console = Arc::new(ConsoleIo::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    ));
    let orchestrator = wire_manage(&config, &session, session_store.clone(), console.clone())?;

    let exit = orchestrator.run().await?;
    if exit == ManageExit::SessionRestarted && *restart_rx.borrow() {
        console
            .write("\nThis device was removed from your anchor and you have been logged out.\n")
            .await
            .context("console write failed")?;
    }
    info!(?exit, "management page left");
    Ok(exit)
}

/// Fill every empty value of `loaded` from `defaults`.
pub fn apply_fallbacks(loaded: AppConfig, defaults: AppConfig) -> AppConfig {
    fn path_or(value: PathBuf, fallback: PathBuf) -> PathBuf {
        if value.as_os_str().is_empty() {
            fallback
        } else {
            value
        }
    }

    AppConfig {
        anchor: loaded.anchor,
        connection_endpoint: loaded.connection_endpoint,
        request_timeout_secs: loaded.request_timeout_secs,
        session_store_path: path_or(loaded.session_store_path, defaults.session_store_path),
        registration_poll_interval_ms: match loaded.registration_poll_interval_ms {
            0 => defaults.registration_poll_interval_ms,
            ms => ms,
        },
        log_directory: path_or(loaded.log_directory, defaults.log_directory),
    }
}

/// Start a new session when both an anchor and a key are given, otherwise
/// resume the stored one.
pub async fn resolve_session(
    store: &FileSessionStore,
    anchor: Option<&str>,
    public_key: Option<&str>,
) -> anyhow::Result<StoredSession> {
    let anchor = anchor
        .map(|a| Anchor::from_str(a).with_context(|| format!("invalid anchor number: {a}")))
        .transpose()?;

    if let (Some(anchor), Some(public_key)) = (&anchor, public_key) {
        let public_key = PublicKey::from_hex(public_key).context("invalid public key")?;
        let session = StoredSession::new(anchor.clone(), public_key);
        store.save(&session).await?;
        return Ok(session);
    }
    if public_key.is_some() {
        bail!("--public-key needs an anchor (--anchor or [anchor] user_number)");
    }

    match store.load().await? {
        Some(stored) if anchor.as_ref().map_or(true, |a| *a == stored.anchor) => Ok(stored),
        Some(stored) => {
            warn!(stored = %stored.anchor, "stored session belongs to another anchor");
            bail!(
                "the stored session belongs to anchor {}; pass --public-key to sign in to another one",
                stored.anchor
            )
        }
        None => bail!("no session found: pass --anchor and --public-key to start one"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn fallbacks_fill_only_empty_values() {
        let loaded = AppConfig {
            anchor: "10000".to_string(),
            session_store_path: PathBuf::from("/custom/session.json"),
            ..AppConfig::empty()
        };

        let config = apply_fallbacks(loaded, AppConfig::with_system_defaults(PathBuf::from("/data")));

        assert_eq!(config.anchor, "10000");
        assert_eq!(config.session_store_path, PathBuf::from("/custom/session.json"));
        assert_eq!(config.registration_poll_interval_ms, 2_000);
        assert_eq!(config.log_directory, PathBuf::from("/data/logs"));
        assert_eq!(config.connection_endpoint, "");
    }

    #[tokio::test]
    async fn anchor_and_key_start_and_persist_a_session() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let session = resolve_session(&store, Some("10000"), Some("0a0b0c"))
            .await
            .unwrap();

        assert_eq!(session.anchor, Anchor::from(10_000));
        assert_eq!(store.load().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn stored_session_is_resumed() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let stored = StoredSession::new(Anchor::from(42), PublicKey::new(vec![1, 2]));
        store.save(&stored).await.unwrap();

        assert_eq!(resolve_session(&store, None, None).await.unwrap(), stored);
        assert_eq!(resolve_session(&store, Some("42"), None).await.unwrap(), stored);
    }

    #[tokio::test]
    async fn stored_session_for_another_anchor_is_refused() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .save(&StoredSession::new(Anchor::from(42), PublicKey::new(vec![1, 2])))
            .await
            .unwrap();

        let err = resolve_session(&store, Some("43"), None).await.unwrap_err();

        assert!(err.to_string().contains("belongs to anchor 42"));
    }

    #[tokio::test]
    async fn missing_session_is_an_error() {
        let dir = TempDir::new().unwrap();

        let err = resolve_session(&store(&dir), None, None).await.unwrap_err();

        assert!(err.to_string().contains("no session found"));
    }

    #[tokio::test]
    async fn malformed_anchor_is_rejected() {
        let dir = TempDir::new().unwrap();

        let err = resolve_session(&store(&dir), Some("-1"), Some("0a"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("invalid anchor number"));
    }
}
