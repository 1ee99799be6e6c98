use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "anchor-manager";

/// Application data root directory.
///
/// - macOS: ~/Library/Application Support/anchor-manager
/// - Windows: %LOCALAPPDATA%\anchor-manager
/// - Linux: $XDG_DATA_HOME/anchor-manager or ~/.local/share/anchor-manager
///
/// The directory is not created here; callers create it when they first write.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir = platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}

fn platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_local_dir().ok_or_else(|| anyhow::anyhow!("Unable to get local data directory"))
}
