//! # Configuration Loader
//!
//! Reads the TOML configuration file and maps it onto the [`AppConfig`] DTO.
//!
//! ## Prohibited
//!
//! - No validation logic
//! - No default value logic
//!
//! > **Pure data loading only. Accept whatever is in the file.**

use anyhow::Context;
use std::path::PathBuf;

use am_core::config::AppConfig;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// Missing sections and keys come back as empty values; they are facts, not
/// errors. Fallbacks are applied by the caller.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            [anchor]
            user_number = 10000

            [connection]
            endpoint = "http://127.0.0.1:4943"
            request_timeout_secs = 30

            [session]
            store_path = "/tmp/am/session.json"
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.anchor, "10000");
        assert_eq!(config.connection_endpoint, "http://127.0.0.1:4943");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.session_store_path, PathBuf::from("/tmp/am/session.json"));
        assert_eq!(config.log_directory, PathBuf::new());
    }

    #[test]
    fn test_load_config_does_not_validate_anchor() {
        // Not a number: still a fact as far as loading goes
        let temp_file = write_config("[anchor]\nuser_number = \"not-a-number\"\n");

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.anchor, "not-a-number");
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let result = load_config(PathBuf::from("/this/path/does/not/exist/config.toml"));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_returns_parse_error_on_invalid_toml() {
        let temp_file = write_config("[anchor\nuser_number = ");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }
}
