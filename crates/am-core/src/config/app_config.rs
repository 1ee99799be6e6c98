//! # Pure Data Module - Data Transfer Objects Only
//!
//! Maps the TOML configuration file onto [`AppConfig`]. No validation and no
//! default value calculation happen here: a missing key becomes an empty
//! value, which is a fact, not an error. Callers decide what an empty value
//! means.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Anchor to manage, as written in the file (may be empty)
    pub anchor: String,

    /// Base URL of the anchor store. Empty selects the offline directory.
    pub connection_endpoint: String,

    /// Per-request timeout in seconds (0 = client default)
    pub request_timeout_secs: u64,

    /// Session file path (path info only, no existence check)
    pub session_store_path: PathBuf,

    /// Delay between two registration polls, in milliseconds
    pub registration_poll_interval_ms: u64,

    /// Directory for log files. Empty disables file logging.
    pub log_directory: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let int_at = |section: &str, key: &str| -> u64 {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(0)
        };

        // user_number may be written as a bare integer when it fits
        let anchor = match toml_value
            .get("anchor")
            .and_then(|a| a.get("user_number"))
        {
            Some(toml::Value::Integer(n)) => n.to_string(),
            Some(toml::Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        Ok(Self {
            anchor,
            connection_endpoint: str_at("connection", "endpoint"),
            request_timeout_secs: int_at("connection", "request_timeout_secs"),
            session_store_path: PathBuf::from(str_at("session", "store_path")),
            registration_poll_interval_ms: int_at("registration", "poll_interval_ms"),
            log_directory: PathBuf::from(str_at("logging", "directory")),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            anchor: String::new(),
            connection_endpoint: String::new(),
            request_timeout_secs: 0,
            session_store_path: PathBuf::new(),
            registration_poll_interval_ms: 0,
            log_directory: PathBuf::new(),
        }
    }

    /// Create AppConfig with system-default paths for production use
    ///
    /// The base directory is computed by the caller (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            session_store_path: data_dir.join("session.json"),
            registration_poll_interval_ms: 2_000,
            log_directory: data_dir.join("logs"),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_every_section() {
        let toml_str = r#"
            [anchor]
            user_number = "10000"

            [connection]
            endpoint = "https://identity.example.org"
            request_timeout_secs = 15

            [session]
            store_path = "/var/lib/am/session.json"

            [registration]
            poll_interval_ms = 500

            [logging]
            directory = "/var/log/am"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.anchor, "10000");
        assert_eq!(config.connection_endpoint, "https://identity.example.org");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.session_store_path, PathBuf::from("/var/lib/am/session.json"));
        assert_eq!(config.registration_poll_interval_ms, 500);
        assert_eq!(config.log_directory, PathBuf::from("/var/log/am"));
    }

    #[test]
    fn test_from_toml_returns_empty_values_when_missing() {
        let toml_value: Value = toml::from_str("[connection]\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        // Empty values are valid "facts"
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_integer_anchor_is_accepted() {
        let toml_value: Value = toml::from_str("[anchor]\nuser_number = 10042\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.anchor, "10042");
    }

    #[test]
    fn test_negative_integers_become_zero() {
        let toml_value: Value =
            toml::from_str("[registration]\npoll_interval_ms = -5\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.registration_poll_interval_ms, 0);
    }
}
