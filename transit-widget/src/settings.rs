//! Process settings from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

/// Where widget configuration documents live by default.
const DEFAULT_CONFIG_DIR: &str = "widget-configs";

/// Default listen address for the HTTP service.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Error reading settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {message}")]
pub struct SettingsError {
    var: &'static str,
    message: String,
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Search-only key for the station index.
    pub trippoint_api_key: String,
    pub trippoint_app_id: String,
    /// Overrides the station index host derived from the app id.
    pub trippoint_base_url: Option<String>,
    /// Overrides the trip planner host.
    pub tripplanner_base_url: Option<String>,
    pub config_dir: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`, which returns a variable's value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let trippoint_api_key = non_empty("TRIPPOINT_API_KEY").unwrap_or_else(|| {
            warn!("TRIPPOINT_API_KEY not set; station lookups will fail");
            String::new()
        });
        let trippoint_app_id = non_empty("TRIPPOINT_APP_ID").unwrap_or_else(|| {
            warn!("TRIPPOINT_APP_ID not set; station lookups will fail");
            String::new()
        });

        let bind_addr = non_empty("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| SettingsError {
                var: "BIND_ADDR",
                message: e.to_string(),
            })?;

        Ok(Self {
            trippoint_api_key,
            trippoint_app_id,
            trippoint_base_url: non_empty("TRIPPOINT_BASE_URL"),
            tripplanner_base_url: non_empty("TRIPPLANNER_BASE_URL"),
            config_dir: non_empty("WIDGET_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            bind_addr,
        })
    }

    /// Whether station lookup credentials are present.
    pub fn has_credentials(&self) -> bool {
        !self.trippoint_api_key.is_empty() && !self.trippoint_app_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, SettingsError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let settings = settings(&[]).unwrap();
        assert!(!settings.has_credentials());
        assert_eq!(settings.config_dir, PathBuf::from("widget-configs"));
        assert_eq!(settings.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(settings.trippoint_base_url, None);
        assert_eq!(settings.tripplanner_base_url, None);
    }

    #[test]
    fn reads_all_variables() {
        let settings = settings(&[
            ("TRIPPOINT_API_KEY", "key"),
            ("TRIPPOINT_APP_ID", "APP"),
            ("TRIPPOINT_BASE_URL", "http://localhost:9000"),
            ("TRIPPLANNER_BASE_URL", "http://localhost:9001"),
            ("WIDGET_CONFIG_DIR", "/tmp/widgets"),
            ("BIND_ADDR", "0.0.0.0:8080"),
        ])
        .unwrap();

        assert!(settings.has_credentials());
        assert_eq!(settings.trippoint_app_id, "APP");
        assert_eq!(
            settings.trippoint_base_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(
            settings.tripplanner_base_url.as_deref(),
            Some("http://localhost:9001")
        );
        assert_eq!(settings.config_dir, PathBuf::from("/tmp/widgets"));
        assert_eq!(settings.bind_addr.port(), 8080);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let settings = settings(&[("TRIPPOINT_API_KEY", "  "), ("WIDGET_CONFIG_DIR", "")]).unwrap();
        assert!(settings.trippoint_api_key.is_empty());
        assert_eq!(settings.config_dir, PathBuf::from("widget-configs"));
    }

    #[test]
    fn invalid_bind_addr() {
        let err = settings(&[("BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid value for BIND_ADDR"));
    }
}
