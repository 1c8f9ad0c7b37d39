//! Shared configuration for the velodash binary.
//!
//! TOML profiles merged with `VELO_`-prefixed environment variables,
//! translated into `velodash_core::ServiceConfig`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use velodash_core::ServiceConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Named service profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            profiles: HashMap::new(),
        }
    }
}

/// One named service endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Service base URL (e.g., "https://velocite.example.com").
    pub service: String,

    /// Interface language tag ("fr" or "en").
    #[serde(default = "default_language")]
    pub language: String,

    /// Per-request timeout in seconds.
    pub timeout: Option<u64>,
}

fn default_language() -> String {
    "fr".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "velocite", "velodash").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("velodash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit path (used by tests).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VELO_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Translation to ServiceConfig ────────────────────────────────────

/// Build a `ServiceConfig` from a named profile.
pub fn profile_to_service_config(
    config: &Config,
    profile_name: &str,
) -> Result<ServiceConfig, ConfigError> {
    let profile = config
        .profiles
        .get(profile_name)
        .ok_or_else(|| ConfigError::UnknownProfile {
            profile: profile_name.into(),
        })?;

    let url: url::Url = profile
        .service
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "service".into(),
            reason: format!("invalid URL: {}", profile.service),
        })?;

    Ok(ServiceConfig {
        url,
        language: profile.language.clone(),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(30)),
    })
}

/// Resolve the default profile into a `ServiceConfig`, if one exists.
pub fn default_service_config(config: &Config) -> Option<ServiceConfig> {
    let name = config.default_profile.as_deref().unwrap_or("default");
    profile_to_service_config(config, name).ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn profile_translates_to_service_config() {
        let mut config = Config::default();
        config.profiles.insert(
            "default".into(),
            Profile {
                service: "https://velocite.example.com".into(),
                language: "fr".into(),
                timeout: Some(10),
            },
        );

        let svc = profile_to_service_config(&config, "default").expect("valid profile");
        assert_eq!(svc.url.as_str(), "https://velocite.example.com/");
        assert_eq!(svc.language, "fr");
        assert_eq!(svc.timeout, Duration::from_secs(10));
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let mut config = Config::default();
        config.profiles.insert(
            "bad".into(),
            Profile {
                service: "not a url".into(),
                language: "fr".into(),
                timeout: None,
            },
        );

        assert!(matches!(
            profile_to_service_config(&config, "bad"),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn unknown_profile_is_reported() {
        let config = Config::default();
        assert!(matches!(
            profile_to_service_config(&config, "missing"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn toml_file_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "prod"

[profiles.prod]
service = "https://velocite.example.com"
language = "en"
timeout = 15
"#,
        )
        .expect("write config");

        let config = load_config_from(&path).expect("load config");
        assert_eq!(config.default_profile.as_deref(), Some("prod"));
        let svc = default_service_config(&config).expect("default profile resolves");
        assert_eq!(svc.language, "en");
    }
}
