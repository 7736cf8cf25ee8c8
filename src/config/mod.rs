//! Configuration layer: typed settings with layered precedence
//! (default file → local file → explicit file → environment → overrides).

use std::{path::Path, str::FromStr, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "blogkit";
const ENV_PREFIX: &str = "BLOGKIT";
const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/";
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Absolute http(s) URL, always ending in `/`.
    pub base_url: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

/// Programmatic overrides applied after every file and environment source.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub api_base_url: Option<String>,
    pub api_timeout_seconds: Option<u64>,
    pub log_level: Option<String>,
    pub log_json: Option<bool>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings. `config_file`, when given, must exist.
pub fn load(
    config_file: Option<&Path>,
    overrides: &SettingsOverrides,
) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides);
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(url) = overrides.api_base_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(seconds) = overrides.api_timeout_seconds {
            self.api.timeout_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { api, logging } = raw;
        Ok(Self {
            api: build_api_settings(api)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw_url = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let mut base_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("api.base_url", format!("`{raw_url}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            format!("unsupported scheme `{}`", base_url.scheme()),
        ));
    }
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }

    let timeout_seconds = api.timeout_seconds.unwrap_or(DEFAULT_API_TIMEOUT_SECS);
    if timeout_seconds == 0 {
        return Err(LoadError::invalid(
            "api.timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(ApiSettings {
        base_url,
        timeout: Duration::from_secs(timeout_seconds),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}
