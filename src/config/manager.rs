use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::paths;
use crate::scan::{DEFAULT_CHUNK_SIZE, DEFAULT_MARKER};
use crate::translation::{
    Credentials, DEFAULT_ENDPOINT, validate_source_language, validate_target_language,
};

pub const DEFAULT_FROM: &str = "zh";
pub const DEFAULT_TO: &str = "en";
pub const DEFAULT_DELAY_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const APP_ID_ENV: &str = "CMTL_APP_ID";
pub const SECRET_KEY_ENV: &str = "CMTL_SECRET_KEY";

/// Default settings in the `[cmtl]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CmtlConfig {
    /// Default source language.
    pub from: Option<String>,
    /// Default target language.
    pub to: Option<String>,
    /// Comment marker that starts translatable text.
    pub marker: Option<String>,
    /// Character budget per batch of lines.
    pub chunk_size: Option<usize>,
    /// Minimum pause between API calls, in milliseconds.
    pub delay_ms: Option<u64>,
    /// HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// The `[baidu]` section: endpoint and credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaiduConfig {
    /// Translation endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Application identifier stored directly in config.
    #[serde(default)]
    pub app_id: Option<String>,
    /// Environment variable name containing the application identifier.
    #[serde(default)]
    pub app_id_env: Option<String>,
    /// Secret key stored directly in config (not recommended).
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Environment variable name containing the secret key.
    #[serde(default)]
    pub secret_key_env: Option<String>,
}

impl BaiduConfig {
    /// Gets the app id, preferring the named environment variable.
    pub fn get_app_id(&self) -> Option<String> {
        env_or_value(self.app_id_env.as_deref(), self.app_id.as_ref())
    }

    /// Gets the secret key, preferring the named environment variable.
    pub fn get_secret_key(&self) -> Option<String> {
        env_or_value(self.secret_key_env.as_deref(), self.secret_key.as_ref())
    }
}

fn env_or_value(env_var: Option<&str>, value: Option<&String>) -> Option<String> {
    if let Some(env_var) = env_var
        && let Ok(found) = std::env::var(env_var)
        && !found.is_empty()
    {
        return Some(found);
    }
    value.filter(|v| !v.is_empty()).cloned()
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/cmtl/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub cmtl: CmtlConfig,
    #[serde(default)]
    pub baidu: BaiduConfig,
}

/// Resolved settings after merging CLI arguments, config file and defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub from: String,
    pub to: String,
    pub marker: String,
    pub chunk_size: usize,
    pub delay: Duration,
    pub timeout: Duration,
    pub endpoint: String,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub marker: Option<String>,
    pub chunk_size: Option<usize>,
    pub delay_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub endpoint: Option<String>,
    /// App id from `--app-id` or `CMTL_APP_ID`.
    pub app_id: Option<String>,
    /// Secret key from `--secret-key` or `CMTL_SECRET_KEY`.
    pub secret_key: Option<String>,
}

/// Resolves settings by merging CLI options with config file settings.
///
/// Priority: CLI option, then config file, then built-in default. Language
/// codes and numeric values are validated here.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig, ConfigError> {
    let file = &config_file.cmtl;

    let from = pick(&options.from, &file.from).unwrap_or_else(|| DEFAULT_FROM.to_string());
    validate_source_language(&from)?;

    let to = pick(&options.to, &file.to).unwrap_or_else(|| DEFAULT_TO.to_string());
    validate_target_language(&to)?;

    let marker = pick(&options.marker, &file.marker).unwrap_or_else(|| DEFAULT_MARKER.to_string());
    if marker.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "marker",
            reason: "must not be empty".to_string(),
        });
    }

    let chunk_size = options
        .chunk_size
        .or(file.chunk_size)
        .unwrap_or(DEFAULT_CHUNK_SIZE);
    if chunk_size == 0 {
        return Err(ConfigError::InvalidValue {
            key: "chunk_size",
            reason: "must be greater than zero".to_string(),
        });
    }

    let delay_ms = options.delay_ms.or(file.delay_ms).unwrap_or(DEFAULT_DELAY_MS);

    let timeout_secs = options
        .timeout_secs
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "timeout_secs",
            reason: "must be greater than zero".to_string(),
        });
    }

    let endpoint = pick(&options.endpoint, &config_file.baidu.endpoint)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    Ok(ResolvedConfig {
        from,
        to,
        marker,
        chunk_size,
        delay: Duration::from_millis(delay_ms),
        timeout: Duration::from_secs(timeout_secs),
        endpoint,
    })
}

/// Resolves API credentials. Only needed when translations are requested.
pub fn resolve_credentials(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<Credentials, ConfigError> {
    let app_id = options
        .app_id
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| config_file.baidu.get_app_id())
        .ok_or(ConfigError::Missing {
            key: "app_id",
            flag: "--app-id <ID>",
            env: APP_ID_ENV,
        })?;

    let secret_key = options
        .secret_key
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| config_file.baidu.get_secret_key())
        .ok_or(ConfigError::Missing {
            key: "secret_key",
            flag: "--secret-key <KEY>",
            env: SECRET_KEY_ENV,
        })?;

    Ok(Credentials { app_id, secret_key })
}

fn pick(cli: &Option<String>, file: &Option<String>) -> Option<String> {
    cli.as_ref().or(file.as_ref()).cloned()
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/cmtl/config.toml`
    /// or `~/.config/cmtl/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }
}
