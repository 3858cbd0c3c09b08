//! Configuration file management and setting resolution.

mod manager;

pub use manager::{
    APP_ID_ENV, BaiduConfig, CmtlConfig, ConfigFile, ConfigManager, DEFAULT_DELAY_MS,
    DEFAULT_FROM, DEFAULT_TIMEOUT_SECS, DEFAULT_TO, ResolveOptions, ResolvedConfig,
    SECRET_KEY_ENV, resolve_config, resolve_credentials,
};
