//! Typed errors and process exit codes.

use thiserror::Error;

/// Configuration problems detected before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Missing required configuration: '{key}'\n\n\
         Please provide it via:\n  \
         - CLI option: {flag}\n  \
         - Environment variable: {env}\n  \
         - Config file: run 'cmtl configure' or edit ~/.config/cmtl/config.toml"
    )]
    Missing {
        key: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error(
        "Invalid language code: '{0}'\n\n\
         Run 'cmtl languages' to see all supported codes."
    )]
    InvalidLanguage(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Maps an error chain to a process exit code.
///
/// Configuration errors map to `CONFIG`, filesystem errors to `IOERR`,
/// everything else to `SOFTWARE`.
pub fn exit_code_for(err: &anyhow::Error) -> exitcode::ExitCode {
    if err
        .chain()
        .any(|cause| cause.is::<ConfigError>() || cause.is::<toml::de::Error>())
    {
        exitcode::CONFIG
    } else if err.chain().any(|cause| cause.is::<std::io::Error>()) {
        exitcode::IOERR
    } else {
        exitcode::SOFTWARE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_config_error_maps_to_config_exit_code() {
        let err = anyhow::Error::new(ConfigError::InvalidLanguage("xx".to_string()));
        assert_eq!(exit_code_for(&err), exitcode::CONFIG);
    }

    #[test]
    fn test_wrapped_io_error_maps_to_ioerr() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Err::<(), _>(io)
            .context("Failed to read input directory")
            .unwrap_err();
        assert_eq!(exit_code_for(&err), exitcode::IOERR);
    }

    #[test]
    fn test_other_error_maps_to_software() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), exitcode::SOFTWARE);
    }

    #[test]
    fn test_missing_message_names_key_and_env() {
        let err = ConfigError::Missing {
            key: "app_id",
            flag: "--app-id <ID>",
            env: "CMTL_APP_ID",
        };
        let message = err.to_string();
        assert!(message.contains("app_id"));
        assert!(message.contains("CMTL_APP_ID"));
    }
}
