//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{InquireError, Select, Text};

use crate::config::{
    BaiduConfig, ConfigFile, ConfigManager, DEFAULT_FROM, DEFAULT_TO, SECRET_KEY_ENV,
};
use crate::translation::{AUTO_DETECT, DEFAULT_ENDPOINT, SUPPORTED_LANGUAGES};
use crate::ui::Style;

/// Runs the configure command.
///
/// With `show`, prints the current configuration. Otherwise prompts for the
/// default languages and the credential sources and saves them.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;

    if show {
        let config = manager.load_or_default()?;
        print_configuration(&manager, &config);
        return Ok(());
    }

    match run_prompts(&manager) {
        Err(e)
            if e.downcast_ref::<InquireError>().is_some_and(|err| {
                matches!(
                    err,
                    InquireError::OperationCanceled | InquireError::OperationInterrupted
                )
            }) =>
        {
            // Ctrl+C or Escape: leave the config untouched
            println!();
            Ok(())
        }
        result => result,
    }
}

fn run_prompts(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_or_default()?;

    print_configuration(manager, &config);

    let from = select_language(
        "Default source language:",
        config.cmtl.from.as_deref().unwrap_or(DEFAULT_FROM),
        true,
    )?;
    let to = select_language(
        "Default target language:",
        config.cmtl.to.as_deref().unwrap_or(DEFAULT_TO),
        false,
    )?;

    let app_id = prompt_app_id(config.baidu.app_id.as_deref())?;

    let secret_key_env = Text::new("Environment variable holding the secret key:")
        .with_default(
            config
                .baidu
                .secret_key_env
                .as_deref()
                .unwrap_or(SECRET_KEY_ENV),
        )
        .with_help_message("The secret key itself is never written to the config file")
        .prompt()?;

    config.cmtl.from = Some(from);
    config.cmtl.to = Some(to);
    config.baidu = BaiduConfig {
        app_id: Some(app_id),
        secret_key_env: Some(secret_key_env.trim().to_string()),
        ..config.baidu
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

fn select_language(prompt: &str, default: &str, allow_auto: bool) -> Result<String> {
    let mut options: Vec<String> = Vec::new();
    if allow_auto {
        options.push(format!("{AUTO_DETECT} - Auto-detect"));
    }
    options.extend(
        SUPPORTED_LANGUAGES
            .iter()
            .map(|(code, name)| format!("{code} - {name}")),
    );

    let default_index = options
        .iter()
        .position(|option| option.split(" - ").next() == Some(default))
        .unwrap_or(0);

    let selection = Select::new(prompt, options)
        .with_starting_cursor(default_index)
        .prompt()?;

    // Extract code from "code - Name" format
    let code = selection.split(" - ").next().unwrap_or(&selection);

    Ok(code.to_string())
}

fn prompt_app_id(default: Option<&str>) -> Result<String> {
    let mut prompt = Text::new("Baidu translation app id:")
        .with_help_message("Shown in the Baidu translation developer console");

    if let Some(d) = default {
        prompt = prompt.with_default(d);
    }

    let app_id = prompt.prompt()?;

    if app_id.trim().is_empty() {
        bail!("App id cannot be empty");
    }

    Ok(app_id.trim().to_string())
}

fn print_configuration(manager: &ConfigManager, config: &ConfigFile) {
    let not_set = || Style::secondary("(not set)");

    println!(
        "{} {}",
        Style::header("Current configuration"),
        Style::secondary(manager.config_path().display())
    );
    println!(
        "  {}            {}",
        Style::label("from"),
        config.cmtl.from.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}              {}",
        Style::label("to"),
        config.cmtl.to.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}          {}",
        Style::label("marker"),
        config.cmtl.marker.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}        {}",
        Style::label("endpoint"),
        Style::value(config.baidu.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))
    );
    println!(
        "  {}          {}",
        Style::label("app_id"),
        config.baidu.app_id.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("secret_key_env"),
        config
            .baidu
            .secret_key_env
            .as_deref()
            .map_or_else(not_set, Style::value)
    );
    if config.baidu.secret_key.is_some() {
        println!(
            "  {}      {}",
            Style::label("secret_key"),
            Style::warning("(stored in config file)")
        );
    }
    println!();
}
