use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{APP_ID_ENV, SECRET_KEY_ENV};

#[derive(Parser, Debug)]
#[command(name = "cmtl")]
#[command(about = "Translate Chinese source-code comments with the Baidu translation API")]
#[command(version)]
#[command(subcommand_negates_reqs = true)]
pub struct Args {
    /// Directory containing the source files to translate
    ///
    /// A directory named like a subcommand (`languages`, `configure`) must be
    /// written as a path (`./languages`) or placed after `--`.
    #[arg(required = true)]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the translated files (mirrors the input layout)
    #[arg(required = true)]
    pub output_dir: Option<PathBuf>,

    /// Source language code (Baidu codes, e.g., zh, auto)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language code (Baidu codes, e.g., en, jp, kor)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Baidu translation app id
    #[arg(long, env = APP_ID_ENV)]
    pub app_id: Option<String>,

    /// Baidu translation secret key
    #[arg(long, env = SECRET_KEY_ENV, hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Translation API endpoint URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Comment marker; text from its first occurrence onward is translated
    #[arg(short = 'm', long)]
    pub marker: Option<String>,

    /// Character budget per batch of lines read
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Minimum pause between API calls in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// HTTP timeout in seconds
    #[arg(long = "timeout")]
    pub timeout_secs: Option<u64>,

    /// Descend into subdirectories
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Replace output files instead of appending to them
    #[arg(long)]
    pub overwrite: bool,

    /// Disable the translation cache
    #[arg(short = 'n', long)]
    pub no_cache: bool,

    /// List the Chinese spans that would be translated, without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output (warnings and errors are still shown)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported language codes
    Languages,
    /// Configure default languages and credentials
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
