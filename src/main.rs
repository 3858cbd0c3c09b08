use anyhow::Result;
use clap::Parser;

use cmtl_cli::cli::commands::{configure, translate};
use cmtl_cli::cli::{Args, Command};
use cmtl_cli::config::ResolveOptions;
use cmtl_cli::error::exit_code_for;
use cmtl_cli::output::{self, OutputConfig};
use cmtl_cli::translation::print_languages;
use cmtl_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    output::init(OutputConfig::from_flags(args.quiet, args.no_color));

    if let Err(e) = run(args).await {
        eprintln!("{} {e:#}", Style::error("Error:"));
        std::process::exit(exit_code_for(&e));
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        None => {
            let (Some(input_dir), Some(output_dir)) = (args.input_dir, args.output_dir) else {
                anyhow::bail!("Both <INPUT_DIR> and <OUTPUT_DIR> are required");
            };

            let options = translate::TranslateOptions {
                input_dir,
                output_dir,
                resolve: ResolveOptions {
                    from: args.from,
                    to: args.to,
                    marker: args.marker,
                    chunk_size: args.chunk_size,
                    delay_ms: args.delay_ms,
                    timeout_secs: args.timeout_secs,
                    endpoint: args.endpoint,
                    app_id: args.app_id,
                    secret_key: args.secret_key,
                },
                recursive: args.recursive,
                overwrite: args.overwrite,
                no_cache: args.no_cache,
                dry_run: args.dry_run,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}
