use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::cache::CacheManager;
use crate::config::{ConfigManager, ResolveOptions, resolve_config, resolve_credentials};
use crate::fs::{self, WriteMode};
use crate::output;
use crate::rewrite::{FileReport, RewriteOptions, Rewriter, scan_file};
use crate::translation::BaiduClient;
use crate::ui::Style;
use crate::{info, status, warn};

pub struct TranslateOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub resolve: ResolveOptions,
    pub recursive: bool,
    pub overwrite: bool,
    pub no_cache: bool,
    pub dry_run: bool,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    let config = resolve_config(&options.resolve, &config_file)?;

    let rewrite_options = RewriteOptions {
        from: config.from.clone(),
        to: config.to.clone(),
        marker: config.marker.clone(),
        chunk_size: config.chunk_size,
    };

    let files = fs::collect_input_files(
        &options.input_dir,
        options.recursive,
        Some(&options.output_dir),
    )?;

    if files.is_empty() {
        warn!("No files found in {}", options.input_dir.display());
        return Ok(());
    }

    if options.dry_run {
        return print_dry_run(&files, &options.input_dir, &rewrite_options);
    }

    let credentials = resolve_credentials(&options.resolve, &config_file)?;
    let client = BaiduClient::new(
        config.endpoint.clone(),
        credentials,
        config.delay,
        config.timeout,
    )?;

    let cache = if options.no_cache {
        None
    } else {
        open_cache(&config.endpoint)
    };

    let mut rewriter = Rewriter::new(&client, &rewrite_options);
    if let Some(cache) = &cache {
        rewriter = rewriter.with_cache(cache);
    }

    let mode = if options.overwrite {
        WriteMode::Overwrite
    } else {
        WriteMode::Append
    };

    let mut total = FileReport::default();
    for (index, input) in files.iter().enumerate() {
        let output_path = fs::mirror_path(input, &options.input_dir, &options.output_dir)?;

        status!(
            "{} {} {}",
            Style::header("Processing"),
            Style::value(display_relative(input, &options.input_dir)),
            Style::secondary(format!("({}/{})", index + 1, files.len()))
        );

        let (lines, report) = rewriter.rewrite_file(input).await?;
        fs::write_lines(&output_path, &lines, mode)?;
        total += report;
    }

    print_summary(files.len(), &total, &options.output_dir);
    output::flush_stderr();

    Ok(())
}

fn open_cache(endpoint: &str) -> Option<CacheManager> {
    match CacheManager::new(endpoint) {
        Ok(cache) => Some(cache),
        Err(e) => {
            warn!("Translation cache unavailable, continuing without it: {e:#}");
            None
        }
    }
}

fn print_dry_run(files: &[PathBuf], input_dir: &Path, options: &RewriteOptions) -> Result<()> {
    let mut span_count = 0;

    for file in files {
        let hits = scan_file(file, options)?;
        let name = display_relative(file, input_dir);
        for hit in &hits {
            println!(
                "{}:{} {}",
                Style::value(&name),
                Style::secondary(hit.line_no),
                Style::source(&hit.span)
            );
        }
        span_count += hits.len();
    }

    info!(
        "{} {} span(s) in {} file(s); nothing was translated or written",
        Style::header("Dry run:"),
        span_count,
        files.len()
    );

    Ok(())
}

fn print_summary(file_count: usize, total: &FileReport, output_dir: &Path) {
    info!();
    info!(
        "{} {} file(s), {} line(s), {} span(s) translated ({} from cache)",
        Style::success("Done:"),
        file_count,
        total.lines,
        total.translated,
        total.cached
    );
    if total.failed > 0 {
        warn!(
            "{} span(s) could not be translated and were left unchanged",
            total.failed
        );
    }
    info!(
        "Output written to {}",
        Style::secondary(output_dir.display())
    );
}

fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
