//! Reqlog - Django request log analyzer
//!
//! A CLI tool that scans request logs in parallel and reports how many
//! records each handler produced at every severity level.
//!
//! Exit codes:
//!   0 - Success (unreadable log files are reported but not fatal)
//!   1 - Runtime error (invalid arguments, bad config, worker failure)
//!   2 - Command-line parse error

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat, ReportKind};
use config::{Config, CONFIG_FILE_NAME};
use futures::stream::{self, StreamExt};
use report::{HandlerReport, LogReport};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is loaded before logging so `verbose = true` can raise the level
    let loaded = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(log_level(&args, &loaded.config));

    info!("Reqlog v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match (&loaded.source, &loaded.warning) {
        (_, Some(warning)) => warn!("{}", warning),
        (Some(path), None) => info!("Loaded config from {}", path.display()),
        (None, None) => debug!("No config file found, using defaults"),
    }

    if let Err(e) = run(args, loaded.config).await {
        error!("Run failed: {:#}", e);
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .reqlog.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Effective log level: `--quiet` wins, then `--verbose` or config `verbose`.
fn log_level(args: &Args, config: &Config) -> tracing::Level {
    if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Initialize logging. `REQLOG_LOG` overrides the computed level.
fn init_logging(level: tracing::Level) {
    let filter = EnvFilter::try_from_env("REQLOG_LOG").unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Configuration plus where it came from, reported once logging is up.
struct LoadedConfig {
    config: Config,
    source: Option<PathBuf>,
    warning: Option<String>,
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` that cannot be read is an error; a broken
/// default file only produces a warning.
fn load_config(args: &Args) -> Result<LoadedConfig> {
    if let Some(ref config_path) = args.config {
        return Ok(LoadedConfig {
            config: Config::load(config_path)?,
            source: Some(config_path.clone()),
            warning: None,
        });
    }

    let loaded = match Config::load_default() {
        Ok(Some(config)) => LoadedConfig {
            config,
            source: Some(PathBuf::from(CONFIG_FILE_NAME)),
            warning: None,
        },
        Ok(None) => LoadedConfig {
            config: Config::default(),
            source: None,
            warning: None,
        },
        Err(e) => LoadedConfig {
            config: Config::default(),
            source: None,
            warning: Some(format!("Failed to load config: {:#}", e)),
        },
    };

    Ok(loaded)
}

/// Run the report selected by the merged configuration.
async fn run(args: Args, mut config: Config) -> Result<()> {
    config.merge_with_args(&args);

    match config.report.kind {
        ReportKind::Handlers => {
            let report = HandlerReport {
                show_total_requests: config.report.show_total_requests,
            };
            run_report(report, &args.log_files, &config).await
        }
    }
}

/// Scan, merge, render, print and optionally save one report.
async fn run_report<R: LogReport>(report: R, files: &[PathBuf], config: &Config) -> Result<()> {
    let start_time = Instant::now();
    let concurrency = config.general.concurrency;

    info!(
        "Scanning {} log file(s) with up to {} parallel workers",
        files.len(),
        concurrency
    );

    let report = Arc::new(report);
    let overall = collect_reports(Arc::clone(&report), files.to_vec(), concurrency).await?;

    let output = match config.report.format {
        OutputFormat::Table => report.generate(&overall),
        OutputFormat::Json => report.generate_json(&overall)?,
    };

    println!("{}", output);

    if let Some(ref path) = config.report.output {
        save_report(path, &output);
    }

    debug!("Finished in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Scan every file on the blocking pool and fold results as they complete.
///
/// At most `concurrency` scans run at once. Only a failed worker task
/// (panic or cancellation) aborts the run.
async fn collect_reports<R: LogReport>(
    report: Arc<R>,
    files: Vec<PathBuf>,
    concurrency: usize,
) -> Result<R::Aggregate> {
    let mut scans = stream::iter(files)
        .map(|path| {
            let report = Arc::clone(&report);
            tokio::task::spawn_blocking(move || report.scan_file(&path))
        })
        .buffer_unordered(concurrency.max(1));

    let mut overall = report.initial_aggregate();
    while let Some(joined) = scans.next().await {
        let partial = joined.context("Log scanning task failed")?;
        report.merge(&mut overall, partial);
    }

    Ok(overall)
}

/// Write the rendered report to `path`. Failures are reported, not fatal.
fn save_report(path: &Path, content: &str) -> bool {
    match std::fs::write(path, content) {
        Ok(()) => {
            println!("\nReport saved to: {}", path.display());
            true
        }
        Err(e) => {
            error!("Failed to write report to {}: {}", path.display(), e);
            eprintln!("Error writing report to {}: {}", path.display(), e);
            false
        }
    }
}
