mod analyze;
mod cli;
mod config;
mod error;
mod feed;
mod report;
mod types;

use crate::error::PulseError;
use chrono::Utc;
use clap::Parser;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const PARTIAL: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<i32, PulseError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let cfg = config::load_config(&cwd)?;

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let options = analyze::AnalyzeOptions {
                limit: cmd.limit.or_else(|| cfg.feed_limit()),
                skip_archived: cmd.skip_archived || cfg.skip_archived(),
            };
            let feed = feed::load_feed(&cmd.feed)?;
            tracing::info!(
                "analyzing {} of {} repositories",
                options
                    .limit
                    .map(|limit| limit.min(feed.repositories.len()))
                    .unwrap_or(feed.repositories.len()),
                feed.repositories.len()
            );

            let report = analyze::analyze_feed(&feed, &options, Utc::now());
            let rendered = report::render(&report, resolve_format(cmd.format, &cfg))?;
            println!("{rendered}");

            if report.skipped.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::PARTIAL)
            }
        }
        cli::Commands::Developers(cmd) => {
            let options = analyze::AnalyzeOptions {
                limit: cmd.limit.or_else(|| cfg.feed_limit()),
                skip_archived: cmd.skip_archived || cfg.skip_archived(),
            };
            let feed = feed::load_feed(&cmd.feed)?;
            let (snapshots, skipped) = analyze::validated_snapshots(&feed, &options);

            let commits: Vec<types::feed::Commit> = snapshots
                .iter()
                .flat_map(|snapshot| snapshot.commits.iter().cloned())
                .collect();
            let developers = analyze::activity::developer_activity(&commits, Utc::now());
            let rendered = report::render_developers(&developers, resolve_format(cmd.format, &cfg))?;
            println!("{rendered}");

            if skipped.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::PARTIAL)
            }
        }
        cli::Commands::Validate(cmd) => {
            let feed = feed::load_feed(&cmd.feed)?;
            let mut failures = 0usize;
            for raw in &feed.repositories {
                match feed::validate_repo(raw) {
                    Ok(snapshot) => {
                        println!("ok: {} ({} commits)", raw.name, snapshot.commits.len());
                    }
                    Err(err) => {
                        failures += 1;
                        println!("error: {err}");
                    }
                }
            }

            if failures == 0 {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::PARTIAL)
            }
        }
    }
}

fn resolve_format(flag: Option<cli::ReportFormat>, cfg: &config::PulseConfig) -> report::OutputFormat {
    match flag {
        Some(cli::ReportFormat::Json) => report::OutputFormat::Json,
        Some(cli::ReportFormat::Md) => report::OutputFormat::Md,
        None => match cfg.output_format() {
            Some(config::ConfigFormat::Json) => report::OutputFormat::Json,
            _ => report::OutputFormat::Md,
        },
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
