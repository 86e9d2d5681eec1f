use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gitpulse",
    version,
    about = "Behavioral scoring over normalized commit feeds"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every repository in a feed and render the full report
    Analyze(AnalyzeCommand),
    /// Roll up per-developer activity across the whole feed
    Developers(DevelopersCommand),
    /// Check a feed for malformed repositories without scoring it
    Validate(ValidateCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// Normalized commit feed (JSON)
    pub feed: PathBuf,

    /// Output format (default md, or [output] format from gitpulse.toml)
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Analyze at most N repositories, in feed order
    #[arg(long)]
    pub limit: Option<usize>,

    /// Ignore archived repositories
    #[arg(long)]
    pub skip_archived: bool,
}

#[derive(Args)]
pub struct DevelopersCommand {
    /// Normalized commit feed (JSON)
    pub feed: PathBuf,

    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long)]
    pub skip_archived: bool,
}

#[derive(Args)]
pub struct ValidateCommand {
    /// Normalized commit feed (JSON)
    pub feed: PathBuf,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
