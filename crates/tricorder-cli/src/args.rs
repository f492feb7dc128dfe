//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use tricorder_ais::DEFAULT_REPORT_FILE;
use tricorder_core::{Domain, ScanConfig};

#[derive(Debug, Parser)]
#[command(
    name = "tricorder",
    version,
    about = "Spiral-scan text seeds for relational chains and SRM insights",
    after_help = "Ethical note: AIS mode reports a consent factor for every seed.\n\
                  Logging: set RUST_LOG (default tricorder=info)."
)]
pub struct Cli {
    /// JSON config file (overrides TRICORDER_* environment variables)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a single seed
    Scan(ScanArgs),

    /// Scan every line of a file through the AIS wrapper and export CSV
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Context seed (query, text or dataset snippet)
    pub seed: String,

    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Run through the AIS wrapper (consent factor + tangent count)
    #[arg(long)]
    pub ais: bool,

    /// Feed only non-tangent edges into the scan
    #[arg(long, requires = "ais")]
    pub strict: bool,

    /// Print per-iteration steps after the result
    #[arg(long)]
    pub trace: bool,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// File with one seed per line
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Where to write the quant report
    #[arg(long, default_value = DEFAULT_REPORT_FILE, value_hint = ValueHint::FilePath)]
    pub out: PathBuf,

    /// Feed only non-tangent edges into each scan
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

/// Overrides applied on top of the file or environment config.
#[derive(Debug, Args, Default)]
pub struct TuningArgs {
    /// Scan domain
    #[arg(long, value_enum)]
    pub domain: Option<DomainArg>,

    /// Maximum spiral iterations
    #[arg(long)]
    pub max_iters: Option<usize>,

    /// Tangent depth (hop bound for the relational map)
    #[arg(long)]
    pub td_max: Option<usize>,
}

impl TuningArgs {
    pub fn apply(&self, mut config: ScanConfig) -> ScanConfig {
        if let Some(domain) = self.domain {
            config.domain = domain.into();
        }
        if let Some(max_iters) = self.max_iters {
            config.max_iters = max_iters;
        }
        if let Some(td_max) = self.td_max {
            config.td_max = td_max;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DomainArg {
    Tech,
    Poetic,
    Research,
}

impl From<DomainArg> for Domain {
    fn from(arg: DomainArg) -> Self {
        match arg {
            DomainArg::Tech => Domain::Tech,
            DomainArg::Poetic => Domain::Poetic,
            DomainArg::Research => Domain::Research,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
