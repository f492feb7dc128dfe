//! tricorder CLI
//!
//! Probe text seeds with the Spiral Path scan.
//!
//! Usage:
//!   tricorder scan "debug latency" --domain tech --max-iters 3 --output json
//!   tricorder scan "unconsented notes" --ais
//!   tricorder batch seeds.txt --out ais_quant.csv

mod args;
mod render;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tricorder_ais::{quant_report, read_seeds, AisScanner, Error as AisError};
use tricorder_core::{ScanConfig, Scanner};

use crate::args::{BatchArgs, Cli, Command, OutputFormat, ScanArgs, TuningArgs};
use crate::render::{render_text, render_trace};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tricorder=info,tricorder_core=warn,tricorder_ais=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan(args) => {
            let config = load_config(cli.config.as_deref(), &args.tuning, args.strict)?;
            run_scan(config, &args)
        }
        Command::Batch(args) => {
            let config = load_config(cli.config.as_deref(), &args.tuning, args.strict)?;
            run_batch(config, &args);
            Ok(())
        }
    }
}

/// File config if given, else environment, then command line overrides.
fn load_config(
    path: Option<&std::path::Path>,
    tuning: &TuningArgs,
    strict: bool,
) -> Result<ScanConfig, tricorder_core::Error> {
    let mut config = tuning.apply(ScanConfig::load(path)?);
    if strict {
        config.strict_tangents = true;
    }
    config.validate()?;
    Ok(config)
}

fn run_scan(config: ScanConfig, args: &ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(domain = %config.domain, max_iters = config.max_iters, ais = args.ais, "scanning seed");

    let (result, trace) = if args.ais {
        AisScanner::new(config).scan_traced(&args.seed)
    } else {
        Scanner::new(config).scan_traced(&args.seed)
    };

    match args.output {
        OutputFormat::Json => println!("{}", result.to_json_pretty()?),
        OutputFormat::Text => print!("{}", render_text(&result)),
    }
    if args.trace {
        print!("{}", render_trace(&trace));
    }

    Ok(())
}

fn run_batch(config: ScanConfig, args: &BatchArgs) {
    let seeds = match read_seeds(&args.file) {
        Ok(seeds) => seeds,
        Err(AisError::EmptyBatch) => {
            eprintln!("Error: no seeds found in {:?}", args.file);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: cannot read seeds from {:?}: {}", args.file, e);
            std::process::exit(1);
        }
    };

    tracing::info!(seeds = seeds.len(), file = %args.file.display(), "starting batch");

    let records = AisScanner::new(config).scan_batch(&seeds);
    match quant_report(&records, &args.out) {
        Ok(path) => println!("Wrote {} rows to {}", records.len(), path.display()),
        Err(e) => {
            eprintln!("Error: cannot write report to {:?}: {}", args.out, e);
            std::process::exit(1);
        }
    }
}
