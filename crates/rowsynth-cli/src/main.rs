use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rowsynth_augment::{AugmentEngine, AugmentError, AugmentOptions, TimeZoneSpec};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error("augment error: {0}")]
    Augment(#[from] AugmentError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "rowsynth", version, about = "Rowsynth CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append synthetic columns to a delimited file.
    Augment(AugmentArgs),
}

#[derive(Args, Debug)]
struct AugmentArgs {
    /// Source delimited file; the first line is the header.
    #[arg(value_name = "INPUT", default_value = "shuihu.csv")]
    input: PathBuf,
    /// Destination file, created or overwritten.
    #[arg(value_name = "OUTPUT", default_value = "shuihu1.csv")]
    output: PathBuf,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Timezone for timestamp fields: local, utc, or a fixed offset such as +08:00.
    #[arg(long, default_value_t = TimeZoneSpec::Local)]
    timezone: TimeZoneSpec,
    /// Skip post-generation verification.
    #[arg(long, default_value_t = false)]
    no_verify: bool,
    /// Suppress echoing augmented lines to stdout.
    #[arg(long, default_value_t = false)]
    quiet: bool,
    /// Optional path for the run report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Augment(args) => run_augment(args),
    }
}

fn init_logging() -> Result<(), CliError> {
    // Logs go to stderr so the stdout echo stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

fn run_augment(args: AugmentArgs) -> Result<(), CliError> {
    let AugmentArgs {
        input,
        output,
        seed,
        timezone,
        no_verify,
        quiet,
        report,
    } = args;

    let options = AugmentOptions {
        input,
        output,
        seed,
        timezone,
        verify: !no_verify,
    };

    let engine = AugmentEngine::new(options);
    let summary = if quiet {
        engine.run_with_echo(&mut io::sink())?
    } else {
        engine.run()?
    };

    if let Some(path) = report {
        std::fs::write(&path, serde_json::to_vec_pretty(&summary)?)?;
        info!(report = %path.display(), "run report written");
    }

    Ok(())
}
