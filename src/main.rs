use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

use trainstats::{
    import_packages, init_logging, AppConfig, LogFormat, LogLevel, OutputFormat,
    TrainStatsError, TrainingKind, WorkoutPackage,
};

/// trainstats - Workout statistics calculator
///
/// Turns raw tracker packages (steps or strokes, duration, weight, ...) into
/// distance, mean speed and calories for running, sports walking and swimming.
/// Without a subcommand the three sample packages are reported.
#[derive(Parser)]
#[command(name = "trainstats")]
#[command(author = "trainstats contributors")]
#[command(version = "0.1.0")]
#[command(about = "Workout statistics calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of log output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Log format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    /// Summary output format (overrides the config file)
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute statistics for a single package
    Calc {
        /// Workout code (RUN, WLK, SWM)
        code: String,

        /// Package values in order, e.g. `15000 1 75` for RUN
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Compute statistics for every package in a CSV file
    Import {
        /// Input file path, one `CODE,value,...` row per package
        file: PathBuf,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        let message = match err.downcast_ref::<TrainStatsError>() {
            Some(trainstats_err) => trainstats_err.user_message(),
            None => format!("{:#}", err),
        };
        eprintln!("{} {}", "error:".red().bold(), message);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    config.logging.level = config.logging.level.raised_by(cli.verbose);
    init_logging(&config.logging)?;

    let format = cli.format.unwrap_or(config.output.format);

    let packages = match cli.command {
        None => config.packages,
        Some(Commands::Calc { code, values }) => {
            let kind = code.parse::<TrainingKind>().map_err(TrainStatsError::from)?;
            vec![WorkoutPackage::new(kind, values)]
        }
        Some(Commands::Import { file }) => {
            let reader = File::open(&file)
                .with_context(|| format!("Failed to open package file: {}", file.display()))?;
            import_packages(reader)?
        }
        Some(Commands::Init { force }) => {
            let path = cli.config.unwrap_or_else(AppConfig::default_config_path);
            return write_default_config(path, force);
        }
    };

    info!(count = packages.len(), ?format, "Computing workout packages");

    for package in &packages {
        let summary = package.to_record()?.compute()?;
        println!("{}", format.render(&summary)?);
    }

    Ok(())
}

/// Configuration for this invocation
///
/// A bare run is the fixed sample report, so only an explicit `--config`
/// changes it. Subcommands also pick up the file at the default path.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    match (&cli.config, &cli.command) {
        (_, Some(Commands::Init { .. })) | (None, None) => Ok(AppConfig::default()),
        (Some(path), _) => AppConfig::load_from_file(path),
        (None, Some(_)) => AppConfig::load_or_default(),
    }
}

fn write_default_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default().save_to_file(&path)?;
    info!(path = %path.display(), "Wrote default configuration");
    println!("Wrote {}", path.display());

    Ok(())
}
