//! nau-reports CLI - Export platform statistics
//!
//! Usage:
//!   nau-reports list [--config <file>]
//!   nau-reports run [--config <file>] [--report <key>]... [--output <file>] [--quiet]
//!   nau-reports ping [--config <file>]
//!
//! Examples:
//!   nau-reports run --report organizations --report users -o stats.json
//!   nau-reports run -c /etc/nau-reports.toml --quiet

use clap::{Parser, Subcommand};
use nau_reports::config::Settings;
use nau_reports::{logging, ReportEngine};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;

#[derive(Parser)]
#[command(name = "nau-reports")]
#[command(about = "Export read-only statistics from an Open edX platform database")]
#[command(version)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available reports
    List {
        /// Path to the settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Produce reports and write them as JSON
    Run {
        /// Path to the settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report key to produce (repeatable; defaults to the enabled sheets)
        #[arg(short, long = "report")]
        reports: Vec<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not log progress
        #[arg(short, long)]
        quiet: bool,
    },

    /// Check the database connection
    Ping {
        /// Path to the settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::List { config } => cmd_list(config.as_deref()),
        Commands::Run {
            config,
            reports,
            output,
            quiet,
        } => cmd_run(config.as_deref(), reports, output, quiet).await,
        Commands::Ping { config } => cmd_ping(config.as_deref()).await,
    }
}

fn load_settings(config: Option<&Path>) -> Option<Settings> {
    match Settings::load(config) {
        Ok(settings) => Some(settings),
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            None
        }
    }
}

fn build_engine(settings: Settings) -> Option<ReportEngine> {
    match ReportEngine::from_settings(settings) {
        Ok(engine) => Some(engine),
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

fn cmd_list(config: Option<&Path>) -> ExitCode {
    let Some(settings) = load_settings(config) else {
        return ExitCode::FAILURE;
    };

    let registry = match nau_reports::report::standard_registry() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let enabled = settings.sheets.enabled_keys();
    let selected: Vec<&str> = registry
        .select_default(enabled.as_deref())
        .into_iter()
        .map(|d| d.key())
        .collect();

    println!("Reports:");
    for descriptor in registry.descriptors() {
        let marker = if selected.contains(&descriptor.key()) {
            "*"
        } else {
            " "
        };
        println!("  {} {:<34} {}", marker, descriptor.key(), descriptor.title());
    }

    if let Some(keys) = &enabled {
        for key in registry.unknown_keys(keys.as_slice()) {
            warn!("Unknown report in settings: {}", key);
        }
    }

    ExitCode::SUCCESS
}

async fn cmd_run(
    config: Option<&Path>,
    reports: Vec<String>,
    output: Option<PathBuf>,
    quiet: bool,
) -> ExitCode {
    let Some(mut settings) = load_settings(config) else {
        return ExitCode::FAILURE;
    };
    if quiet {
        settings.sheets.progress = false;
    }

    let Some(engine) = build_engine(settings) else {
        return ExitCode::FAILURE;
    };

    let requested = if reports.is_empty() {
        engine.settings().sheets.enabled_keys()
    } else {
        Some(reports)
    };
    if let Some(keys) = &requested {
        for key in engine.registry().unknown_keys(keys.as_slice()) {
            warn!("Unknown report: {}", key);
        }
    }

    let result = match &requested {
        Some(keys) => engine.run(keys.as_slice()).await,
        None => engine.run_enabled().await,
    };

    let sheets = match result {
        Ok(sheets) => sheets,
        Err(e) => {
            eprintln!("Error producing reports: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let written = match &output {
        Some(path) => File::create(path).and_then(|file| write_json(BufWriter::new(file), &sheets)),
        None => write_json(io::stdout().lock(), &sheets),
    };

    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn write_json<W: Write, T: serde::Serialize>(mut writer: W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

async fn cmd_ping(config: Option<&Path>) -> ExitCode {
    let Some(settings) = load_settings(config) else {
        return ExitCode::FAILURE;
    };
    let Some(engine) = build_engine(settings) else {
        return ExitCode::FAILURE;
    };

    match engine.ping().await {
        Ok(()) => {
            println!("OK: connected to {}", engine.settings().connection.host);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Connection failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
