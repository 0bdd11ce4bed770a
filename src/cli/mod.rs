//! Command-line interface for folder-census
//!
//! Provides `scan`, `measure`, `tree` and `completions` subcommands.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod guided;
mod measure;
mod scan;
mod tree;
mod utils;

/// Measure personal folder collections and export an anonymized summary
#[derive(Parser)]
#[command(name = "folder-census")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk one or more folders, anonymize and export the collection
    Scan(Box<scan::ScanArgs>),

    /// Measure previously exported collections against typical ranges
    Measure(measure::MeasureArgs),

    /// Print the folder tree of a directory or an export file
    Tree(tree::TreeArgs),

    /// Generate a shell completion script
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.verbose, rust_log.as_deref()))
        .try_init();

    match cli.command {
        Commands::Scan(args) => scan::run(*args),
        Commands::Measure(args) => measure::run(args),
        Commands::Tree(args) => tree::run(args),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "folder-census",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// RUST_LOG directives win when set; otherwise WARN, or DEBUG with `--verbose`.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or_default())
}
