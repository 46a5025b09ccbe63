//! CLI application for Document AI invoice processing.

mod commands;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, process};
use report::Reporter;

/// Document AI invoice processing - send documents to a processor and save the results
#[derive(Parser)]
#[command(name = "docai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project root holding docai_processor_id.txt and the input/output directories
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single invoice file into structured JSON
    Process(process::ProcessArgs),

    /// Process every supported file in the input directory
    Batch(batch::BatchArgs),

    /// Manage processor configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity; stdout is reserved for progress lines
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {}", e);
    }

    let (reporter, result) = match cli.command {
        Commands::Process(args) => {
            let reporter = Reporter::OCR;
            (reporter, process::run(args, &cli.root, &reporter).await)
        }
        Commands::Batch(args) => {
            let reporter = Reporter::DOCAI;
            (reporter, batch::run(args, &cli.root, &reporter).await)
        }
        Commands::Config(args) => {
            let reporter = Reporter::DOCAI;
            (reporter, config::run(args, &cli.root, &reporter).await)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.fatal(e);
            ExitCode::FAILURE
        }
    }
}
