//! Batch processing command for a directory of invoice files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use docai_core::output::{processed_output_path, write_json};
use docai_core::{DocumentAiClient, DocumentProcessor, InputError, MimeType, RawDocument};

use crate::report::Reporter;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory, relative to the project root
    #[arg(short, long, default_value = "input")]
    input_dir: PathBuf,

    /// Output directory, relative to the project root
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Keep going after a file fails instead of aborting the run
    #[arg(long)]
    continue_on_error: bool,

    /// Also write summary.csv to the output directory
    #[arg(long)]
    summary: bool,
}

/// Outcome of processing a single file.
struct FileOutcome {
    path: PathBuf,
    output: Option<PathBuf>,
    error: Option<String>,
    elapsed_ms: u64,
}

pub async fn run(args: BatchArgs, root: &Path, reporter: &Reporter) -> anyhow::Result<()> {
    let start = Instant::now();
    reporter.banner("Batch Document AI Processing - Starting");

    let config = super::resolve_config(root, reporter)?;
    let client = DocumentAiClient::new(&config)?;
    reporter.info(format!("Using processor: {}", client.processor_name()));

    let input_dir = root.join(&args.input_dir);
    let output_dir = root.join(&args.output_dir);

    if !input_dir.is_dir() {
        reporter.warn(format!("Input directory not found: {}", input_dir.display()));
        return Err(InputError::InputDirNotFound { path: input_dir }.into());
    }

    let files = supported_files(&input_dir)?;
    if files.is_empty() {
        reporter.warn(format!("No supported files in {}", input_dir.display()));
        return Err(InputError::NoSupportedFiles { path: input_dir }.into());
    }

    reporter.info(format!("Found {} files to process", files.len()));

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut outcomes = Vec::with_capacity(files.len());

    for path in &files {
        let name = display_name(path);
        let file_start = Instant::now();
        let result = process_file(&client, path, &output_dir).await;
        let elapsed = file_start.elapsed();

        match result {
            Ok(output) => {
                pb.suspend(|| {
                    reporter.ok(format!(
                        "{} -> {} ({:.1}s)",
                        name,
                        display_name(&output),
                        elapsed.as_secs_f64()
                    ))
                });
                outcomes.push(FileOutcome {
                    path: path.clone(),
                    output: Some(output),
                    error: None,
                    elapsed_ms: elapsed.as_millis() as u64,
                });
            }
            Err(e) => {
                pb.suspend(|| reporter.error(format!("Failed to process {}: {}", name, e)));
                outcomes.push(FileOutcome {
                    path: path.clone(),
                    output: None,
                    error: Some(e.to_string()),
                    elapsed_ms: elapsed.as_millis() as u64,
                });

                if !args.continue_on_error {
                    pb.abandon();
                    if args.summary {
                        write_summary(&output_dir, &outcomes, reporter)?;
                    }
                    anyhow::bail!(
                        "Batch aborted at {} ({} of {} files processed)",
                        name,
                        outcomes.len() - 1,
                        files.len()
                    );
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        write_summary(&output_dir, &outcomes, reporter)?;
    }

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    debug!("Batch finished in {:?}", start.elapsed());

    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, outcomes.len());
    }

    reporter.done("Document AI processing complete");
    Ok(())
}

/// Regular files in `dir` with a supported MIME type, sorted by name.
fn supported_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && MimeType::from_path(&path).is_supported() {
            files.push(path);
        } else {
            debug!("Skipping {}", path.display());
        }
    }
    files.sort();
    Ok(files)
}

/// Submit one file and store the full processor document.
async fn process_file<P: DocumentProcessor>(
    processor: &P,
    path: &Path,
    output_dir: &Path,
) -> docai_core::Result<PathBuf> {
    let raw = RawDocument::from_path(path)?;
    let processed = processor.process(&raw).await?;

    let output_path = processed_output_path(output_dir, path);
    write_json(&output_path, &processed.raw)?;
    Ok(output_path)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_summary(output_dir: &Path, outcomes: &[FileOutcome], reporter: &Reporter) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)?;
    let summary_path = output_dir.join("summary.csv");
    let mut wtr = csv::Writer::from_path(&summary_path)?;

    wtr.write_record(["filename", "status", "output", "elapsed_ms", "error"])?;

    for outcome in outcomes {
        let output = outcome
            .output
            .as_deref()
            .map(display_name)
            .unwrap_or_default();
        let status = if outcome.error.is_some() { "error" } else { "success" };

        wtr.write_record([
            display_name(&outcome.path).as_str(),
            status,
            output.as_str(),
            outcome.elapsed_ms.to_string().as_str(),
            outcome.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    reporter.ok(format!("Summary written to {}", summary_path.display()));
    Ok(())
}
