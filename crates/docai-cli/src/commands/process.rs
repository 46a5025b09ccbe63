//! Process command - extract structured invoice data from a single file.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use clap::Args;
use tracing::debug;

use docai_core::output::{structured_output_path, write_json};
use docai_core::{
    DocAiError, DocumentAiClient, DocumentProcessor, InputError, InvoiceNormalizer, MimeType, RawDocument,
    ResponseNormalizer,
};

use crate::report::Reporter;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or image); prompted for when omitted
    input: Option<PathBuf>,

    /// Output file (default: <output-dir>/<stem>_structured_<YYYYMMDD>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output directory, relative to the project root
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
}

pub async fn run(args: ProcessArgs, root: &Path, reporter: &Reporter) -> anyhow::Result<()> {
    let start = Instant::now();
    reporter.banner("Google Document AI - Starting");

    let config = super::resolve_config(root, reporter)?;
    let client = DocumentAiClient::new(&config)?;
    reporter.ok("Document AI client ready");

    let input = match args.input {
        Some(path) => path,
        None => prompt_for_path(reporter)?,
    };
    reporter.info(format!("Input file: {}", input.display()));

    if !input.exists() {
        return Err(InputError::FileNotFound { path: input }.into());
    }

    let mime_type = MimeType::from_path(&input);
    reporter.info(format!("MIME type: {}", mime_type));
    if !mime_type.is_supported() {
        return Err(InputError::UnsupportedMimeType { path: input }.into());
    }

    let raw = RawDocument::from_path(&input)?;
    reporter.info(format!("File size: {} bytes", group_thousands(raw.len())));
    reporter.info(format!("Processor: {}", client.processor_name()));
    reporter.info("Sending request to Document AI...");

    let pb = super::spinner("Waiting for Document AI...");
    let processed = client.process(&raw).await;
    pb.finish_and_clear();
    let processed = processed.map_err(DocAiError::from)?;
    reporter.ok("OCR processing completed successfully");

    debug!(
        "Document has {} chars of text and {} entities",
        processed.document.text.len(),
        processed.document.entities.len()
    );

    let result = ResponseNormalizer::new().normalize(&processed.document.entities);
    debug!("Normalized {} entities", result.entity_count());

    let output_path = args.output.unwrap_or_else(|| {
        structured_output_path(&root.join(&args.output_dir), &input, Local::now().date_naive())
    });
    write_json(&output_path, &result)?;

    reporter.ok(format!("Transaction ID: {}", result.transaction_id));
    println!("TRANSACTION_ID:{}", result.transaction_id);
    println!("Structured JSON saved to: {}", output_path.display());
    reporter.banner("SUCCESS");

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Ask for the input path on stdin, stripping surrounding quotes.
fn prompt_for_path(reporter: &Reporter) -> anyhow::Result<PathBuf> {
    print!("{} Enter the file path (image or PDF): ", reporter.prefix());
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let cleaned = line.trim().trim_matches('"');
    if cleaned.is_empty() {
        return Err(InputError::Empty.into());
    }
    Ok(PathBuf::from(cleaned))
}

/// `1234567` -> `1,234,567`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
