//! Output file naming and writing.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Suffix of batch outputs holding the full processor document.
pub const PROCESSED_SUFFIX: &str = "_processed.json";

fn stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// `<output_dir>/<stem>_processed.json`
pub fn processed_output_path(output_dir: &Path, input: &Path) -> PathBuf {
    output_dir.join(format!("{}{}", stem(input), PROCESSED_SUFFIX))
}

/// `<output_dir>/<stem>_structured_<YYYYMMDD>.json`
pub fn structured_output_path(output_dir: &Path, input: &Path, date: NaiveDate) -> PathBuf {
    output_dir.join(format!(
        "{}_structured_{}.json",
        stem(input),
        date.format("%Y%m%d")
    ))
}

/// Write `value` as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    debug!("Wrote {}", path.display());
    Ok(())
}
