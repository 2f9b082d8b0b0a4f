// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::{ExportFormat, ExportOptions};
use crate::csv::outcomes_to_string;
use crate::data::{SearchOutcome, simplify};
use crate::error::{Error, Result};

/// Write `outcomes` in the format and place `export` describes.
/// Returns the final path written to.
pub fn export(export: &ExportOptions, outcomes: &[SearchOutcome]) -> Result<PathBuf> {
    let path = export.out_path();
    match export.format.delim() {
        Some(sep) => write_table(&path, outcomes, sep)?,
        None => write_json(&path, outcomes)?,
    }
    Ok(path)
}

/// CSV/TSV with a header row; one row per outcome.
pub fn write_table(path: &Path, outcomes: &[SearchOutcome], sep: char) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, outcomes_to_string(outcomes, sep))?;
    Ok(())
}

/// Pretty JSON array of `{query, found, organization?, error?}`.
pub fn write_json(path: &Path, outcomes: &[SearchOutcome]) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_string_pretty(outcomes)?)?;
    Ok(())
}

/// Pretty JSON array of simplified records, one per outcome.
pub fn write_simple_json(path: &Path, outcomes: &[SearchOutcome]) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_string_pretty(&simplify(outcomes))?)?;
    Ok(())
}

/// Guess the export format from a file extension (`.csv`, `.tsv`, `.json`).
pub fn format_for(path: &Path) -> Option<ExportFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "csv" => Some(ExportFormat::Csv),
        "tsv" | "tab" => Some(ExportFormat::Tsv),
        "json" => Some(ExportFormat::Json),
        _ => None,
    }
}

/// Names from a text file, one per line; blank lines are skipped.
pub fn read_names(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(Error::Config(format!("input file not found: {}", path.display())));
    }
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Config(format!("path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
