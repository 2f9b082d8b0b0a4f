// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::core::net::RetryPolicy;

/// Everything a search run needs besides the names themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub region: String,
    pub okved_filter: Vec<String>,
    pub workers: usize,
    pub cache: CacheOptions,
    pub net: NetOptions,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            region: s!(DEFAULT_REGION),
            okved_filter: Vec::new(),
            workers: WORKERS,
            cache: CacheOptions::default(),
            net: NetOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheOptions {
    pub enabled: bool,
    pub dir: PathBuf,
    pub max_age_days: i64,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from(DEFAULT_CACHE_DIR),
            max_age_days: CACHE_MAX_AGE_DAYS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetOptions {
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Pause before fetching a company detail page.
    pub detail_delay: Duration,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            detail_delay: Duration::from_millis(DETAIL_PAGE_DELAY_MS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for tabular formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    path: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { format: ExportFormat::Csv, path: None }
    }
}

impl ExportOptions {
    pub fn new(format: ExportFormat, path: impl Into<PathBuf>) -> Self {
        Self { format, path: Some(path.into()) }
    }

    /// Target file. Without an explicit path: `organizations.<ext>` in the cwd.
    /// A path ending in a separator is treated as a directory.
    pub fn out_path(&self) -> PathBuf {
        let default_name = join!(DEFAULT_EXPORT_STEM, ".", self.format.ext());
        match &self.path {
            None => PathBuf::from(default_name),
            Some(p) if crate::file::looks_like_dir_hint(p) || p.is_dir() => p.join(default_name),
            Some(p) => p.clone(),
        }
    }
}
