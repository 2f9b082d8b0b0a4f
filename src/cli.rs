// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::config::consts::{CACHE_MAX_AGE_DAYS, DEFAULT_CACHE_DIR, DEFAULT_REGION, WORKERS};
use crate::config::{ExportFormat, ExportOptions, SearchOptions};
use crate::data::{SearchOutcome, simplify};
use crate::error::{Error, Result};
use crate::file;
use crate::log::{self, Log};
use crate::progress::Progress;
use crate::service::OrgSearch;

const RULE: &str = "============================================================";

/// Look up Russian legal entities by name across public registries.
#[derive(Debug, Parser)]
#[command(name = "org_scrape", version)]
pub struct Args {
    /// Organization names to search for
    pub names: Vec<String>,

    /// Text file with one organization name per line
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// OKVED prefix to keep (repeatable)
    #[arg(short = 'o', long = "okved", value_name = "PREFIX")]
    pub okved: Vec<String>,

    #[arg(short = 'r', long, default_value = DEFAULT_REGION)]
    pub region: String,

    #[arg(long, value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub export_tsv: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Print simplified records as JSON instead of the per-query report
    #[arg(long)]
    pub simple: bool,

    #[arg(long, value_name = "DIR", default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Neither read nor write the local cache
    #[arg(long)]
    pub no_cache: bool,

    /// Cache entries older than this many whole days are ignored
    #[arg(long, value_name = "DAYS", default_value_t = CACHE_MAX_AGE_DAYS)]
    pub cache_days: i64,

    /// Concurrent lookups
    #[arg(long, default_value_t = WORKERS)]
    pub workers: usize,

    /// Append log output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn options(&self) -> SearchOptions {
        let mut opts = SearchOptions {
            region: self.region.clone(),
            okved_filter: self.okved.clone(),
            workers: self.workers.max(1),
            ..SearchOptions::default()
        };
        opts.cache.enabled = !self.no_cache;
        opts.cache.dir = self.cache_dir.clone();
        opts.cache.max_age_days = self.cache_days;
        opts
    }

    /// Positional names first, then the file's; an empty list is an error.
    pub fn collect_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        if let Some(path) = &self.file {
            names.extend(file::read_names(path)?);
        }
        if names.is_empty() {
            return Err(Error::Config(s!("no organization names given (pass names or --file)")));
        }
        Ok(names)
    }

    fn exports(&self) -> Vec<ExportOptions> {
        [
            (ExportFormat::Csv, &self.export_csv),
            (ExportFormat::Tsv, &self.export_tsv),
            (ExportFormat::Json, &self.export_json),
        ]
        .into_iter()
        .filter_map(|(fmt, path)| path.as_ref().map(|p| ExportOptions::new(fmt, p)))
        .collect()
    }
}

/// Running counter on stderr.
struct StderrProgress {
    total: usize,
    done: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Searching {total} organization(s)…");
    }

    fn item_done(&mut self, _index: usize, outcome: &SearchOutcome) {
        self.done += 1;
        let mark = if outcome.found { "✓" } else { "✗" };
        eprintln!("[{}/{}] {mark} {}", self.done, self.total, outcome.query);
    }
}

pub fn run(args: Args) -> Result<()> {
    log::init(args.log_file.as_deref(), args.verbose)?;

    let names = args.collect_names()?;
    let svc = OrgSearch::new(&args.options(), Log::new("cli"))?;
    let request = svc.request(names);

    let mut progress = StderrProgress { total: 0, done: 0 };
    let outcomes = svc.search(&request, Some(&mut progress));

    if args.simple {
        println!("{}", serde_json::to_string_pretty(&simplify(&outcomes))?);
    } else {
        print_report(&outcomes);
    }

    for export in args.exports() {
        let path = file::export(&export, &outcomes)?;
        eprintln!("Exported {} to {}", export.format.ext(), path.display());
    }
    Ok(())
}

fn print_report(outcomes: &[SearchOutcome]) {
    let or_blank = |v: &Option<String>| v.clone().unwrap_or_else(|| s!("не указан"));

    for outcome in outcomes {
        println!("\n{RULE}");
        println!("Поиск: {}", outcome.query);

        let Some(org) = &outcome.organization else {
            println!("✗ Не найдено");
            if let Some(err) = &outcome.error {
                println!("  Ошибка: {err}");
            }
            continue;
        };

        println!("✓ Найдено: {}", org.name);
        println!("  ИНН: {}", or_blank(&org.inn));
        println!("  ОГРН: {}", or_blank(&org.ogrn));
        println!("  КПП: {}", or_blank(&org.kpp));
        println!("  ОКВЭД: {}", or_blank(&org.okved));
        if !org.okved_additional.is_empty() {
            println!("  Доп. ОКВЭД: {}", org.okved_additional.join(", "));
        }
        println!("  Адрес: {}", or_blank(&org.address));
        for (label, value) in [
            ("Телефон", &org.phone),
            ("Email", &org.email),
            ("Руководитель", &org.director),
            ("Статус", &org.status),
        ] {
            if let Some(v) = value {
                println!("  {label}: {v}");
            }
        }
        if let Some(date) = org.reg_date_display() {
            println!("  Дата регистрации: {date}");
        }
    }

    let found = outcomes.iter().filter(|o| o.found).count();
    println!("\n{RULE}");
    println!("Итого найдено: {found} из {}", outcomes.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_options() {
        let args = Args::parse_from([
            "org_scrape", "ООО Ромашка", "-o", "47", "--okved", "52",
            "--no-cache", "--cache-days", "3", "--workers", "0", "-r", "Омская область",
        ]);
        let opts = args.options();
        assert_eq!(opts.okved_filter, vec![s!("47"), s!("52")]);
        assert_eq!(opts.region, "Омская область");
        assert!(!opts.cache.enabled);
        assert_eq!(opts.cache.max_age_days, 3);
        assert_eq!(opts.workers, 1);
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["org_scrape", "x"]);
        let opts = args.options();
        assert_eq!(opts.region, DEFAULT_REGION);
        assert!(opts.cache.enabled);
        assert_eq!(opts.cache.dir, PathBuf::from(DEFAULT_CACHE_DIR));
        assert!(args.exports().is_empty());
    }

    #[test]
    fn names_from_file_and_args() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("names.txt");
        std::fs::write(&list, "ООО Альфа\n\n  ООО Бета  \n").unwrap();

        let args = Args::parse_from(["org_scrape", "ООО Гамма", "-f", list.to_str().unwrap()]);
        assert_eq!(args.collect_names().unwrap(), vec![s!("ООО Гамма"), s!("ООО Альфа"), s!("ООО Бета")]);
    }

    #[test]
    fn empty_or_missing_input_is_config_error() {
        let args = Args::parse_from(["org_scrape"]);
        assert!(matches!(args.collect_names(), Err(Error::Config(_))));

        let args = Args::parse_from(["org_scrape", "-f", "/definitely/not/here.txt"]);
        assert!(matches!(args.collect_names(), Err(Error::Config(_))));
    }

    #[test]
    fn export_flags() {
        let args = Args::parse_from(["org_scrape", "x", "--export-json", "out/r.json", "--export-csv", "r.csv"]);
        let formats: Vec<_> = args.exports().iter().map(|e| e.format).collect();
        assert_eq!(formats, vec![ExportFormat::Csv, ExportFormat::Json]);
    }
}
