// tests/cache_store.rs
mod common;

use chrono::{Duration, Local};
use org_scrape::log::Log;
use org_scrape::store::{CacheEntry, CacheStore, FileCache, NoCache};

use common::org;

fn cache_in(dir: &std::path::Path) -> FileCache {
    FileCache::new(dir.join("cache"), 7, Log::disabled())
}

#[test]
fn set_creates_directory_and_reads_back() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache_in(tmp.path());
    let rec = org("ООО Ромашка", "47.11");

    assert!(cache.get("ООО Ромашка").is_none());
    cache.set("ООО Ромашка", &rec);

    assert!(cache.dir().is_dir());
    assert!(cache.path_for("ООО Ромашка").is_file());
    assert_eq!(cache.get("ООО Ромашка"), Some(rec));
    assert!(cache.is_valid("ООО Ромашка"));
}

#[test]
fn entry_file_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache_in(tmp.path());
    cache.set("ООО Ромашка", &org("ООО Ромашка", "47.11"));

    let text = std::fs::read_to_string(cache.path_for("ООО Ромашка")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["query"], "ООО Ромашка");
    assert_eq!(v["organization"]["okved"], "47.11");
    assert!(v["cached_at"].is_string());
}

#[test]
fn staleness_is_whole_days() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache_in(tmp.path());
    let rec = org("ООО Ромашка", "47.11");
    let now = Local::now().naive_local();

    let mut entry = CacheEntry::now("old", &rec);
    entry.cached_at = now - Duration::days(8);
    cache.write_entry("old", &entry).unwrap();

    let mut entry = CacheEntry::now("recent", &rec);
    entry.cached_at = now - Duration::days(6);
    cache.write_entry("recent", &entry).unwrap();

    assert!(cache.get("old").is_none());
    assert!(cache.get("recent").is_some());

    let mut edge = CacheEntry::now("edge", &rec);
    edge.cached_at = now - Duration::days(7) - Duration::hours(1);
    assert!(!edge.is_fresh(now, 7));
    edge.cached_at = now - Duration::days(6) - Duration::hours(23);
    assert!(edge.is_fresh(now, 7));
}

#[test]
fn corrupt_file_is_a_miss() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache_in(tmp.path());
    std::fs::create_dir_all(cache.dir()).unwrap();
    std::fs::write(cache.path_for("broken"), "{ not json").unwrap();

    assert!(cache.get("broken").is_none());
    assert!(!cache.is_valid("broken"));
    assert!(cache.read_entry("broken").is_err());
}

#[test]
fn empty_name_in_cache_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache_in(tmp.path());
    std::fs::create_dir_all(cache.dir()).unwrap();
    let body = format!(
        r#"{{"cached_at":"{}","query":"q","organization":{{"name":"  "}}}}"#,
        Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S")
    );
    std::fs::write(cache.path_for("q"), body).unwrap();

    assert!(cache.get("q").is_none());
}

#[test]
fn keys_collapse_to_sanitized_stems() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = cache_in(tmp.path());
    assert_eq!(cache.path_for("ООО «Ромашка»"), cache.path_for("ООО Ромашка"));
    assert_eq!(cache.path_for("a/b"), cache.dir().join("ab.json"));

    cache.set("ООО «Ромашка»", &org("ООО «Ромашка»", "47.11"));
    assert_eq!(cache.get("ООО Ромашка").unwrap().name, "ООО «Ромашка»");
}

#[test]
fn no_cache_never_hits() {
    let cache = NoCache;
    cache.set("x", &org("x", "47"));
    assert!(cache.get("x").is_none());
    assert!(!cache.is_valid("x"));
}
