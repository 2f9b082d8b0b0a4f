// src/config/consts.rs

// Sources
pub const RUSPROFILE_BASE: &str = "https://www.rusprofile.ru";
pub const RUSPROFILE_REGION_CODE: &str = "72"; // Tyumen oblast
pub const LIST_ORG_BASE: &str = "https://www.list-org.com";
pub const ZCHB_BASE: &str = "https://zachestnyibiznes.ru";

// Search
pub const DEFAULT_REGION: &str = "Тюменская область";

// Local cache
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const CACHE_MAX_AGE_DAYS: i64 = 7;

// Net
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const RETRY_ATTEMPTS: u32 = 3;
pub const RETRY_MULTIPLIER_SECS: u64 = 1;
pub const RETRY_MIN_WAIT_SECS: u64 = 2;
pub const RETRY_MAX_WAIT_SECS: u64 = 10;
pub const DETAIL_PAGE_DELAY_MS: u64 = 1_000; // be polite

// Concurrency
pub const WORKERS: usize = 3;

// Export
pub const DEFAULT_EXPORT_STEM: &str = "organizations";
pub const REG_DATE_FORMAT: &str = "%d.%m.%Y";
