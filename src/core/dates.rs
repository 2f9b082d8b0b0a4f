// src/core/dates.rs
//
// Registration dates arrive either as ISO strings (JSON sources) or as
// Russian long-form text on rendered pages ("12 мая 2010 г.").

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

/// ISO date or date-time, with or without offset. Offsets are dropped
/// (local wall-clock time is kept).
pub fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() { return None; }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)
}

/// "12 мая 2010 г." → 2010-05-12T00:00. Unknown month names fall back to January.
pub fn parse_ru_long(s: &str) -> Option<NaiveDateTime> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() < 3 { return None; }

    let day: u32 = parts[0].parse().ok()?;
    let month_name = parts[1].to_lowercase();
    let month = MONTHS_GENITIVE
        .iter()
        .position(|m| *m == month_name)
        .map(|i| i as u32 + 1)
        .unwrap_or(1);
    let year: i32 = parts[2].trim_end_matches(['г', '.']).parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}
