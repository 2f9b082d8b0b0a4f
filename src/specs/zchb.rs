// src/specs/zchb.rs
//! Spec for zachestnyibiznes.ru (JSON search endpoint).
//!
//! `/search?query=<name>&page=1` answers `{"data": [ {...}, ... ]}`. The first
//! item whose `address` mentions the region is used as-is; there is no detail
//! page.

use std::sync::Arc;

use serde_json::Value;

use super::{Provider, no_data_on_error};
use crate::core::dates::parse_iso;
use crate::core::sanitize::{contains_ci, non_empty};
use crate::core::{Accept, Fetch};
use crate::data::Organization;
use crate::error::Result;
use crate::log::Log;

pub const NAME: &str = "zachestnyibiznes";

pub struct Zchb {
    fetch: Arc<dyn Fetch>,
    base: String,
    log: Log,
}

impl Zchb {
    pub fn new(fetch: Arc<dyn Fetch>, base: impl Into<String>, log: Log) -> Self {
        Self { fetch, base: base.into(), log }
    }

    fn lookup(&self, name: &str, region: &str) -> Result<Option<Organization>> {
        let url = join!(&self.base, "/search");
        let body = self.fetch.get(&url, &[("query", name), ("page", "1")], Accept::Json)?;
        parse_search(&body, region)
    }
}

impl Provider for Zchb {
    fn name(&self) -> &'static str {
        NAME
    }

    fn search(&self, name: &str, region: &str) -> Result<Option<Organization>> {
        Ok(no_data_on_error(&self.log, name, self.lookup(name, region)))
    }
}

/// An empty body is "no data"; malformed JSON is an error.
pub fn parse_search(body: &str, region: &str) -> Result<Option<Organization>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let root: Value = serde_json::from_str(body)?;
    let Some(items) = root.get("data").and_then(Value::as_array) else { return Ok(None) };

    let hit = items.iter().find(|item| {
        item.get("address")
            .and_then(Value::as_str)
            .is_some_and(|addr| contains_ci(addr, region))
    });
    Ok(hit.and_then(transform))
}

/// One `data[]` item. Items without a usable name are dropped.
pub fn transform(item: &Value) -> Option<Organization> {
    let mut org = Organization::new(field(item, "name")?).ok()?;
    org.inn = field(item, "inn");
    org.ogrn = field(item, "ogrn");
    org.kpp = field(item, "kpp");
    org.address = field(item, "address");
    org.status = field(item, "status");
    org.okved = field(item, "okved_code");
    org.director = field(item, "director");
    org.registration_date = item
        .get("registration_date")
        .and_then(Value::as_str)
        .and_then(parse_iso);
    Some(org)
}

/// String or number field; empty strings and nulls are absent.
fn field(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
