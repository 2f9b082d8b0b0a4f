// src/specs/mod.rs
//! # Provider specs
//!
//! One module per external source. Each spec knows **where the ground truth
//! lives** in that source's search results and detail pages, and how to turn it
//! into an [`Organization`].
//!
//! ## What lives here
//! - Query shape per source (endpoint, parameters, accepted content type).
//! - Candidate selection: the **first** search result whose rendered text
//!   mentions the requested region (case-insensitive). No ranking.
//! - Field extraction (labelled rows, fixed element ids, JSON keys). Fields the
//!   page does not carry stay `None`; nothing is defaulted.
//!
//! ## What does **not** live here
//! - Caching, OKVED filtering, provider ordering: see `engine::resolve`.
//! - Retries and timeouts: see `core::net`.
//!
//! ## Failure contract
//! A spec never fails a resolution. Network errors (after retries) and parse
//! errors are logged under the provider's handle and reported as "no data".
//! The parse functions are public so they can run offline against fixtures.

use std::sync::Arc;

use crate::config::consts::{LIST_ORG_BASE, RUSPROFILE_BASE, ZCHB_BASE};
use crate::config::NetOptions;
use crate::core::HttpClient;
use crate::data::Organization;
use crate::error::Result;
use crate::log::Log;

pub mod list_org;
pub mod rusprofile;
pub mod zchb;

pub use list_org::ListOrg;
pub use rusprofile::Rusprofile;
pub use zchb::Zchb;

/// One external registry source.
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    /// First record for `name` located in `region`, or `None`.
    /// The built-in specs always return `Ok`; the error arm exists for
    /// providers that prefer to let the resolver log and skip them.
    fn search(&self, name: &str, region: &str) -> Result<Option<Organization>>;
}

/// What a search page pointed us at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// The result card itself carried enough to build a record.
    Record(Organization),
    /// Site-relative (or absolute) link to the detail page.
    Detail(String),
}

/// Per-provider wrapper: errors become "no data" plus a log line.
pub(crate) fn no_data_on_error(log: &Log, query: &str, res: Result<Option<Organization>>) -> Option<Organization> {
    match res {
        Ok(found) => found,
        Err(e) => {
            loge!(log, query, "lookup failed: {e}");
            None
        }
    }
}

/// The built-in sources, in fixed priority order, each with its own HTTP session.
pub fn default_providers(net: &NetOptions, log: &Log) -> Result<Vec<Box<dyn Provider>>> {
    let rp = log.child(rusprofile::NAME);
    let lo = log.child(list_org::NAME);
    let zb = log.child(zchb::NAME);

    Ok(vec![
        Box::new(Rusprofile::new(Arc::new(HttpClient::new(net, rp.clone())?), RUSPROFILE_BASE, net.detail_delay, rp)),
        Box::new(ListOrg::new(Arc::new(HttpClient::new(net, lo.clone())?), LIST_ORG_BASE, net.detail_delay, lo)),
        Box::new(Zchb::new(Arc::new(HttpClient::new(net, zb.clone())?), ZCHB_BASE, zb)),
    ])
}
