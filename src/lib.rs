// src/lib.rs
//! Registry lookup for Russian legal entities.
//!
//! A name goes through the local cache, then each provider in turn
//! (rusprofile, list-org, zachestnyibiznes) until one returns a record in the
//! requested region that passes the OKVED prefix filter. Batches run on a small
//! worker pool and come back in input order.

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod engine;
pub mod error;
pub mod file;
pub mod log;
pub mod progress;
pub mod runner;
pub mod service;
pub mod specs;
pub mod store;

pub use data::{Organization, SearchOutcome, SearchRequest, SimpleOrganization, simplify};
pub use error::{Error, Result};
pub use service::{OrgSearch, search_organization, search_organizations};
