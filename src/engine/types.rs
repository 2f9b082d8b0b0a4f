// src/engine/types.rs
use std::fmt;

use crate::data::{Organization, SearchOutcome};

/// Why a query ended without a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unresolved {
    /// A record was found (cache or provider) but failed the OKVED filter.
    Filtered,
    /// Every provider came back empty.
    NotFound,
    /// The resolution itself blew up; caught by the batch runner.
    SearchError(String),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::Filtered => write!(f, "organization found but does not match the OKVED filter"),
            Unresolved::NotFound => write!(f, "organization not found"),
            Unresolved::SearchError(msg) => write!(f, "search error: {msg}"),
        }
    }
}

/// Where a resolved record came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Cache,
    Provider(&'static str),
}

/// Terminal state of one resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Resolved { org: Organization, source: Source },
    Unresolved(Unresolved),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }

    pub fn organization(&self) -> Option<&Organization> {
        match self {
            Resolution::Resolved { org, .. } => Some(org),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn into_organization(self) -> Option<Organization> {
        match self {
            Resolution::Resolved { org, .. } => Some(org),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn into_outcome(self, query: &str) -> SearchOutcome {
        match self {
            Resolution::Resolved { org, .. } => SearchOutcome::found(query, org),
            Resolution::Unresolved(why) => SearchOutcome::missing(query, why.to_string()),
        }
    }
}
