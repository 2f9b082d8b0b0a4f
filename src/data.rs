// src/data.rs
//
// Record shapes.
//
// - Organization: canonical record every provider produces and the cache stores.
// - SimpleOrganization: read-only export projection, built at the public
//   boundary only and never stored.
// - SearchRequest / SearchOutcome: batch input and per-query result.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::consts::{DEFAULT_REGION, REG_DATE_FORMAT};
use crate::error::{Error, Result};

fn default_region() -> String {
    s!(DEFAULT_REGION)
}

/// Registry record for one legal entity. Only `name` is validated; everything
/// else is passed through as the source rendered it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    #[serde(default)]
    pub inn: Option<String>,
    #[serde(default)]
    pub ogrn: Option<String>,
    #[serde(default)]
    pub kpp: Option<String>,
    /// Primary OKVED code as rendered ("47.11", "4711", ...).
    #[serde(default)]
    pub okved: Option<String>,
    #[serde(default)]
    pub okved_additional: Vec<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub registration_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
}

impl Organization {
    /// Empty record for `name`; fails on an empty or blank name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let org = Self {
            name: name.into(),
            inn: None,
            ogrn: None,
            kpp: None,
            okved: None,
            okved_additional: Vec::new(),
            address: None,
            phone: None,
            email: None,
            director: None,
            registration_date: None,
            status: None,
            region: default_region(),
        };
        org.validate()?;
        Ok(org)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidRecord(s!("organization name is empty")));
        }
        Ok(())
    }

    /// Registration date as `DD.MM.YYYY`.
    pub fn reg_date_display(&self) -> Option<String> {
        self.registration_date.map(|d| d.format(REG_DATE_FORMAT).to_string())
    }
}

/// Export projection of `Organization`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleOrganization {
    pub name: String,
    pub inn: Option<String>,
    pub ogrn: Option<String>,
    pub okved: Option<String>,
    pub status: Option<String>,
    pub reg_date: Option<String>,
    pub phone_number: Option<String>,
}

impl SimpleOrganization {
    pub fn from_organization(org: &Organization) -> Self {
        Self {
            name: org.name.clone(),
            inn: org.inn.clone(),
            ogrn: org.ogrn.clone(),
            okved: org.okved.clone(),
            status: org.status.clone(),
            reg_date: org.reg_date_display(),
            phone_number: org.phone.clone(),
        }
    }

    /// Row for a name nothing was resolved for: name only.
    pub fn not_found(name: &str) -> Self {
        Self {
            name: s!(name),
            inn: None,
            ogrn: None,
            okved: None,
            status: None,
            reg_date: None,
            phone_number: None,
        }
    }
}

impl From<&Organization> for SimpleOrganization {
    fn from(org: &Organization) -> Self {
        Self::from_organization(org)
    }
}

/// Batch input. Duplicate names are resolved independently.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub organization_names: Vec<String>,
    #[serde(default)]
    pub okved_filter: Option<Vec<String>>,
    #[serde(default = "default_region")]
    pub region: String,
}

impl SearchRequest {
    pub fn new(names: Vec<String>) -> Self {
        Self { organization_names: names, okved_filter: None, region: default_region() }
    }

    pub fn with_filter(mut self, prefixes: Vec<String>) -> Self {
        self.okved_filter = Some(prefixes);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn filter(&self) -> &[String] {
        self.okved_filter.as_deref().unwrap_or(&[])
    }
}

/// Result for one query: `organization` iff found, `error` iff not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub query: String,
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchOutcome {
    pub fn found(query: &str, org: Organization) -> Self {
        Self { query: s!(query), found: true, organization: Some(org), error: None }
    }

    pub fn missing(query: &str, reason: impl Into<String>) -> Self {
        Self { query: s!(query), found: false, organization: None, error: Some(reason.into()) }
    }

    /// Projection used by the public entry point.
    pub fn simplified(&self) -> SimpleOrganization {
        match &self.organization {
            Some(org) => SimpleOrganization::from_organization(org),
            None => SimpleOrganization::not_found(&self.query),
        }
    }
}

pub fn simplify(outcomes: &[SearchOutcome]) -> Vec<SimpleOrganization> {
    outcomes.iter().map(SearchOutcome::simplified).collect()
}
