// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use org_scrape::core::{Accept, Fetch};
use org_scrape::specs::Provider;
use org_scrape::{Error, Organization, Result};

pub fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    std::fs::read_to_string(path).unwrap()
}

pub fn org(name: &str, okved: &str) -> Organization {
    let mut org = Organization::new(name).unwrap();
    org.okved = Some(okved.to_string());
    org
}

/// Canned pages keyed by URL; query pairs are ignored. Unknown URLs are 404s.
#[derive(Default)]
pub struct Pages {
    routes: Vec<(String, String)>,
    pub calls: Mutex<Vec<String>>,
}

impl Pages {
    pub fn with(mut self, url: &str, body: String) -> Self {
        self.routes.push((url.to_string(), body));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Fetch for Pages {
    fn get(&self, url: &str, _query: &[(&str, &str)], _accept: Accept) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());
        self.routes
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| Error::Status { status: 404, url: url.to_string() })
    }
}

/// What a scripted provider does for one name.
#[derive(Clone)]
pub enum Script {
    Found(Organization),
    Nothing,
    Fail,
    Panic,
}

/// Provider driven by a per-name script, with an optional per-name delay and a
/// shared call counter.
pub struct Scripted {
    pub name: &'static str,
    pub script: Vec<(String, Script)>,
    pub delays: Vec<(String, Duration)>,
    pub calls: Arc<AtomicUsize>,
}

impl Scripted {
    pub fn new(name: &'static str) -> Self {
        Self { name, script: Vec::new(), delays: Vec::new(), calls: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn on(mut self, query: &str, what: Script) -> Self {
        self.script.push((query.to_string(), what));
        self
    }

    pub fn delay(mut self, query: &str, d: Duration) -> Self {
        self.delays.push((query.to_string(), d));
        self
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Provider for Scripted {
    fn name(&self) -> &'static str {
        self.name
    }

    fn search(&self, name: &str, _region: &str) -> Result<Option<Organization>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((_, d)) = self.delays.iter().find(|(q, _)| q == name) {
            thread::sleep(*d);
        }
        match self.script.iter().find(|(q, _)| q == name).map(|(_, s)| s.clone()) {
            Some(Script::Found(org)) => Ok(Some(org)),
            Some(Script::Fail) => Err(Error::Parse("scripted failure".to_string())),
            Some(Script::Panic) => panic!("scripted panic for {name}"),
            Some(Script::Nothing) | None => Ok(None),
        }
    }
}
