// src/service.rs
//! Search service: wires providers, cache and the worker pool together.
//!
//! [`OrgSearch`] is the long-lived handle a frontend keeps around;
//! [`search_organizations`] is the one-call entry point that builds a service
//! with default settings, runs the batch and returns export records.

use std::sync::Arc;

use crate::config::SearchOptions;
use crate::data::{Organization, SearchOutcome, SearchRequest, SimpleOrganization, simplify};
use crate::engine::Resolver;
use crate::error::Result;
use crate::log::Log;
use crate::progress::Progress;
use crate::runner::run_batch;
use crate::specs::{Provider, default_providers};
use crate::store::{CacheStore, FileCache, NoCache};

pub struct OrgSearch {
    resolver: Arc<Resolver>,
    workers: usize,
    region: String,
    okved_filter: Vec<String>,
    log: Log,
}

impl OrgSearch {
    /// Built-in providers, file cache per `opts.cache`.
    pub fn new(opts: &SearchOptions, log: Log) -> Result<Self> {
        let providers = default_providers(&opts.net, &log)?;
        let cache: Box<dyn CacheStore> = if opts.cache.enabled {
            Box::new(FileCache::new(&opts.cache.dir, opts.cache.max_age_days, log.child("cache")))
        } else {
            Box::new(NoCache)
        };

        let mut svc = Self::with_parts(providers, cache, opts.workers, log);
        svc.region = opts.region.clone();
        svc.okved_filter = opts.okved_filter.clone();
        Ok(svc)
    }

    /// Custom wiring; `providers` are tried in the order given.
    pub fn with_parts(
        providers: Vec<Box<dyn Provider>>,
        cache: Box<dyn CacheStore>,
        workers: usize,
        log: Log,
    ) -> Self {
        let defaults = SearchOptions::default();
        let resolver = Resolver::new(providers, cache, log.child("resolver"));
        logd!(log, providers = ?resolver.provider_names(), workers, "search service ready");
        Self {
            resolver: Arc::new(resolver),
            workers: workers.max(1),
            region: defaults.region,
            okved_filter: defaults.okved_filter,
            log,
        }
    }

    /// Request for `names` using this service's default region and filter.
    pub fn request(&self, names: Vec<String>) -> SearchRequest {
        let req = SearchRequest::new(names).with_region(self.region.clone());
        if self.okved_filter.is_empty() { req } else { req.with_filter(self.okved_filter.clone()) }
    }

    /// One outcome per name, in input order.
    pub fn search(&self, request: &SearchRequest, progress: Option<&mut dyn Progress>) -> Vec<SearchOutcome> {
        run_batch(&self.resolver, request, self.workers, progress, &self.log)
    }

    /// Resolve a single name on the calling thread.
    pub fn search_single(&self, name: &str, region: &str, okved_filter: &[String]) -> Option<Organization> {
        self.resolver.resolve(name, region, okved_filter).into_organization()
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }
}

/// Resolve `names` and return one simplified record per name, position-aligned.
/// Unresolved names yield a record with only `name` set.
pub fn search_organizations(
    names: Vec<String>,
    okved_filter: Option<Vec<String>>,
    use_cache: bool,
    region: Option<&str>,
) -> Result<Vec<SimpleOrganization>> {
    let mut opts = SearchOptions::default();
    opts.cache.enabled = use_cache;

    let svc = OrgSearch::new(&opts, Log::new("search"))?;
    let mut request = SearchRequest::new(names);
    if let Some(region) = region {
        request = request.with_region(region);
    }
    if let Some(prefixes) = okved_filter {
        request = request.with_filter(prefixes);
    }

    Ok(simplify(&svc.search(&request, None)))
}

/// Single-name convenience, no filter.
pub fn search_organization(name: &str, use_cache: bool, region: Option<&str>) -> Result<Option<Organization>> {
    let mut opts = SearchOptions::default();
    opts.cache.enabled = use_cache;

    let svc = OrgSearch::new(&opts, Log::new("search"))?;
    let region = region.map(str::to_string).unwrap_or(opts.region);
    Ok(svc.search_single(name, &region, &[]))
}
