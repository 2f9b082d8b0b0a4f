// src/engine/resolve.rs
//
// One query, sequentially:
//
//   cache hit  ── filter ok ──▶ Resolved(cache)
//       │      └─ filter no ──▶ Unresolved(Filtered)      (providers not consulted)
//   cache miss ─▶ provider[0] ─▶ provider[1] ─▶ … in declared order
//                   ├ error / no data  → next provider
//                   ├ record, filter no → next provider (not cached)
//                   └ record, filter ok → cache write, Resolved(provider)
//   exhausted: Unresolved(NotFound), even if some provider's record was filtered out

use super::filter;
use super::types::{Resolution, Source, Unresolved};
use crate::specs::Provider;
use crate::store::CacheStore;
use crate::log::Log;

pub struct Resolver {
    providers: Vec<Box<dyn Provider>>,
    cache: Box<dyn CacheStore>,
    log: Log,
}

impl Resolver {
    /// `providers` are tried in the order given.
    pub fn new(providers: Vec<Box<dyn Provider>>, cache: Box<dyn CacheStore>, log: Log) -> Self {
        Self { providers, cache, log }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn resolve(&self, query: &str, region: &str, okved_filter: &[String]) -> Resolution {
        if let Some(cached) = self.cache.get(query) {
            logf!(self.log, query, "found in cache");
            if filter::matches(&cached, okved_filter) {
                return Resolution::Resolved { org: cached, source: Source::Cache };
            }
            logf!(self.log, query, okved = ?cached.okved, "cached record does not match OKVED filter");
            return Resolution::Unresolved(Unresolved::Filtered);
        }

        for provider in &self.providers {
            let name = provider.name();
            logf!(self.log, query, provider = name, "searching");

            let found = match provider.search(query, region) {
                Ok(Some(org)) => org,
                Ok(None) => {
                    logd!(self.log, query, provider = name, "no data");
                    continue;
                }
                Err(e) => {
                    loge!(self.log, query, provider = name, "provider failed: {e}");
                    continue;
                }
            };

            if !filter::matches(&found, okved_filter) {
                logf!(self.log, query, provider = name, okved = ?found.okved, "found, but OKVED filter rejects it");
                continue;
            }

            self.cache.set(query, &found);
            return Resolution::Resolved { org: found, source: Source::Provider(name) };
        }

        Resolution::Unresolved(Unresolved::NotFound)
    }
}
