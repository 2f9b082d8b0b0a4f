// src/runner.rs
//
// Batch coordinator. A fixed number of worker threads pull query indices off a
// shared counter and send `(index, outcome)` back over a channel; the caller
// places each outcome in its input slot, so output order is input order no
// matter which worker finishes first.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, mpsc, atomic::{AtomicUsize, Ordering}};
use std::thread;

use crate::data::{SearchOutcome, SearchRequest};
use crate::engine::{Resolver, Unresolved};
use crate::log::Log;
use crate::progress::Progress;

/// Resolve every name in `request` with up to `workers` threads.
/// Always returns exactly one outcome per input name.
pub fn run_batch(
    resolver: &Arc<Resolver>,
    request: &SearchRequest,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
    log: &Log,
) -> Vec<SearchOutcome> {
    let names = Arc::new(request.organization_names.clone());
    let total = names.len();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }
    if total == 0 {
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        return Vec::new();
    }

    let region = Arc::new(request.region.clone());
    let filter = Arc::new(request.filter().to_vec());
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<(usize, SearchOutcome)>();

    let workers = workers.min(total).max(1);
    logf!(log, total, workers, "batch started");

    for _ in 0..workers {
        let names = Arc::clone(&names);
        let region = Arc::clone(&region);
        let filter = Arc::clone(&filter);
        let idx = Arc::clone(&counter);
        let resolver = Arc::clone(resolver);
        let tx = res_tx.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= names.len() {
                    break;
                }
                let query = names[i].as_str();
                let outcome = match panic::catch_unwind(AssertUnwindSafe(|| resolver.resolve(query, &region, &filter))) {
                    Ok(resolution) => resolution.into_outcome(query),
                    Err(payload) => SearchOutcome::missing(query, Unresolved::SearchError(panic_message(payload)).to_string()),
                };
                if tx.send((i, outcome)).is_err() {
                    break;
                }
            }
        });
    }
    drop(res_tx); // caller is sole receiver now

    let mut slots: Vec<Option<SearchOutcome>> = vec![None; total];
    for _ in 0..total {
        match res_rx.recv() {
            Ok((i, outcome)) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(i, &outcome);
                    if !outcome.found {
                        p.log(&format!("{}: {}", outcome.query, outcome.error.as_deref().unwrap_or_default()));
                    }
                }
                slots[i] = Some(outcome);
            }
            Err(_) => break, // every worker is gone
        }
    }

    let outcomes: Vec<SearchOutcome> = slots
        .into_iter()
        .zip(names.iter())
        .map(|(slot, query)| {
            slot.unwrap_or_else(|| {
                SearchOutcome::missing(query, Unresolved::SearchError(s!("worker exited early")).to_string())
            })
        })
        .collect();

    let found = outcomes.iter().filter(|o| o.found).count();
    logf!(log, total, found, "batch finished");

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    outcomes
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s!(*s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        s!("panic while resolving")
    }
}
