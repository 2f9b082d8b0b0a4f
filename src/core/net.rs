// src/core/net.rs
//
// HTTP GET with browser-like headers, bounded retries and a fixed timeout.
// Providers talk to the network only through `Fetch`, so tests can swap in
// canned pages.

use std::thread;
use std::time::Duration;

use rand::seq::SliceRandom;
use reqwest::blocking::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};

use crate::config::consts::*;
use crate::config::NetOptions;
use crate::error::{Error, Result};
use crate::log::Log;

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accept {
    Html,
    Json,
}

pub trait Fetch: Send + Sync {
    /// GET `url` with `query` pairs appended; returns the body of a 2xx response.
    fn get(&self, url: &str, query: &[(&str, &str)], accept: Accept) -> Result<String>;
}

/// Exponential backoff: wait `multiplier * 2^(attempt-1)`, clamped to `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub multiplier: Duration,
    pub min_wait: Duration,
    pub max_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: RETRY_ATTEMPTS,
            multiplier: Duration::from_secs(RETRY_MULTIPLIER_SECS),
            min_wait: Duration::from_secs(RETRY_MIN_WAIT_SECS),
            max_wait: Duration::from_secs(RETRY_MAX_WAIT_SECS),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self { attempts: 1, multiplier: Duration::ZERO, min_wait: Duration::ZERO, max_wait: Duration::ZERO }
    }

    /// Wait after failed attempt number `attempt` (1-based).
    pub fn wait_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        let raw = self.multiplier.saturating_mul(factor);
        raw.clamp(self.min_wait, self.max_wait.max(self.min_wait))
    }

    /// Run `op` until it succeeds or attempts run out; the last error is returned.
    pub fn run<T>(&self, log: &Log, what: &str, mut op: impl FnMut() -> Result<T>) -> Result<T> {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(v) => return Ok(v),
                Err(e) if attempt < attempts => {
                    let wait = self.wait_after(attempt);
                    logw!(log, attempt, wait_ms = wait.as_millis() as u64, "{what} failed: {e}; retrying");
                    thread::sleep(wait);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// One cookie-keeping session per provider.
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
    log: Log,
}

impl HttpClient {
    pub fn new(net: &NetOptions, log: Log) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ru-RU,ru;q=0.9,en;q=0.8"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = Client::builder()
            .timeout(net.timeout)
            .cookie_store(true)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, retry: net.retry, log })
    }

    fn get_once(&self, url: &str, query: &[(&str, &str)], accept: Accept) -> Result<String> {
        let ua = USER_AGENTS.choose(&mut rand::thread_rng()).copied().unwrap_or(USER_AGENTS[0]);

        let mut req = self.client.get(url).query(query).header(USER_AGENT, ua);
        req = match accept {
            Accept::Html => req.header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
            Accept::Json => req
                .header(ACCEPT, "application/json, text/plain, */*")
                .header("X-Requested-With", "XMLHttpRequest"),
        };

        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { status: status.as_u16(), url: resp.url().to_string() });
        }
        Ok(resp.text()?)
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str, query: &[(&str, &str)], accept: Accept) -> Result<String> {
        logd!(self.log, url, "GET");
        self.retry.run(&self.log, url, || self.get_once(url, query, accept))
    }
}
