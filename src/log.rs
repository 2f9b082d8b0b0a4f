// src/log.rs
//
// Diagnostics handle threaded through constructors, plus subscriber setup for
// binaries. Library code never installs a subscriber itself.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Span;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Cloneable logging handle. Each component gets its own child so events
/// carry the component name as span context.
#[derive(Clone, Debug)]
pub struct Log {
    span: Option<Span>,
}

impl Log {
    /// Root handle for one search service.
    pub fn new(component: &'static str) -> Self {
        Self { span: Some(tracing::info_span!("org_scrape", component)) }
    }

    /// Silent handle: the logging macros emit nothing through it, and its
    /// children are silent too.
    pub fn disabled() -> Self {
        Self { span: None }
    }

    pub fn child(&self, component: &'static str) -> Self {
        let span = self
            .span
            .as_ref()
            .map(|parent| tracing::info_span!(parent: parent, "component", name = component));
        Self { span }
    }

    /// `None` for a disabled handle.
    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.span.is_some()
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Install the global `tracing` subscriber.
/// `RUST_LOG` wins over `verbose`. With a log file, output is appended there
/// without colour codes; otherwise it goes to stderr.
pub fn init(log_file: Option<&Path>, verbose: bool) -> Result<()> {
    let fallback = if verbose { "org_scrape=debug" } else { "org_scrape=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let installed = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    installed.map_err(|e| Error::Config(format!("logging already initialised: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        out.text()
    }

    #[test]
    fn disabled_handle_emits_nothing() {
        let text = capture(|| {
            let log = Log::disabled();
            loge!(log, "should not appear");
            logw!(log.child("cache"), "nor this");
            logd!(log, "or this");
        });
        assert!(text.is_empty(), "unexpected output: {text}");
    }

    #[test]
    fn enabled_handle_reaches_subscriber_with_component() {
        let text = capture(|| {
            let log = Log::new("test").child("resolver");
            logf!(log, query = "ООО А", "found in cache");
        });
        assert!(text.contains("found in cache"));
        assert!(text.contains("resolver"));
    }

    #[test]
    fn children_of_disabled_are_disabled() {
        assert!(!Log::disabled().child("x").is_enabled());
        assert!(Log::new("x").child("y").is_enabled());
        assert!(!Log::default().is_enabled());
    }
}
