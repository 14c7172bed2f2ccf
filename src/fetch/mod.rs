//! Runs the catalog download on tokio's blocking pool and posts the result
//! back to the UI loop.
//!
//! The worker never touches controller state. Its only way back is the
//! bounded outcome channel, and whatever happens inside the source (an error
//! or a panic) crosses that channel as a formatted diagnostic string.
use crate::catalog::{Catalog, CatalogSource, FetchError};
use crossterm::style::Stylize;
use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub const FAILURE_MESSAGE: &str = "Failed to download themes";

#[derive(Debug)]
pub enum FetchOutcome {
    Catalog(Catalog),
    /// Diagnostic text: error chain, backtrace if captured, then a summary line.
    Failure(String),
}

thread_local! {
    static IN_FETCH_WORKER: Cell<bool> = const { Cell::new(false) };
}

/// Replaces the panic hook so that panics inside a fetch worker go to the
/// log instead of stderr, which belongs to the alternate screen while the
/// picker runs. Panics anywhere else still reach the previous hook.
pub fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if in_fetch_worker() {
                error!("Catalog fetch worker panicked: {}", info);
            } else {
                previous(info);
            }
        }));
    });
}

fn in_fetch_worker() -> bool {
    IN_FETCH_WORKER.with(Cell::get)
}

/// Marks the current thread as a fetch worker until dropped.
struct WorkerScope;

impl WorkerScope {
    fn enter() -> Self {
        IN_FETCH_WORKER.with(|flag| flag.set(true));
        WorkerScope
    }
}

impl Drop for WorkerScope {
    fn drop(&mut self) {
        IN_FETCH_WORKER.with(|flag| flag.set(false));
    }
}

pub type OutcomeSender = mpsc::Sender<FetchOutcome>;
pub type OutcomeReceiver = mpsc::Receiver<FetchOutcome>;

/// One fetch produces one outcome, so a single slot is enough.
pub fn outcome_channel() -> (OutcomeSender, OutcomeReceiver) {
    mpsc::channel(1)
}

pub struct FetchRunner {
    source: Arc<dyn CatalogSource>,
    outcome_tx: OutcomeSender,
    delay: Duration,
    started: bool,
}

impl FetchRunner {
    pub fn new(source: Arc<dyn CatalogSource>, outcome_tx: OutcomeSender) -> Self {
        Self {
            source,
            outcome_tx,
            delay: Duration::ZERO,
            started: false,
        }
    }

    /// Sleep this long on the worker before calling the source.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Starts the download. Returns `false` without doing anything if this
    /// runner already started one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> bool {
        if self.started {
            warn!("Catalog fetch already started, ignoring second request");
            return false;
        }
        self.started = true;

        let source = Arc::clone(&self.source);
        let outcome_tx = self.outcome_tx.clone();
        let delay = self.delay;

        debug!("Spawning catalog fetch worker (delay {:?})", delay);
        tokio::task::spawn_blocking(move || {
            let outcome = run_fetch(source.as_ref(), delay);
            if outcome_tx.blocking_send(outcome).is_err() {
                debug!("UI loop is gone, dropping fetch outcome");
            }
        });

        true
    }
}

fn run_fetch(source: &dyn CatalogSource, delay: Duration) -> FetchOutcome {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }

    info!("Fetching theme catalog from {}", source.describe());
    let scope = WorkerScope::enter();
    let result = panic::catch_unwind(AssertUnwindSafe(|| source.fetch())).unwrap_or_else(|payload| {
        Err(FetchError::Other(format!(
            "catalog fetch panicked: {}",
            panic_message(payload.as_ref())
        )))
    });
    drop(scope);

    match result {
        Ok(catalog) => {
            if catalog.is_empty() {
                warn!("Downloaded catalog has no themes");
            }
            info!("Downloaded catalog with {} themes", catalog.len());
            FetchOutcome::Catalog(catalog)
        }
        Err(e) => {
            error!("Catalog fetch failed: {}", e);
            FetchOutcome::Failure(format_failure(e.into(), FAILURE_MESSAGE))
        }
    }
}

/// Renders an error the way it is shown to the user after the UI shuts down:
/// the full error chain (plus backtrace when `RUST_BACKTRACE` is set) followed
/// by `summary` in red.
pub fn format_failure(err: anyhow::Error, summary: &str) -> String {
    format!("{:?}\n\n{}", err, summary.red())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
