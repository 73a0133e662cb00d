//! Debounced city autocomplete.
//!
//! Each keystroke aborts the pending lookup (sleeping or in flight) and
//! schedules a new one after the debounce window, so at most one
//! suggestion request runs per pause in typing. Results are published on
//! a `watch` channel the UI subscribes to.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::providers::CitySearch;

pub struct SuggestionDebouncer {
    search: Arc<dyn CitySearch>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    tx: Arc<watch::Sender<Vec<String>>>,
}

impl SuggestionDebouncer {
    pub fn new(search: Arc<dyn CitySearch>, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            search,
            delay,
            pending: Mutex::new(None),
            tx: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.tx.subscribe()
    }

    /// Current suggestion list.
    pub fn suggestions(&self) -> Vec<String> {
        self.tx.borrow().clone()
    }

    /// Handle an edit of the city input. Must be called inside a Tokio
    /// runtime. Blank input clears the list immediately.
    pub fn on_input(&self, value: &str) {
        // Held across abort, spawn and store.
        let mut pending = self.lock_pending();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        if value.trim().is_empty() {
            self.tx.send_replace(Vec::new());
            return;
        }

        let search = Arc::clone(&self.search);
        let tx = Arc::clone(&self.tx);
        let delay = self.delay;
        let query = value.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let names = search.suggest(&query).await;
            debug!(query = %query, count = names.len(), "Suggestions updated");
            tx.send_replace(names);
        });
        *pending = Some(handle);
    }

    /// Pick a suggestion: cancels any pending lookup, clears the list and
    /// returns the name to put in the input.
    pub fn select(&self, name: &str) -> String {
        self.cancel();
        self.tx.send_replace(Vec::new());
        name.to_string()
    }

    /// Abort the pending lookup, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.lock_pending().take() {
            handle.abort();
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SuggestionDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
