//! Search-as-you-type support.
//!
//! Search itself is a passthrough to the catalog backend; this module owns
//! the client-side behavior around it: debouncing keystrokes, ignoring
//! superseded in-flight requests, and remembering recent search terms.
//!
//! Cancellation model: every call to [`SearchDebouncer::input`] bumps a
//! generation counter. A spawned request re-checks the counter after the
//! debounce sleep and again after the network call; if a newer input
//! exists, the stale result is dropped silently. A superseded request is
//! not a failure and never produces an error state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::{CatalogSearch, SearchHits};
use crate::store::{StateStore, keys};

/// Quiet interval after the last keystroke before a request is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Result limit requested per entity type.
pub const SEARCH_SUGGESTION_LIMIT: u32 = 8;

/// Maximum number of remembered search terms.
pub const MAX_RECENT_SEARCHES: usize = 8;

/// Observable search state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// The query these hits answer.
    pub query: String,
    /// Hits from the last completed, non-superseded request.
    pub hits: SearchHits,
    /// Last request failure; cleared by the next successful request.
    pub error: Option<String>,
}

/// Debounces text input and publishes results for the newest query only.
pub struct SearchDebouncer<S: CatalogSearch> {
    api: S,
    limit: u32,
    debounce: Duration,
    generation: Arc<AtomicU64>,
    state_tx: Arc<watch::Sender<SearchState>>,
}

impl<S: CatalogSearch> SearchDebouncer<S> {
    /// Create a debouncer with the default interval and limit.
    #[must_use]
    pub fn new(api: S) -> Self {
        Self::with_debounce(api, SEARCH_DEBOUNCE)
    }

    /// Create a debouncer with a custom interval.
    #[must_use]
    pub fn with_debounce(api: S, debounce: Duration) -> Self {
        let (state_tx, _) = watch::channel(SearchState::default());
        Self {
            api,
            limit: SEARCH_SUGGESTION_LIMIT,
            debounce,
            generation: Arc::new(AtomicU64::new(0)),
            state_tx: Arc::new(state_tx),
        }
    }

    /// Subscribe to search state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_tx.subscribe()
    }

    /// The most recently published state.
    #[must_use]
    pub fn latest(&self) -> SearchState {
        self.state_tx.borrow().clone()
    }

    /// Feed the current text-box content.
    ///
    /// Supersedes any earlier pending or in-flight request. A blank query
    /// clears results immediately without touching the network.
    pub fn input(&self, raw: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = raw.trim().to_string();

        if query.is_empty() {
            // The bump above already supersedes anything in flight.
            self.state_tx.send_replace(SearchState::default());
            return;
        }

        let api = self.api.clone();
        let limit = self.limit;
        let debounce = self.debounce;
        let counter = Arc::clone(&self.generation);
        let state_tx = Arc::clone(&self.state_tx);

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if counter.load(Ordering::SeqCst) != generation {
                // Coalesced away by a newer keystroke.
                return;
            }

            let result = api.search(query.clone(), limit).await;

            if counter.load(Ordering::SeqCst) != generation {
                debug!(query = %query, "Dropping superseded search response");
                return;
            }
            match result {
                Ok(hits) => {
                    state_tx.send_replace(SearchState {
                        query,
                        hits,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "Search request failed");
                    // Keep the previous hits; the view renders a retry
                    // affordance off the error field.
                    state_tx.send_modify(|state| {
                        state.query = query;
                        state.error = Some(e.to_string());
                    });
                }
            }
        });
    }
}

/// Recently used search terms, most recent first.
///
/// Deduplicated by exact text, capped at [`MAX_RECENT_SEARCHES`], persisted
/// under its own storage key.
pub struct RecentSearches {
    terms: Vec<String>,
    store: StateStore,
}

impl RecentSearches {
    /// Create a history, rehydrating persisted terms.
    #[must_use]
    pub fn new(store: StateStore) -> Self {
        let terms: Vec<String> = store.get(keys::RECENT_SEARCHES).unwrap_or_default();
        Self { terms, store }
    }

    /// Record a submitted search term.
    ///
    /// Blank terms are ignored; an exact duplicate moves to the front.
    pub fn record(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        self.terms.retain(|existing| existing != term);
        self.terms.insert(0, term.to_string());
        self.terms.truncate(MAX_RECENT_SEARCHES);
        self.store.set(keys::RECENT_SEARCHES, &self.terms);
    }

    /// Terms, most recent first.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Forget all terms.
    pub fn clear(&mut self) {
        self.terms.clear();
        self.store.set(keys::RECENT_SEARCHES, &self.terms);
    }
}
