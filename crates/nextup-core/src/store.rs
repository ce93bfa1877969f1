use nextup_models::ShowRecord;
use nextup_tmdb::MetadataProvider;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::order;

/// Owns the authoritative watchlist. All mutation funnels through
/// [`WatchlistStore::mutate`], which restores the invariants (no duplicate
/// ids, id set matches the list, urgency order) and publishes a snapshot to
/// observers - a bare field assignment cannot bypass the pipeline.
///
/// The store expects a single logical owner and has no internal locking;
/// callers that need to share it across tasks wrap it in a `tokio::sync`
/// mutex at the composition root.
pub struct WatchlistStore {
    shows: Vec<ShowRecord>,
    ids: HashSet<String>,
    provider: Arc<dyn MetadataProvider>,
    refresh_generation: u64,
    publisher: watch::Sender<Vec<ShowRecord>>,
}

impl WatchlistStore {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        let (publisher, _) = watch::channel(Vec::new());
        Self {
            shows: Vec::new(),
            ids: HashSet::new(),
            provider,
            refresh_generation: 0,
            publisher,
        }
    }

    /// The current list, in publish order.
    pub fn shows(&self) -> &[ShowRecord] {
        &self.shows
    }

    /// O(1) membership check against the derived id set.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Observe published snapshots. The channel only sees fully reconciled
    /// lists, never a partially updated intermediate state.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ShowRecord>> {
        self.publisher.subscribe()
    }

    /// Append a record and re-sort. A record whose id is already tracked is
    /// a logged no-op; duplicate ids never enter the list.
    pub fn add(&mut self, record: ShowRecord) -> bool {
        if self.contains(&record.id) {
            debug!(id = %record.id, "ignoring add for already-tracked show");
            return false;
        }
        self.mutate(|shows| shows.push(record));
        true
    }

    /// Remove every record with the given id (plural in case a duplicate
    /// crept in through `mutate`).
    pub fn remove(&mut self, id: &str) {
        self.mutate(|shows| shows.retain(|s| s.id != id));
    }

    /// Replace the whole list, e.g. with the persisted watchlist at startup.
    pub fn replace(&mut self, shows: Vec<ShowRecord>) {
        self.mutate(|current| *current = shows);
    }

    /// Apply an arbitrary change to the list, then run the invariant
    /// pipeline: value-equality no-op check, dedupe by id (first occurrence
    /// wins), stable sort, id-set recompute, publish. Assigning a value-equal
    /// list notifies nobody.
    pub fn mutate<F>(&mut self, apply: F)
    where
        F: FnOnce(&mut Vec<ShowRecord>),
    {
        let previous = self.shows.clone();
        apply(&mut self.shows);
        if self.shows == previous {
            return;
        }

        dedupe_by_id(&mut self.shows);
        self.shows.sort_by(order::compare);
        self.ids = self.shows.iter().map(|s| s.id.clone()).collect();

        // The change may have been cancelled out by the pipeline (e.g. a
        // pushed duplicate that dedupe dropped again).
        if self.shows != previous {
            self.publisher.send_replace(self.shows.clone());
        }
    }

    /// Re-fetch detail for every tracked show, strictly sequentially, and
    /// reconcile the results in one atomic publish. A failed fetch keeps that
    /// show's prior record unchanged - stale data beats a missing entry - and
    /// is logged rather than surfaced, so refresh as a whole never fails.
    pub async fn refresh(&mut self) {
        self.refresh_generation = self.refresh_generation.wrapping_add(1);
        let generation = self.refresh_generation;

        let current = self.shows.clone();
        let total = current.len();
        let mut reconciled = Vec::with_capacity(total);
        let mut failures = 0usize;

        for show in current {
            match self.provider.fetch_detail(&show.id).await {
                Ok(updated) => reconciled.push(updated),
                Err(e) => {
                    failures += 1;
                    warn!(
                        id = %show.id,
                        name = %show.name,
                        error = %e,
                        "detail refresh failed, keeping stale record"
                    );
                    reconciled.push(show);
                }
            }
        }

        // Last-writer-wins: if another refresh started while this one was
        // fetching, this reconciliation is stale and must not publish.
        if self.refresh_generation != generation {
            debug!(generation, "discarding superseded refresh");
            return;
        }

        info!(total, failures, "watchlist refresh reconciled");
        self.mutate(|shows| *shows = reconciled);
    }
}

fn dedupe_by_id(shows: &mut Vec<ShowRecord>) {
    let mut seen = HashSet::new();
    shows.retain(|s| seen.insert(s.id.clone()));
}
