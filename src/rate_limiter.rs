//! Sliding-window admission control keyed by client identifier.
//!
//! The limiter owns the algorithm; timestamps live in an injected
//! [`WindowStore`] so the store can be swapped (or shared) without touching
//! the admission logic.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Per-client timestamp storage.
///
/// `update` must run the closure with exclusive access to the client's
/// timestamps, so the prune-check-append sequence is atomic per key.
pub trait WindowStore: Send + Sync {
    /// Runs `f` on the timestamps of `key`, creating an empty entry if needed.
    fn update(&self, key: &str, f: &mut dyn FnMut(&mut VecDeque<Instant>) -> bool) -> bool;

    /// Drops timestamps at or before `cutoff` and removes entries left empty.
    /// Returns the number of entries removed.
    fn sweep(&self, cutoff: Instant) -> usize;

    /// Number of tracked clients.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process store. Sharded locking keeps distinct clients from blocking
/// one another.
#[derive(Debug, Default)]
pub struct InMemoryWindowStore {
    entries: DashMap<String, VecDeque<Instant>>,
}

impl InMemoryWindowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowStore for InMemoryWindowStore {
    fn update(&self, key: &str, f: &mut dyn FnMut(&mut VecDeque<Instant>) -> bool) -> bool {
        let mut entry = self.entries.entry(key.to_string()).or_default();
        f(entry.value_mut())
    }

    fn sweep(&self, cutoff: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, timestamps| {
            prune(timestamps, cutoff);
            !timestamps.is_empty()
        });
        before.saturating_sub(self.entries.len())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// Concurrent callers may push slightly out of order, so scan every entry.
fn prune(timestamps: &mut VecDeque<Instant>, cutoff: Instant) {
    timestamps.retain(|&ts| ts > cutoff);
}

/// Sliding-window limiter: at most `capacity` admissions per `window` per client.
pub struct RateLimiter<S: WindowStore = InMemoryWindowStore> {
    store: Arc<S>,
    window: Duration,
    capacity: usize,
    sweep_interval: Duration,
    last_sweep: Mutex<Option<Instant>>,
}

impl RateLimiter<InMemoryWindowStore> {
    /// Limiter backed by a fresh in-memory store.
    pub fn in_memory(window: Duration, capacity: usize) -> Self {
        Self::new(Arc::new(InMemoryWindowStore::new()), window, capacity)
    }
}

impl<S: WindowStore> RateLimiter<S> {
    pub fn new(store: Arc<S>, window: Duration, capacity: usize) -> Self {
        Self {
            store,
            window,
            capacity,
            sweep_interval: Duration::from_secs(300),
            last_sweep: Mutex::new(None),
        }
    }

    /// Sets the minimum interval between sweeps of emptied entries.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Admits or rejects a request from `client` at the current instant.
    pub fn admit(&self, client: &str) -> bool {
        self.admit_at(client, Instant::now())
    }

    /// Admits or rejects a request from `client` at `now`.
    ///
    /// Rejected attempts are not recorded.
    pub fn admit_at(&self, client: &str, now: Instant) -> bool {
        let cutoff = now.checked_sub(self.window);
        let capacity = self.capacity;

        let admitted = self.store.update(client, &mut |timestamps| {
            if let Some(cutoff) = cutoff {
                prune(timestamps, cutoff);
            }
            if timestamps.len() >= capacity {
                return false;
            }
            timestamps.push_back(now);
            true
        });

        if !admitted {
            tracing::warn!("Rate limit exceeded for client: {}", client);
        }

        self.maybe_sweep(now, cutoff);
        admitted
    }

    fn maybe_sweep(&self, now: Instant, cutoff: Option<Instant>) {
        let Some(cutoff) = cutoff else {
            return;
        };
        // Another request is already sweeping.
        let Ok(mut last) = self.last_sweep.try_lock() else {
            return;
        };
        match *last {
            None => *last = Some(now),
            Some(prev) if now.saturating_duration_since(prev) >= self.sweep_interval => {
                *last = Some(now);
                let removed = self.store.sweep(cutoff);
                tracing::debug!(
                    "Rate limit storage cleaned up. Removed: {}, current size: {}",
                    removed,
                    self.store.len()
                );
            }
            Some(_) => {}
        }
    }
}
