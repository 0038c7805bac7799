use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Coalesces rapid requests per key: only the latest request for a key
/// survives, and it comes due one window after it was made.
///
/// No timers run here; the owner polls with the current time.
#[derive(Debug)]
pub struct Debouncer<K: Ord + Copy, V> {
    window: Duration,
    pending: BTreeMap<K, (Instant, V)>,
}

impl<K: Ord + Copy, V> Debouncer<K, V> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: BTreeMap::new(),
        }
    }

    /// Schedule `value` for `key`, cancelling whatever was pending for it.
    /// Returns true if an earlier request was replaced.
    pub fn schedule(&mut self, key: K, value: V, now: Instant) -> bool {
        self.pending
            .insert(key, (now + self.window, value))
            .is_some()
    }

    pub fn cancel(&mut self, key: K) -> Option<V> {
        self.pending.remove(&key).map(|(_, v)| v)
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest deadline among pending requests.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|(at, _)| *at).min()
    }

    /// Remove and return every request whose deadline has passed, in key order.
    pub fn due(&mut self, now: Instant) -> Vec<(K, V)> {
        let keys: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, (at, _))| *at <= now)
            .map(|(k, _)| *k)
            .collect();
        keys.into_iter()
            .filter_map(|k| self.pending.remove(&k).map(|(_, v)| (k, v)))
            .collect()
    }

    /// Remove and return everything pending, in key order.
    pub fn drain(&mut self) -> Vec<(K, V)> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(k, (_, v))| (k, v))
            .collect()
    }
}
