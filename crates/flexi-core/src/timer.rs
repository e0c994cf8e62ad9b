#![forbid(unsafe_code)]

//! Deferred continuations for a cooperative, single-threaded owner.
//!
//! [`TimerQueue`] stores deadlines keyed by a small caller-defined enum. The
//! owner calls [`TimerQueue::drain_due`] from its tick and reacts to the keys
//! that came due. Nothing runs on its own: there are no threads and no
//! callbacks, so a cancelled key can never fire late.
//!
//! # Invariants
//!
//! 1. At most one entry per key. Scheduling a key again replaces it.
//! 2. `drain_due` yields keys in deadline order (ties keep insertion order).
//! 3. A periodic key fires at most once per `drain_due`; missed periods are
//!    skipped rather than replayed.

use std::time::Duration;
use web_time::Instant;

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    deadline: Instant,
    period: Option<Duration>,
}

/// Keyed one-shot and periodic deadlines.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    entries: Vec<Entry<K>>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + std::fmt::Debug> TimerQueue<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `key` once at `deadline`.
    pub fn schedule(&mut self, key: K, deadline: Instant) {
        self.insert(Entry {
            key,
            deadline,
            period: None,
        });
    }

    /// Fire `key` once, `delay` after `now`.
    pub fn schedule_in(&mut self, key: K, now: Instant, delay: Duration) {
        self.schedule(key, now + delay);
    }

    /// Fire `key` every `period`, first at `now + period`.
    ///
    /// A zero period is clamped to one millisecond so the queue cannot spin.
    pub fn schedule_every(&mut self, key: K, now: Instant, period: Duration) {
        let period = period.max(Duration::from_millis(1));
        self.insert(Entry {
            key,
            deadline: now + period,
            period: Some(period),
        });
    }

    /// Remove `key`. Returns whether it was scheduled.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        let removed = self.entries.len() != before;
        if removed {
            tracing::trace!(?key, "timer cancelled");
        }
        removed
    }

    #[must_use]
    pub fn is_scheduled(&self, key: K) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Deadline of `key`, if scheduled.
    #[must_use]
    pub fn deadline_of(&self, key: K) -> Option<Instant> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.deadline)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Collect every key whose deadline is at or before `now`.
    ///
    /// One-shot keys are removed; periodic keys are rescheduled to their
    /// next deadline after `now`.
    pub fn drain_due(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<(Instant, K)> = Vec::new();
        self.entries.retain_mut(|entry| {
            if entry.deadline > now {
                return true;
            }
            due.push((entry.deadline, entry.key));
            match entry.period {
                Some(period) => {
                    let mut next = entry.deadline + period;
                    if next <= now {
                        next = now + period;
                    }
                    entry.deadline = next;
                    true
                }
                None => false,
            }
        });
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, key)| key).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, entry: Entry<K>) {
        tracing::trace!(key = ?entry.key, periodic = entry.period.is_some(), "timer scheduled");
        self.entries.retain(|e| e.key != entry.key);
        self.entries.push(entry);
    }
}
