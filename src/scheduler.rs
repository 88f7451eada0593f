//! Delayed release of bot replies behind the typing indicator.
//!
//! Time is passed in explicitly, so the UI decides when to poll and the
//! queue itself never sleeps or spawns timers.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// What happens to replies still waiting when a new one is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Every reply is released in due order; nothing is dropped
    #[default]
    KeepAll,
    /// A new reply replaces anything still pending
    ReplacePending,
}

#[derive(Debug)]
struct Pending<T> {
    due: Instant,
    seq: u64,
    item: T,
}

/// Queue of items that become visible once their delay has elapsed
#[derive(Debug)]
pub struct TypingScheduler<T> {
    pending: Vec<Pending<T>>,
    policy: OverlapPolicy,
    next_seq: u64,
}

impl<T> Default for TypingScheduler<T> {
    fn default() -> Self {
        Self::new(OverlapPolicy::default())
    }
}

impl<T> TypingScheduler<T> {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            pending: Vec::new(),
            policy,
            next_seq: 0,
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Queue `item` to be released `delay` after `now`.
    pub fn schedule(&mut self, item: T, delay: Duration, now: Instant) {
        if self.policy == OverlapPolicy::ReplacePending && !self.pending.is_empty() {
            tracing::debug!(dropped = self.pending.len(), "replacing pending replies");
            self.pending.clear();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: now + delay,
            seq,
            item,
        });
    }

    /// Remove and return every item due at `now`, earliest first.
    /// Items due at the same instant come out in the order they were queued.
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        self.pending
            .sort_by(|a, b| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)));
        let ready = self
            .pending
            .iter()
            .position(|p| p.due > now)
            .unwrap_or(self.pending.len());
        self.pending.drain(..ready).map(|p| p.item).collect()
    }

    /// Instant at which the next item becomes due
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Whether any reply is still waiting (the typing indicator is shown)
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything still waiting. Returns how many items were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}
