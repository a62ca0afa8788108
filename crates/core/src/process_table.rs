// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-topic process table.
//!
//! Owned by the Router and mutated only on the session thread during
//! dispatch — no synchronisation is needed
//! here; callers that share a `Router` across threads wrap it themselves.

use std::collections::HashMap;

/// An OS process identifier. `0` is never stored.
pub type Pid = u32;

/// A liveness probe: given a pid, report whether the OS still considers it
/// running. Permission-denied or unknown-pid both count as "not alive"
/// — this is a best-effort predicate, not a strict guarantee.
pub trait LivenessProbe {
    fn is_alive(&self, pid: Pid) -> bool;
}

/// `map<topic, PidList>` where `PidList` is an ordered (insertion) sequence
/// of pids. Duplicates are permitted.
#[derive(Debug, Default, Clone)]
pub struct PidTable {
    topics: HashMap<String, Vec<Pid>>,
}

impl PidTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `append(topic, pid)` — pid = 0 is ignored.
    pub fn append(&mut self, topic: &str, pid: Pid) {
        if pid == 0 {
            return;
        }
        self.topics.entry(topic.to_string()).or_default().push(pid);
    }

    /// `cleanup_dead(topic)` — retain only still-running pids, preserving
    /// insertion order.
    pub fn cleanup_dead(&mut self, topic: &str, probe: &dyn LivenessProbe) {
        if let Some(pids) = self.topics.get_mut(topic) {
            pids.retain(|&pid| probe.is_alive(pid));
        }
    }

    /// `latest(topic)` — last pid after cleanup, or none.
    pub fn latest(&self, topic: &str) -> Option<Pid> {
        self.topics.get(topic).and_then(|pids| pids.last().copied())
    }

    /// `clear(topic)` — drop all pids for this topic.
    pub fn clear(&mut self, topic: &str) {
        self.topics.remove(topic);
    }

    /// All pids currently tracked for a topic, in insertion order.
    pub fn pids(&self, topic: &str) -> &[Pid] {
        self.topics.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty_for(&self, topic: &str) -> bool {
        self.pids(topic).is_empty()
    }
}

#[cfg(test)]
#[path = "process_table_tests.rs"]
mod tests;
