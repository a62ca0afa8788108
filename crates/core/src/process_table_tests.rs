// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;

struct FakeProbe {
    alive: HashSet<Pid>,
}

impl LivenessProbe for FakeProbe {
    fn is_alive(&self, pid: Pid) -> bool {
        self.alive.contains(&pid)
    }
}

#[test]
fn append_ignores_zero_pid() {
    let mut table = PidTable::new();
    table.append("topic", 0);
    assert!(table.is_empty_for("topic"));
}

#[test]
fn append_preserves_insertion_order_and_duplicates() {
    let mut table = PidTable::new();
    table.append("topic", 10);
    table.append("topic", 20);
    table.append("topic", 10);
    assert_eq!(table.pids("topic"), &[10, 20, 10]);
}

#[test]
fn cleanup_dead_retains_only_alive_pids_in_order() {
    let mut table = PidTable::new();
    table.append("topic", 1);
    table.append("topic", 2);
    table.append("topic", 3);

    let probe = FakeProbe {
        alive: HashSet::from([1, 3]),
    };
    table.cleanup_dead("topic", &probe);

    assert_eq!(table.pids("topic"), &[1, 3]);
}

#[test]
fn latest_returns_last_pid_or_none() {
    let mut table = PidTable::new();
    assert_eq!(table.latest("topic"), None);
    table.append("topic", 5);
    table.append("topic", 9);
    assert_eq!(table.latest("topic"), Some(9));
}

#[test]
fn clear_drops_all_pids_for_topic_only() {
    let mut table = PidTable::new();
    table.append("a", 1);
    table.append("b", 2);
    table.clear("a");
    assert!(table.is_empty_for("a"));
    assert_eq!(table.pids("b"), &[2]);
}

#[test]
fn kill_style_off_clears_table_p2() {
    // P2: after a kill-style off completes, the table for that topic is empty.
    let mut table = PidTable::new();
    table.append("cmd1", 100);
    table.append("cmd1", 101);
    // Simulate the kill ladder: terminate each, then clear.
    table.clear("cmd1");
    assert!(table.is_empty_for("cmd1"));
}

#[test]
fn interrupt_style_off_keeps_unbroken_pids_p3() {
    // P3: after an interrupt-style off, the table holds exactly the pids
    // that were alive and did not receive a successful break.
    let mut table = PidTable::new();
    table.append("cmd1", 1);
    table.append("cmd1", 2);

    let probe = FakeProbe {
        alive: HashSet::from([1, 2]),
    };
    table.cleanup_dead("cmd1", &probe);
    // Only the latest pid (2) receives the break attempt; table is not cleared.
    assert_eq!(table.pids("cmd1"), &[1, 2]);
}
