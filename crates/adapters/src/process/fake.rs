// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process adapter for testing the Router's dispatch and
//! process-table bookkeeping without touching the OS.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::ProcessAdapter;
use async_trait::async_trait;
use parking_lot::Mutex;
use rc_core::Pid;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessCall {
    RunProgram { path: String, args: Vec<String> },
    RunShellCommand { command: String, hide: bool, keep_open: bool },
    TerminatePid(Pid),
    TaskkillPid { pid: Pid, force: bool, tree: bool },
    SendBreak(Pid),
    SendBreakDetached(Pid),
    KillByPath(String),
}

struct FakeProcessState {
    calls: Vec<ProcessCall>,
    next_pid: Pid,
    alive: HashSet<Pid>,
    spawns_fail: bool,
    /// pids for which `send_break`/`send_break_detached` report success.
    break_succeeds_for: HashSet<Pid>,
    /// pids for which `terminate_pid`/`taskkill_pid` report success.
    kill_succeeds_for: HashSet<Pid>,
    kill_by_path_succeeds: bool,
}

#[derive(Clone)]
pub struct FakeProcessAdapter {
    inner: Arc<Mutex<FakeProcessState>>,
}

impl Default for FakeProcessAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeProcessState {
                calls: Vec::new(),
                next_pid: 1000,
                alive: HashSet::new(),
                spawns_fail: false,
                break_succeeds_for: HashSet::new(),
                kill_succeeds_for: HashSet::new(),
                kill_by_path_succeeds: true,
            })),
        }
    }
}

impl FakeProcessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ProcessCall> {
        self.inner.lock().calls.clone()
    }

    pub fn set_spawns_fail(&self, fail: bool) {
        self.inner.lock().spawns_fail = fail;
    }

    pub fn kill(&self, pid: Pid) {
        self.inner.lock().alive.remove(&pid);
    }

    pub fn is_tracked_alive(&self, pid: Pid) -> bool {
        self.inner.lock().alive.contains(&pid)
    }

    pub fn allow_break(&self, pid: Pid) {
        self.inner.lock().break_succeeds_for.insert(pid);
    }

    pub fn allow_kill(&self, pid: Pid) {
        self.inner.lock().kill_succeeds_for.insert(pid);
    }

    pub fn set_kill_by_path_succeeds(&self, succeeds: bool) {
        self.inner.lock().kill_by_path_succeeds = succeeds;
    }
}

#[async_trait]
impl ProcessAdapter for FakeProcessAdapter {
    async fn run_program(&self, path: &str, args: &[String]) -> Option<Pid> {
        let mut state = self.inner.lock();
        state.calls.push(ProcessCall::RunProgram {
            path: path.to_string(),
            args: args.to_vec(),
        });
        if state.spawns_fail {
            return None;
        }
        let pid = state.next_pid;
        state.next_pid += 1;
        state.alive.insert(pid);
        Some(pid)
    }

    async fn run_shell_command(&self, command: &str, hide: bool, keep_open: bool) -> Option<Pid> {
        let mut state = self.inner.lock();
        state.calls.push(ProcessCall::RunShellCommand {
            command: command.to_string(),
            hide,
            keep_open,
        });
        if state.spawns_fail {
            return None;
        }
        let pid = state.next_pid;
        state.next_pid += 1;
        state.alive.insert(pid);
        Some(pid)
    }

    async fn terminate_pid(&self, pid: Pid) -> bool {
        let mut state = self.inner.lock();
        state.calls.push(ProcessCall::TerminatePid(pid));
        let ok = state.kill_succeeds_for.contains(&pid);
        if ok {
            state.alive.remove(&pid);
        }
        ok
    }

    async fn taskkill_pid(&self, pid: Pid, force: bool, tree: bool) -> bool {
        let mut state = self.inner.lock();
        state.calls.push(ProcessCall::TaskkillPid { pid, force, tree });
        let ok = state.kill_succeeds_for.contains(&pid);
        if ok {
            state.alive.remove(&pid);
        }
        ok
    }

    async fn send_break(&self, pid: Pid) -> bool {
        let mut state = self.inner.lock();
        state.calls.push(ProcessCall::SendBreak(pid));
        let ok = state.break_succeeds_for.contains(&pid);
        if ok {
            state.alive.remove(&pid);
        }
        ok
    }

    async fn send_break_detached(&self, pid: Pid) -> bool {
        let mut state = self.inner.lock();
        state.calls.push(ProcessCall::SendBreakDetached(pid));
        let ok = state.break_succeeds_for.contains(&pid);
        if ok {
            state.alive.remove(&pid);
        }
        ok
    }

    async fn kill_by_path(&self, path: &str) -> bool {
        let mut state = self.inner.lock();
        state.calls.push(ProcessCall::KillByPath(path.to_string()));
        state.kill_by_path_succeeds
    }

    async fn is_alive(&self, pid: Pid) -> bool {
        self.inner.lock().alive.contains(&pid)
    }
}
