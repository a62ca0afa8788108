// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process lifecycle adapter.
//!
//! Command-family child processes are always spawned in a new process
//! group so that [`ProcessAdapter::send_break`]
//! can target them later.

use async_trait::async_trait;
use rc_core::Pid;

#[async_trait]
pub trait ProcessAdapter: Clone + Send + Sync + 'static {
    /// `.ps1` runs under the shell scripting engine with execution-policy
    /// bypass; `.bat`/`.cmd` under the command interpreter's `/c`; anything
    /// else is shell-opened, falling back to a direct spawn.
    async fn run_program(&self, path: &str, args: &[String]) -> Option<Pid>;

    /// Spawn `command` under the shell scripting engine, non-interactively,
    /// with execution-policy bypass. `hide` suppresses the console window;
    /// `keep_open` passes `-NoExit` so the window survives the command.
    async fn run_shell_command(&self, command: &str, hide: bool, keep_open: bool) -> Option<Pid>;

    /// Forceful immediate termination.
    async fn terminate_pid(&self, pid: Pid) -> bool;

    /// Capture-output invocation of the OS task-kill tool.
    async fn taskkill_pid(&self, pid: Pid, force: bool, tree: bool) -> bool;

    /// Attach to the target's console, disable this process's own break
    /// handler, send a break event, detach, and restore the handler.
    async fn send_break(&self, pid: Pid) -> bool;

    /// Same as `send_break` without attaching first; may fail when this
    /// process does not already share a console with the target.
    async fn send_break_detached(&self, pid: Pid) -> bool;

    /// Best-effort kill of every process whose image path matches `path`,
    /// used for application off-presets with no explicit off-path.
    async fn kill_by_path(&self, path: &str) -> bool;

    /// Liveness query; `false` for both "exited" and "query failed".
    async fn is_alive(&self, pid: Pid) -> bool;
}

/// Adapts any [`ProcessAdapter`] into [`rc_core::process_table::LivenessProbe`].
/// `PidTable::cleanup_dead` takes a `&dyn LivenessProbe`, a synchronous
/// interface; the Router snapshots liveness for the pids it is about to
/// inspect before calling `cleanup_dead`, so this bridge never needs to be
/// async itself — see `rc-engine`'s command dispatch.
pub struct SyncLivenessSnapshot {
    alive: std::collections::HashSet<Pid>,
}

impl SyncLivenessSnapshot {
    pub fn new(alive: std::collections::HashSet<Pid>) -> Self {
        Self { alive }
    }
}

impl rc_core::process_table::LivenessProbe for SyncLivenessSnapshot {
    fn is_alive(&self, pid: Pid) -> bool {
        self.alive.contains(&pid)
    }
}

#[cfg(windows)]
mod windows_impl;
#[cfg(windows)]
pub use windows_impl::WindowsProcessAdapter;

mod noop;
pub use noop::NoOpProcessAdapter;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProcessAdapter, ProcessCall};

#[cfg(test)]
mod tests;
