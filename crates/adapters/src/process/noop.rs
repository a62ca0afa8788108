// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op process adapter: every spawn fails, every control action fails.
//! Used on non-Windows builds and wherever process control is deliberately
//! disabled.

use super::ProcessAdapter;
use async_trait::async_trait;
use rc_core::Pid;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpProcessAdapter;

impl NoOpProcessAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessAdapter for NoOpProcessAdapter {
    async fn run_program(&self, _path: &str, _args: &[String]) -> Option<Pid> {
        None
    }

    async fn run_shell_command(&self, _command: &str, _hide: bool, _keep_open: bool) -> Option<Pid> {
        None
    }

    async fn terminate_pid(&self, _pid: Pid) -> bool {
        false
    }

    async fn taskkill_pid(&self, _pid: Pid, _force: bool, _tree: bool) -> bool {
        false
    }

    async fn send_break(&self, _pid: Pid) -> bool {
        false
    }

    async fn send_break_detached(&self, _pid: Pid) -> bool {
        false
    }

    async fn kill_by_path(&self, _path: &str) -> bool {
        false
    }

    async fn is_alive(&self, _pid: Pid) -> bool {
        false
    }
}
