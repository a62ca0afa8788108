// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Windows process lifecycle adapter.
//!
//! Spawns go through `tokio::process::Command` with the Win32 creation
//! flags applied via `CommandExt::creation_flags` rather than hand-rolled
//! `CreateProcessW` calls — termination and liveness queries are the only
//! spots that need raw `windows` crate FFI.
#![allow(unsafe_code)]

use super::ProcessAdapter;
use crate::subprocess::{run_capped, TOOL_OUTPUT_TIMEOUT};
use async_trait::async_trait;
use rc_core::Pid;
use std::os::windows::process::CommandExt;
use tokio::process::Command;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Console::{
    AttachConsole, FreeConsole, GenerateConsoleCtrlEvent, SetConsoleCtrlHandler,
    CTRL_BREAK_EVENT,
};
use windows::Win32::System::Threading::{
    GetExitCodeProcess, OpenProcess, TerminateProcess, PROCESS_QUERY_LIMITED_INFORMATION,
    PROCESS_TERMINATE, STILL_ACTIVE,
};

/// Suppress the console window entirely.
const CREATE_NO_WINDOW: u32 = 0x0800_0000;
/// Open a new console for the child (used when `hide == false`).
const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;
/// Required on every command-family spawn so `send_break` can target the
/// child later.
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

#[derive(Clone, Copy, Debug, Default)]
pub struct WindowsProcessAdapter;

impl WindowsProcessAdapter {
    pub fn new() -> Self {
        Self
    }

    fn spawn_tracked(mut cmd: Command, description: &str) -> Option<Pid> {
        match cmd.spawn() {
            Ok(child) => {
                let pid = child.id();
                // The child is intentionally not awaited: the pid is
                // tracked by the Router's process table and the process
                // runs detached from this task.
                std::mem::forget(child);
                pid
            }
            Err(e) => {
                tracing::warn!(%description, error = %e, "spawn failed");
                None
            }
        }
    }
}

#[async_trait]
impl ProcessAdapter for WindowsProcessAdapter {
    async fn run_program(&self, path: &str, args: &[String]) -> Option<Pid> {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".ps1") {
            let mut cmd = Command::new("powershell.exe");
            cmd.args(["-ExecutionPolicy", "Bypass", "-File", path]).args(args);
            cmd.creation_flags(CREATE_NEW_PROCESS_GROUP | CREATE_NO_WINDOW);
            return Self::spawn_tracked(cmd, "run_program(.ps1)");
        }
        if lower.ends_with(".bat") || lower.ends_with(".cmd") {
            let mut cmd = Command::new("cmd.exe");
            cmd.args(["/c", path]).args(args);
            cmd.creation_flags(CREATE_NEW_PROCESS_GROUP | CREATE_NO_WINDOW);
            return Self::spawn_tracked(cmd, "run_program(.bat/.cmd)");
        }

        let mut shell_open = Command::new("cmd.exe");
        shell_open.args(["/c", "start", "", path]).args(args);
        shell_open.creation_flags(CREATE_NEW_PROCESS_GROUP | CREATE_NO_WINDOW);
        if let Some(pid) = Self::spawn_tracked(shell_open, "run_program(shell-open)") {
            return Some(pid);
        }

        let mut direct = Command::new(path);
        direct.args(args);
        direct.creation_flags(CREATE_NEW_PROCESS_GROUP);
        Self::spawn_tracked(direct, "run_program(direct)")
    }

    async fn run_shell_command(&self, command: &str, hide: bool, keep_open: bool) -> Option<Pid> {
        let mut cmd = Command::new("powershell.exe");
        cmd.args(["-ExecutionPolicy", "Bypass", "-NonInteractive"]);
        if keep_open {
            cmd.arg("-NoExit");
        }
        cmd.args(["-Command", command]);

        let mut flags = CREATE_NEW_PROCESS_GROUP;
        flags |= if hide { CREATE_NO_WINDOW } else { CREATE_NEW_CONSOLE };
        cmd.creation_flags(flags);

        Self::spawn_tracked(cmd, "run_shell_command")
    }

    async fn terminate_pid(&self, pid: Pid) -> bool {
        unsafe {
            let Ok(handle) = OpenProcess(PROCESS_TERMINATE, false, pid) else {
                return false;
            };
            let ok = TerminateProcess(handle, 1).is_ok();
            let _ = CloseHandle(handle);
            ok
        }
    }

    async fn taskkill_pid(&self, pid: Pid, force: bool, tree: bool) -> bool {
        let mut cmd = Command::new("taskkill.exe");
        cmd.args(["/PID", &pid.to_string()]);
        if force {
            cmd.arg("/F");
        }
        if tree {
            cmd.arg("/T");
        }
        match run_capped(cmd, "taskkill").await {
            Ok(output) => output.success,
            Err(e) => {
                tracing::warn!(pid, error = %e, "taskkill failed");
                false
            }
        }
    }

    async fn send_break(&self, pid: Pid) -> bool {
        let pid = pid;
        let result = tokio::task::spawn_blocking(move || unsafe {
            if AttachConsole(pid).is_err() {
                return false;
            }
            // Disable this process's own Ctrl+Break handler so the event
            // meant for the child doesn't also terminate us.
            let _ = SetConsoleCtrlHandler(None, true);
            let sent = GenerateConsoleCtrlEvent(CTRL_BREAK_EVENT, 0).is_ok();
            let _ = SetConsoleCtrlHandler(None, false);
            let _ = FreeConsole();
            sent
        })
        .await;

        match result {
            Ok(sent) => sent,
            Err(e) => {
                tracing::warn!(pid, error = %e, "send_break task panicked");
                false
            }
        }
    }

    async fn send_break_detached(&self, pid: Pid) -> bool {
        unsafe { GenerateConsoleCtrlEvent(CTRL_BREAK_EVENT, pid).is_ok() }
    }

    async fn kill_by_path(&self, path: &str) -> bool {
        // No first-class Win32 "find pid by image path" call short of a
        // toolhelp snapshot walk; delegate to `wmic`/`taskkill`'s own image
        // filter, which resolves the basename the same way Explorer does.
        let Some(basename) = std::path::Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
        else {
            return false;
        };
        let mut cmd = Command::new("taskkill.exe");
        cmd.args(["/IM", basename, "/F"]);
        match tokio::time::timeout(TOOL_OUTPUT_TIMEOUT, cmd.output()).await {
            Ok(Ok(output)) => output.status.success(),
            Ok(Err(e)) => {
                tracing::warn!(%basename, error = %e, "kill_by_path failed");
                false
            }
            Err(_) => {
                tracing::warn!(%basename, "kill_by_path timed out");
                false
            }
        }
    }

    async fn is_alive(&self, pid: Pid) -> bool {
        unsafe {
            let Ok(handle) = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) else {
                return false;
            };
            let mut code: u32 = 0;
            let ok = GetExitCodeProcess(handle, &mut code).is_ok();
            let _ = CloseHandle(handle);
            ok && code == STILL_ACTIVE.0 as u32
        }
    }
}

