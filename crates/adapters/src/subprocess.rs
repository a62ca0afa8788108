// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers shared by the process, service, and
//! brightness adapters.

use std::process::Output;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// External tool invocations that capture output use this wall-clock
/// timeout; on expiry the child is abandoned, not killed, to
/// keep the dispatcher responsive.
pub const TOOL_OUTPUT_TIMEOUT: Duration = Duration::from_secs(15);

/// Cap on bytes read from each of a captured child's stdout/stderr streams.
/// Unbounded piped reads are a DoS vector; stop reading at the cap but
/// still wait for exit.
pub const CAPTURE_CAP_BYTES: usize = 8 * 1024;

/// Run a subprocess command with a timeout, returning its full output.
///
/// Wraps `Command::output()` with `tokio::time::timeout`, converting
/// timeout expiration into a descriptive error message. On timeout the
/// child is intentionally left running, not killed.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{description} failed: {io_err}")),
        Err(_elapsed) => Err(format!(
            "{description} timed out after {}s",
            timeout.as_secs()
        )),
    }
}

/// Run a subprocess with its stdout/stderr each capped at
/// [`CAPTURE_CAP_BYTES`], within [`TOOL_OUTPUT_TIMEOUT`]. Used by action
/// executors that only need output for diagnostics (external brightness
/// tool, service control, task-kill).
pub async fn run_capped(mut cmd: Command, description: &str) -> Result<CappedOutput, String> {
    cmd.stdout(std::process::Stdio::piped());
    cmd.stderr(std::process::Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| format!("{description} failed: {e}"))?;
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    let fut = async {
        let stdout = read_capped(stdout_pipe).await;
        let stderr = read_capped(stderr_pipe).await;
        let status = child.wait().await;
        (stdout, stderr, status)
    };

    match tokio::time::timeout(TOOL_OUTPUT_TIMEOUT, fut).await {
        Ok((stdout, stderr, Ok(status))) => Ok(CappedOutput {
            success: status.success(),
            stdout,
            stderr,
        }),
        Ok((_, _, Err(e))) => Err(format!("{description} wait failed: {e}")),
        Err(_elapsed) => Err(format!(
            "{description} timed out after {}s",
            TOOL_OUTPUT_TIMEOUT.as_secs()
        )),
    }
}

async fn read_capped<R: tokio::io::AsyncRead + Unpin>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let mut chunk = [0u8; 4096];
        while buf.len() < CAPTURE_CAP_BYTES {
            match pipe.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
    }
    buf
}

#[derive(Debug, Clone)]
pub struct CappedOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Shell-command pre-processing: substitute the literal token
/// `{value}` with the payload's numeric value when present, then rewrite a
/// leading `curl ` or `curl\t` to `curl.exe` so the shell does not resolve
/// the built-in alias to an HTTP cmdlet.
pub fn prepare_shell_command(raw: &str, value: Option<i32>) -> String {
    let substituted = match value {
        Some(v) => raw.replace("{value}", &v.to_string()),
        None => raw.to_string(),
    };
    if let Some(rest) = substituted.strip_prefix("curl ") {
        format!("curl.exe {rest}")
    } else if let Some(rest) = substituted.strip_prefix("curl\t") {
        format!("curl.exe {rest}")
    } else {
        substituted
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
