// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::fake::FakeProcessAdapter;
use super::noop::NoOpProcessAdapter;
use super::*;

#[tokio::test]
async fn noop_adapter_always_reports_failure() {
    let adapter = NoOpProcessAdapter::new();
    assert_eq!(adapter.run_program("C:\\x.exe", &[]).await, None);
    assert!(!adapter.terminate_pid(123).await);
    assert!(!adapter.is_alive(123).await);
}

#[tokio::test]
async fn fake_adapter_spawns_assign_increasing_pids() {
    let adapter = FakeProcessAdapter::new();
    let first = adapter.run_program("C:\\x.exe", &[]).await.unwrap();
    let second = adapter.run_program("C:\\y.exe", &[]).await.unwrap();
    assert_ne!(first, second);
    assert!(adapter.is_alive(first).await);
    assert!(adapter.is_alive(second).await);
}

#[tokio::test]
async fn fake_adapter_records_calls() {
    let adapter = FakeProcessAdapter::new();
    adapter.run_shell_command("python srv.py", true, false).await;
    let calls = adapter.calls();
    assert_eq!(
        calls,
        vec![ProcessCall::RunShellCommand {
            command: "python srv.py".to_string(),
            hide: true,
            keep_open: false,
        }]
    );
}

#[tokio::test]
async fn fake_adapter_break_only_succeeds_when_allowed() {
    let adapter = FakeProcessAdapter::new();
    let pid = adapter.run_shell_command("cmd", false, false).await.unwrap();
    assert!(!adapter.send_break(pid).await);
    assert!(adapter.is_alive(pid).await);

    adapter.allow_break(pid);
    assert!(adapter.send_break(pid).await);
    assert!(!adapter.is_alive(pid).await);
}

#[test]
fn sync_liveness_snapshot_reports_only_known_alive_pids() {
    use rc_core::process_table::LivenessProbe;
    let snapshot = SyncLivenessSnapshot::new(std::collections::HashSet::from([1, 3]));
    assert!(snapshot.is_alive(1));
    assert!(!snapshot.is_alive(2));
    assert!(snapshot.is_alive(3));
}
