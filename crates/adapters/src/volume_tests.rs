// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn noop_volume_adapter_reports_failure() {
    let adapter = NoOpVolumeAdapter::new();
    assert!(!adapter.set_volume(50).await);
}

#[tokio::test]
async fn fake_volume_adapter_records_calls_and_honors_success_flag() {
    let adapter = FakeVolumeAdapter::new();
    assert!(adapter.set_volume(42).await);
    adapter.set_succeeds(false);
    assert!(!adapter.set_volume(0).await);
    assert_eq!(adapter.calls(), vec![42, 0]);
}
