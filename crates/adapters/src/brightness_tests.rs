// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn external_args_all_mode() {
    let cfg = ExternalBrightnessConfig {
        exe_path: "TwinkleTray.exe".to_string(),
        target_mode: ExternalTargetMode::All,
        target_value: String::new(),
        overlay: true,
        panel: false,
    };
    assert_eq!(
        external_args(42, &cfg),
        vec!["--All", "--Set=42", "--Overlay"]
    );
}

#[test]
fn external_args_monitor_id_mode() {
    let cfg = ExternalBrightnessConfig {
        exe_path: "TwinkleTray.exe".to_string(),
        target_mode: ExternalTargetMode::MonitorId,
        target_value: "abc123".to_string(),
        overlay: false,
        panel: true,
    };
    assert_eq!(
        external_args(80, &cfg),
        vec!["--MonitorID=\"abc123\"", "--Set=80", "--Panel"]
    );
}

#[test]
fn external_args_monitor_num_mode_with_no_flags() {
    let cfg = ExternalBrightnessConfig {
        exe_path: "TwinkleTray.exe".to_string(),
        target_mode: ExternalTargetMode::MonitorNum,
        target_value: "1".to_string(),
        overlay: false,
        panel: false,
    };
    assert_eq!(external_args(0, &cfg), vec!["--MonitorNum=1", "--Set=0"]);
}

#[tokio::test]
async fn fake_brightness_adapter_records_native_and_external_calls() {
    let adapter = FakeBrightnessAdapter::new();
    let cfg = ExternalBrightnessConfig {
        exe_path: "TwinkleTray.exe".to_string(),
        target_mode: ExternalTargetMode::All,
        target_value: String::new(),
        overlay: false,
        panel: false,
    };
    assert!(adapter.set_brightness_native(50).await);
    assert!(adapter.set_brightness_external(50, &cfg).await);
    assert_eq!(
        adapter.calls(),
        vec![BrightnessCall::Native(50), BrightnessCall::External(50)]
    );
}

#[tokio::test]
async fn fake_brightness_adapter_honors_failure_flags() {
    let adapter = FakeBrightnessAdapter::new();
    adapter.set_native_succeeds(false);
    assert!(!adapter.set_brightness_native(10).await);
}
