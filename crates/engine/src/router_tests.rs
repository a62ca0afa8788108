// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rc_adapters::{
    FakeBrightnessAdapter, FakeHotkeyAdapter, FakeMediaAdapter, FakeNotifyAdapter,
    FakePowerAdapter, FakeProcessAdapter, FakeServiceAdapter, FakeVolumeAdapter, HotkeyCall,
    PowerCall, ProcessCall, ServiceCall,
};

type TestRouter = Router<
    FakePowerAdapter,
    FakeMediaAdapter,
    FakeVolumeAdapter,
    FakeBrightnessAdapter,
    FakeProcessAdapter,
    FakeServiceAdapter,
    FakeHotkeyAdapter,
    FakeNotifyAdapter,
>;

struct Harness {
    router: TestRouter,
    power: FakePowerAdapter,
    media: FakeMediaAdapter,
    volume: FakeVolumeAdapter,
    brightness: FakeBrightnessAdapter,
    process: FakeProcessAdapter,
    service: FakeServiceAdapter,
    hotkey: FakeHotkeyAdapter,
}

fn harness(json: &str) -> Harness {
    let config = ConfigTree::parse(json).expect("valid json object");
    let power = FakePowerAdapter::new();
    let media = FakeMediaAdapter::new();
    let volume = FakeVolumeAdapter::new();
    let brightness = FakeBrightnessAdapter::new();
    let process = FakeProcessAdapter::new();
    let service = FakeServiceAdapter::new();
    let hotkey = FakeHotkeyAdapter::new();
    let notify = FakeNotifyAdapter::new();

    let adapters = Adapters {
        power: power.clone(),
        media: media.clone(),
        volume: volume.clone(),
        brightness: brightness.clone(),
        process: process.clone(),
        service: service.clone(),
        hotkey: hotkey.clone(),
        notify,
    };

    Harness {
        router: Router::new(config, adapters),
        power,
        media,
        volume,
        brightness,
        process,
        service,
        hotkey,
    }
}

#[tokio::test]
async fn rejected_payload_causes_no_side_effects() {
    let h = harness(
        r#"{"application1_checked": true, "application1": "rc/app", "application1_on_value": "x.exe"}"#,
    );
    h.router.dispatch("rc/app", "on#12x").await;
    assert!(h.process.calls().is_empty());
}

#[tokio::test]
async fn unknown_topic_is_a_no_op() {
    let h = harness(r#"{}"#);
    h.router.dispatch("rc/nothing", "on").await;
    assert!(h.process.calls().is_empty());
}

#[tokio::test]
async fn application_on_runs_program_off_kills_by_path() {
    let h = harness(
        r#"{
            "application1_checked": true,
            "application1": "rc/app",
            "application1_on_value": "C:\\x\\y.exe",
            "application1_off_preset": "kill"
        }"#,
    );
    h.router.dispatch("rc/app", "on").await;
    h.router.dispatch("rc/app", "off").await;
    assert_eq!(
        h.process.calls(),
        vec![
            ProcessCall::RunProgram {
                path: "C:\\x\\y.exe".to_string(),
                args: vec![],
            },
            ProcessCall::KillByPath("C:\\x\\y.exe".to_string()),
        ]
    );
}

#[tokio::test]
async fn command_on_tracks_pid_and_kill_off_clears_table() {
    let h = harness(
        r#"{
            "command1_checked": true,
            "command1": "rc/cmd",
            "command1_on_value": "python srv.py",
            "command1_off_preset": "kill"
        }"#,
    );
    h.router.dispatch("rc/cmd", "on").await;
    h.router.dispatch("rc/cmd", "on").await;
    // two distinct pids were spawned and tracked
    let run_calls: Vec<_> = h
        .process
        .calls()
        .into_iter()
        .filter(|c| matches!(c, ProcessCall::RunShellCommand { .. }))
        .collect();
    assert_eq!(run_calls.len(), 2);

    h.router.dispatch("rc/cmd", "off").await;
    let terminate_calls: Vec<_> = h
        .process
        .calls()
        .into_iter()
        .filter(|c| matches!(c, ProcessCall::TerminatePid(_)))
        .collect();
    assert_eq!(terminate_calls.len(), 2);
}

#[tokio::test]
async fn command_interrupt_off_stops_after_first_successful_break() {
    let h = harness(
        r#"{
            "command1_checked": true,
            "command1": "rc/cmd",
            "command1_on_value": "python srv.py",
            "command1_off_preset": "interrupt"
        }"#,
    );
    h.router.dispatch("rc/cmd", "on").await;
    h.router.dispatch("rc/cmd", "on").await;
    h.process.allow_break(1001); // the later-tracked pid

    h.router.dispatch("rc/cmd", "off").await;

    let calls = h.process.calls();
    assert!(calls.contains(&ProcessCall::SendBreak(1001)));
    assert!(!calls.iter().any(|c| matches!(c, ProcessCall::TerminatePid(_))));
}

#[tokio::test]
async fn command_custom_off_without_value_warns_and_does_not_spawn() {
    let h = harness(
        r#"{
            "command1_checked": true,
            "command1": "rc/cmd",
            "command1_on_value": "python srv.py",
            "command1_off_preset": "custom"
        }"#,
    );
    h.router.dispatch("rc/cmd", "off").await;
    assert!(h.process.calls().is_empty());
}

#[tokio::test]
async fn service_on_starts_off_stops_by_default() {
    let h = harness(
        r#"{"serve1_checked": true, "serve1": "rc/serve", "serve1_service": "Spooler"}"#,
    );
    h.router.dispatch("rc/serve", "on").await;
    h.router.dispatch("rc/serve", "off").await;
    assert_eq!(
        h.service.calls(),
        vec![
            ServiceCall::Start("Spooler".to_string()),
            ServiceCall::Stop("Spooler".to_string()),
        ]
    );
}

#[tokio::test]
async fn service_custom_off_runs_shell_command() {
    let h = harness(
        r#"{
            "serve1_checked": true,
            "serve1": "rc/serve",
            "serve1_service": "Spooler",
            "serve1_off_preset": "custom",
            "serve1_off_value": "net stop Spooler"
        }"#,
    );
    h.router.dispatch("rc/serve", "off").await;
    assert_eq!(
        h.process.calls(),
        vec![ProcessCall::RunShellCommand {
            command: "net stop Spooler".to_string(),
            hide: true,
            keep_open: false,
        }]
    );
}

#[tokio::test]
async fn computer_builtin_uses_defaults_when_unconfigured() {
    let h = harness(r#"{"Computer_checked": true, "Computer": "rc/computer"}"#);
    h.router.dispatch("rc/computer", "on").await;
    h.router.dispatch("rc/computer", "off").await;
    assert_eq!(
        h.power.calls(),
        vec![
            PowerCall::Computer(rc_adapters::ComputerActionKind::Lock, 0),
            PowerCall::Computer(rc_adapters::ComputerActionKind::None, 60),
        ]
    );
}

#[tokio::test]
async fn screen_builtin_rejects_out_of_range_percent() {
    let h = harness(r#"{"screen_checked": true, "screen": "rc/screen"}"#);
    h.router.dispatch("rc/screen", "on#42").await;
    h.router.dispatch("rc/screen", "on#120").await;
    assert_eq!(
        h.brightness.calls(),
        vec![rc_adapters::BrightnessCall::Native(42)]
    );
}

#[tokio::test]
async fn volume_builtin_off_sets_zero() {
    let h = harness(r#"{"volume_checked": true, "volume": "rc/volume"}"#);
    h.router.dispatch("rc/volume", "off").await;
    assert_eq!(h.volume.calls(), vec![0]);
}

#[tokio::test]
async fn sleep_builtin_fires_synchronously_when_delay_is_zero() {
    let h = harness(
        r#"{"sleep_checked": true, "sleep": "rc/sleep", "sleep_on_action": "sleep", "sleep_on_delay": 0}"#,
    );
    h.router.dispatch("rc/sleep", "on").await;
    assert_eq!(
        h.power.calls(),
        vec![PowerCall::Sleep(rc_adapters::SleepActionKind::Sleep)]
    );
}

#[tokio::test(start_paused = true)]
async fn sleep_builtin_delays_the_executor_call() {
    let h = harness(
        r#"{"sleep_checked": true, "sleep": "rc/sleep", "sleep_on_action": "sleep", "sleep_on_delay": 3}"#,
    );
    h.router.dispatch("rc/sleep", "on").await;
    // dispatch returns immediately; nothing has fired yet
    assert!(h.power.calls().is_empty());

    tokio::time::advance(std::time::Duration::from_secs(3)).await;
    tokio::task::yield_now().await;
    assert_eq!(
        h.power.calls(),
        vec![PowerCall::Sleep(rc_adapters::SleepActionKind::Sleep)]
    );
}

#[tokio::test]
async fn media_builtin_resolves_key_from_payload() {
    let h = harness(r#"{"media_checked": true, "media": "rc/media"}"#);
    h.router.dispatch("rc/media", "off").await;
    assert_eq!(
        h.media.calls(),
        vec![rc_adapters::MediaKey::Next]
    );
}

#[tokio::test]
async fn hotkey_on_off_dispatch() {
    let h = harness(
        r#"{
            "hotkey1_checked": true,
            "hotkey1": "rc/hotkey",
            "hotkey1_on_type": "keyboard",
            "hotkey1_on_value": "ctrl+c",
            "hotkey1_off_type": "keyboard",
            "hotkey1_off_value": "ctrl+v",
            "hotkey1_char_delay_ms": 10
        }"#,
    );
    h.router.dispatch("rc/hotkey", "on").await;
    h.router.dispatch("rc/hotkey", "off").await;
    assert_eq!(
        h.hotkey.calls(),
        vec![
            HotkeyCall {
                kind: rc_core::HotkeyActionKind::Keyboard,
                value: Some("ctrl+c".to_string()),
                char_delay_ms: 10,
            },
            HotkeyCall {
                kind: rc_core::HotkeyActionKind::Keyboard,
                value: Some("ctrl+v".to_string()),
                char_delay_ms: 10,
            },
        ]
    );
}

#[tokio::test]
async fn ordering_property_application_wins_over_builtin_on_shared_topic() {
    // Applications is scanned before Built-ins, so a collision favours the application.
    let h = harness(
        r#"{
            "application1_checked": true,
            "application1": "rc/shared",
            "application1_on_value": "x.exe",
            "Computer_checked": true,
            "Computer": "rc/shared"
        }"#,
    );
    h.router.dispatch("rc/shared", "on").await;
    assert!(!h.process.calls().is_empty());
    assert!(h.power.calls().is_empty());
}

#[tokio::test]
async fn ordering_property_commands_win_over_services() {
    let h = harness(
        r#"{
            "command1_checked": true,
            "command1": "rc/shared",
            "command1_on_value": "echo hi",
            "serve1_checked": true,
            "serve1": "rc/shared",
            "serve1_service": "Spooler"
        }"#,
    );
    h.router.dispatch("rc/shared", "on").await;
    assert!(h.service.calls().is_empty());
}

#[test]
fn topics_reflects_enabled_bindings() {
    let h = harness(
        r#"{"application1_checked": true, "application1": "rc/app", "application1_on_value": "x.exe"}"#,
    );
    assert_eq!(h.router.topics(), vec!["rc/app".to_string()]);
    assert_eq!(h.router.enabled_topic_count(), 1);
}
