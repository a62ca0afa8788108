// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn app_off_preset_defaults_to_kill() {
    assert_eq!(AppOffPreset::default(), AppOffPreset::Kill);
}

#[test]
fn command_off_preset_defaults_to_kill() {
    assert_eq!(CommandOffPreset::default(), CommandOffPreset::Kill);
}

#[test]
fn serve_off_preset_defaults_to_stop() {
    assert_eq!(ServeOffPreset::default(), ServeOffPreset::Stop);
}

#[test]
fn window_defaults_to_show() {
    assert_eq!(Window::default(), Window::Show);
}

#[test]
fn command_binding_falls_back_to_legacy_value() {
    let binding = CommandBinding {
        topic: "t".into(),
        display_name: None,
        legacy_value: Some("legacy cmd".into()),
        on_value: None,
        off_value: None,
        off_preset: CommandOffPreset::Kill,
        window: Window::Show,
    };
    assert_eq!(binding.effective_on_value(), Some("legacy cmd"));
}

#[test]
fn command_binding_prefers_on_value_over_legacy() {
    let binding = CommandBinding {
        topic: "t".into(),
        display_name: None,
        legacy_value: Some("legacy cmd".into()),
        on_value: Some("new cmd".into()),
        off_value: None,
        off_preset: CommandOffPreset::Kill,
        window: Window::Show,
    };
    assert_eq!(binding.effective_on_value(), Some("new cmd"));
}

#[test]
fn command_binding_empty_on_value_falls_back() {
    let binding = CommandBinding {
        topic: "t".into(),
        display_name: None,
        legacy_value: Some("legacy cmd".into()),
        on_value: Some(String::new()),
        off_value: None,
        off_preset: CommandOffPreset::Kill,
        window: Window::Show,
    };
    assert_eq!(binding.effective_on_value(), Some("legacy cmd"));
}

#[test]
fn off_preset_conversions_preserve_meaning() {
    assert_eq!(OffPreset::from(AppOffPreset::Kill), OffPreset::Kill);
    assert_eq!(
        OffPreset::from(CommandOffPreset::Interrupt),
        OffPreset::Interrupt
    );
    assert_eq!(OffPreset::from(ServeOffPreset::Stop), OffPreset::Kill);
    assert_eq!(OffPreset::from(ServeOffPreset::None), OffPreset::None);
}
