// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parse_hotkey_value_rejects_empty() {
    assert_eq!(parse_hotkey_value(""), None);
}

#[test]
fn parse_hotkey_value_plain_string_is_serial_chars() {
    assert_eq!(
        parse_hotkey_value("abc"),
        Some(HotkeySequence::Chars(vec!['a', 'b', 'c']))
    );
}

#[test]
fn parse_hotkey_value_combo_orders_modifiers_regardless_of_input_order() {
    let parsed = parse_hotkey_value("shift+ctrl+a").unwrap();
    match parsed {
        HotkeySequence::Combo(combo) => {
            assert_eq!(
                combo.modifiers,
                Modifiers {
                    ctrl: true,
                    alt: false,
                    shift: true,
                    win: false,
                }
            );
            assert_eq!(combo.key, KeyToken::Char('a'));
        }
        HotkeySequence::Chars(_) => panic!("expected a combo"),
    }
}

#[test]
fn parse_hotkey_value_recognises_named_keys() {
    assert_eq!(
        parse_hotkey_value("ctrl+enter"),
        Some(HotkeySequence::Combo(HotkeyCombo {
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
            key: KeyToken::Enter,
        }))
    );
}

#[test]
fn parse_hotkey_value_recognises_function_keys() {
    assert_eq!(
        parse_hotkey_value("alt+f12"),
        Some(HotkeySequence::Combo(HotkeyCombo {
            modifiers: Modifiers {
                alt: true,
                ..Default::default()
            },
            key: KeyToken::Function(12),
        }))
    );
}

#[test]
fn parse_hotkey_value_rejects_out_of_range_function_key() {
    assert_eq!(parse_hotkey_value("ctrl+f99"), None);
}

#[test]
fn parse_hotkey_value_rejects_combo_without_resolvable_key() {
    assert_eq!(parse_hotkey_value("ctrl+alt"), None);
}

#[tokio::test]
async fn fake_hotkey_adapter_records_calls() {
    let adapter = FakeHotkeyAdapter::new();
    adapter
        .hotkey(HotkeyActionKind::Keyboard, Some("ctrl+c"), 50)
        .await;
    let calls = adapter.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].value.as_deref(), Some("ctrl+c"));
    assert_eq!(calls[0].char_delay_ms, 50);
}
