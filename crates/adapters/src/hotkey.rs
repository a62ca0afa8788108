// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hotkey injection adapter.
//!
//! Parsing (value → key tokens) is pure and unit-tested without touching
//! the OS; only the actual key-event injection needs a real adapter.

use async_trait::async_trait;
use rc_core::HotkeyActionKind;

/// A single named or character key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyToken {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    Space,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Function(u8),
    Char(char),
}

fn parse_key_token(token: &str) -> Option<KeyToken> {
    match token.to_ascii_lowercase().as_str() {
        "up" => Some(KeyToken::Up),
        "down" => Some(KeyToken::Down),
        "left" => Some(KeyToken::Left),
        "right" => Some(KeyToken::Right),
        "enter" => Some(KeyToken::Enter),
        "esc" | "escape" => Some(KeyToken::Esc),
        "tab" => Some(KeyToken::Tab),
        "space" => Some(KeyToken::Space),
        "backspace" => Some(KeyToken::Backspace),
        "delete" => Some(KeyToken::Delete),
        "insert" => Some(KeyToken::Insert),
        "home" => Some(KeyToken::Home),
        "end" => Some(KeyToken::End),
        "pageup" => Some(KeyToken::PageUp),
        "pagedown" => Some(KeyToken::PageDown),
        other => {
            if let Some(n) = other.strip_prefix('f').and_then(|d| d.parse::<u8>().ok()) {
                if (1..=24).contains(&n) {
                    return Some(KeyToken::Function(n));
                }
            }
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyToken::Char(c)),
                _ => None,
            }
        }
    }
}

/// Ordered modifiers: `ctrl` → `alt` → `shift` → `win`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub win: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyCombo {
    pub modifiers: Modifiers,
    pub key: KeyToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeySequence {
    Combo(HotkeyCombo),
    Chars(Vec<char>),
}

/// Parse a hotkey value: a `+`-joined combination, or a plain string whose
/// characters are pressed serially.
pub fn parse_hotkey_value(value: &str) -> Option<HotkeySequence> {
    if value.is_empty() {
        return None;
    }
    if value.contains('+') {
        let mut modifiers = Modifiers::default();
        let mut key = None;
        for part in value.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "win" | "windows" => modifiers.win = true,
                other => key = parse_key_token(other),
            }
        }
        key.map(|key| HotkeySequence::Combo(HotkeyCombo { modifiers, key }))
    } else {
        Some(HotkeySequence::Chars(value.chars().collect()))
    }
}

#[async_trait]
pub trait HotkeyAdapter: Clone + Send + Sync + 'static {
    /// `kind == None` or an empty/unparseable value is a no-op; the Router
    /// still logs the attempt.
    async fn hotkey(&self, kind: HotkeyActionKind, value: Option<&str>, char_delay_ms: u32);
}

#[cfg(windows)]
mod windows_impl {
    #![allow(unsafe_code)]

    use super::{HotkeyAdapter, HotkeyCombo, HotkeySequence, KeyToken, Modifiers};
    use async_trait::async_trait;
    use rc_core::HotkeyActionKind;
    use std::time::Duration;
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        SendInput, VkKeyScanW, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
        KEYEVENTF_KEYUP, VIRTUAL_KEY, VK_BACK, VK_CONTROL, VK_DELETE, VK_DOWN, VK_END, VK_ESCAPE,
        VK_F1, VK_HOME, VK_INSERT, VK_LEFT, VK_LWIN, VK_MENU, VK_NEXT, VK_PRIOR, VK_RETURN,
        VK_RIGHT, VK_SHIFT, VK_SPACE, VK_TAB, VK_UP,
    };

    #[derive(Clone, Copy, Debug, Default)]
    pub struct WindowsHotkeyAdapter;

    impl WindowsHotkeyAdapter {
        pub fn new() -> Self {
            Self
        }
    }

    fn vk_for(token: KeyToken) -> Option<VIRTUAL_KEY> {
        Some(match token {
            KeyToken::Up => VK_UP,
            KeyToken::Down => VK_DOWN,
            KeyToken::Left => VK_LEFT,
            KeyToken::Right => VK_RIGHT,
            KeyToken::Enter => VK_RETURN,
            KeyToken::Esc => VK_ESCAPE,
            KeyToken::Tab => VK_TAB,
            KeyToken::Space => VK_SPACE,
            KeyToken::Backspace => VK_BACK,
            KeyToken::Delete => VK_DELETE,
            KeyToken::Insert => VK_INSERT,
            KeyToken::Home => VK_HOME,
            KeyToken::End => VK_END,
            KeyToken::PageUp => VK_PRIOR,
            KeyToken::PageDown => VK_NEXT,
            KeyToken::Function(n @ 1..=24) => VIRTUAL_KEY(VK_F1.0 + (n as u16 - 1)),
            KeyToken::Function(_) => return None,
            KeyToken::Char(c) => {
                let scan = unsafe { VkKeyScanW(c as u16) };
                if scan == -1 {
                    return None;
                }
                VIRTUAL_KEY((scan as u16) & 0xFF)
            }
        })
    }

    fn key_event(vk: VIRTUAL_KEY, flags: KEYBD_EVENT_FLAGS) -> INPUT {
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: vk,
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }

    fn send_vk_down_up(vk: VIRTUAL_KEY) {
        let down = key_event(vk, KEYBD_EVENT_FLAGS(0));
        let up = key_event(vk, KEYEVENTF_KEYUP);
        unsafe {
            let _ = SendInput(&[down, up], std::mem::size_of::<INPUT>() as i32);
        }
    }

    fn modifier_vks(modifiers: Modifiers) -> Vec<VIRTUAL_KEY> {
        let mut vks = Vec::new();
        if modifiers.ctrl {
            vks.push(VK_CONTROL);
        }
        if modifiers.alt {
            vks.push(VK_MENU);
        }
        if modifiers.shift {
            vks.push(VK_SHIFT);
        }
        if modifiers.win {
            vks.push(VK_LWIN);
        }
        vks
    }

    fn send_combo(combo: HotkeyCombo) {
        let Some(key_vk) = vk_for(combo.key) else {
            tracing::warn!(?combo, "unmapped hotkey target");
            return;
        };
        let modifier_vks = modifier_vks(combo.modifiers);
        let downs: Vec<INPUT> = modifier_vks
            .iter()
            .map(|&vk| key_event(vk, KEYBD_EVENT_FLAGS(0)))
            .chain(std::iter::once(key_event(key_vk, KEYBD_EVENT_FLAGS(0))))
            .chain(std::iter::once(key_event(key_vk, KEYEVENTF_KEYUP)))
            .collect();
        let ups: Vec<INPUT> = modifier_vks
            .iter()
            .rev()
            .map(|&vk| key_event(vk, KEYEVENTF_KEYUP))
            .collect();
        unsafe {
            let _ = SendInput(&downs, std::mem::size_of::<INPUT>() as i32);
            let _ = SendInput(&ups, std::mem::size_of::<INPUT>() as i32);
        }
    }

    #[async_trait]
    impl HotkeyAdapter for WindowsHotkeyAdapter {
        async fn hotkey(&self, kind: HotkeyActionKind, value: Option<&str>, char_delay_ms: u32) {
            if kind != HotkeyActionKind::Keyboard {
                return;
            }
            let Some(value) = value else {
                return;
            };
            match super::parse_hotkey_value(value) {
                Some(HotkeySequence::Combo(combo)) => send_combo(combo),
                Some(HotkeySequence::Chars(chars)) => {
                    let mut first = true;
                    for c in chars {
                        if !first {
                            tokio::time::sleep(Duration::from_millis(char_delay_ms as u64)).await;
                        }
                        first = false;
                        if let Some(vk) = vk_for(KeyToken::Char(c)) {
                            send_vk_down_up(vk);
                        } else {
                            tracing::warn!(%c, "unmapped hotkey character");
                        }
                    }
                }
                None => tracing::warn!(%value, "unparseable hotkey value"),
            }
        }
    }
}
#[cfg(windows)]
pub use windows_impl::WindowsHotkeyAdapter;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpHotkeyAdapter;

impl NoOpHotkeyAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HotkeyAdapter for NoOpHotkeyAdapter {
    async fn hotkey(&self, _kind: HotkeyActionKind, _value: Option<&str>, _char_delay_ms: u32) {}
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{HotkeyAdapter, HotkeyActionKind};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HotkeyCall {
        pub kind: HotkeyActionKind,
        pub value: Option<String>,
        pub char_delay_ms: u32,
    }

    #[derive(Clone, Default)]
    pub struct FakeHotkeyAdapter {
        calls: Arc<Mutex<Vec<HotkeyCall>>>,
    }

    impl FakeHotkeyAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<HotkeyCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl HotkeyAdapter for FakeHotkeyAdapter {
        async fn hotkey(&self, kind: HotkeyActionKind, value: Option<&str>, char_delay_ms: u32) {
            self.calls.lock().push(HotkeyCall {
                kind,
                value: value.map(str::to_string),
                char_delay_ms,
            });
        }
    }
}
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHotkeyAdapter, HotkeyCall};

#[cfg(test)]
#[path = "hotkey_tests.rs"]
mod tests;
