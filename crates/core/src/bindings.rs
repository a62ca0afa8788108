// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binding records.
//!
//! Bindings are immutable after construction;
//! `rc-engine` builds them once from the configuration tree and the Router
//! dispatches against them without re-parsing. Each family gets its own
//! off-preset enum so the allowed
//! set is constrained by family at the type level rather than by a runtime
//! check against a shared string.

/// One of the five built-in feature slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Computer,
    Screen,
    Volume,
    Sleep,
    Media,
}

impl BuiltinKind {
    pub const ALL: [BuiltinKind; 5] = [
        BuiltinKind::Computer,
        BuiltinKind::Screen,
        BuiltinKind::Volume,
        BuiltinKind::Sleep,
        BuiltinKind::Media,
    ];

    pub fn config_key(self) -> &'static str {
        match self {
            BuiltinKind::Computer => "Computer",
            BuiltinKind::Screen => "screen",
            BuiltinKind::Volume => "volume",
            BuiltinKind::Sleep => "sleep",
            BuiltinKind::Media => "media",
        }
    }
}

/// `BuiltinBinding` = { topic, enabled, extra config }. The "extra
/// config" varies per kind; rather than a dynamic bag, each kind's
/// on/off-action/delay fields are read directly off the config tree by the
/// Router at dispatch time (the values are cheap string/number lookups,
/// and keeping them un-pre-parsed avoids five near-identical structs).
#[derive(Debug, Clone)]
pub struct BuiltinBinding {
    pub kind: BuiltinKind,
    pub topic: String,
}

/// Off-preset for the Application family: `kill` (default), `none`, `custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppOffPreset {
    #[default]
    Kill,
    None,
    Custom,
}

#[derive(Debug, Clone)]
pub struct AppBinding {
    pub topic: String,
    pub display_name: Option<String>,
    pub on_path: String,
    pub off_path: Option<String>,
    pub off_preset: AppOffPreset,
}

/// Window visibility for command-family shell spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    #[default]
    Show,
    Hide,
}

/// Off-preset for the Command family: `interrupt`, `kill` (default),
/// `none`, `custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandOffPreset {
    Interrupt,
    #[default]
    Kill,
    None,
    Custom,
}

#[derive(Debug, Clone)]
pub struct CommandBinding {
    pub topic: String,
    pub display_name: Option<String>,
    pub legacy_value: Option<String>,
    pub on_value: Option<String>,
    pub off_value: Option<String>,
    pub off_preset: CommandOffPreset,
    pub window: Window,
}

impl CommandBinding {
    /// The on-command text: `on_value`, falling back to `legacy_value`.
    pub fn effective_on_value(&self) -> Option<&str> {
        self.on_value
            .as_deref()
            .or(self.legacy_value.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Off-preset for the Service family: `stop` (default), `none`, `custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServeOffPreset {
    #[default]
    Stop,
    None,
    Custom,
}

#[derive(Debug, Clone)]
pub struct ServeBinding {
    pub topic: String,
    pub display_name: Option<String>,
    pub service_name: String,
    pub off_preset: ServeOffPreset,
    pub off_value: Option<String>,
}

/// Hotkey action kind: `keyboard` presses/types a value, `none` no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HotkeyActionKind {
    Keyboard,
    #[default]
    None,
}

#[derive(Debug, Clone)]
pub struct HotkeyBinding {
    pub topic: String,
    pub display_name: Option<String>,
    pub on_type: HotkeyActionKind,
    pub on_value: Option<String>,
    pub off_type: HotkeyActionKind,
    pub off_value: Option<String>,
    pub char_delay_ms: u32,
}

/// A unifying enum kept for documentation/grounding purposes: the four
/// off-preset enums above are deliberately distinct types, but every
/// family's ladder logic reduces to the same shape — interrupt-if-possible,
/// kill, no-op, or run a custom command. `OffPreset` lets call sites that
/// only care about this shape convert once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffPreset {
    Interrupt,
    Kill,
    None,
    Custom,
}

impl From<AppOffPreset> for OffPreset {
    fn from(p: AppOffPreset) -> Self {
        match p {
            AppOffPreset::Kill => OffPreset::Kill,
            AppOffPreset::None => OffPreset::None,
            AppOffPreset::Custom => OffPreset::Custom,
        }
    }
}

impl From<CommandOffPreset> for OffPreset {
    fn from(p: CommandOffPreset) -> Self {
        match p {
            CommandOffPreset::Interrupt => OffPreset::Interrupt,
            CommandOffPreset::Kill => OffPreset::Kill,
            CommandOffPreset::None => OffPreset::None,
            CommandOffPreset::Custom => OffPreset::Custom,
        }
    }
}

impl From<ServeOffPreset> for OffPreset {
    fn from(p: ServeOffPreset) -> Self {
        match p {
            ServeOffPreset::Stop => OffPreset::Kill,
            ServeOffPreset::None => OffPreset::None,
            ServeOffPreset::Custom => OffPreset::Custom,
        }
    }
}

#[cfg(test)]
#[path = "bindings_tests.rs"]
mod tests;
