// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binding construction: scan the config tree once, up front, into
//! immutable binding tables. Dispatch then becomes a lookup against these
//! tables rather than repeated string parsing.

use rc_core::{
    AppBinding, AppOffPreset, BuiltinBinding, BuiltinKind, CommandBinding, CommandOffPreset,
    ConfigTree, HotkeyActionKind, HotkeyBinding, ServeBinding, ServeOffPreset, Window,
    MAX_INDEXED_SLOT,
};

/// The five binding tables plus the built-ins, scanned once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    pub builtins: Vec<BuiltinBinding>,
    pub apps: Vec<AppBinding>,
    pub commands: Vec<CommandBinding>,
    pub services: Vec<ServeBinding>,
    pub hotkeys: Vec<HotkeyBinding>,
}

impl Bindings {
    /// The union of every enabled topic, deduplicated for subscription
    /// purposes; the tables above keep per-family duplicates since they
    /// dispatch independently in declaration order.
    pub fn topic_index(&self) -> Vec<String> {
        let mut topics = Vec::new();
        for b in &self.builtins {
            topics.push(b.topic.clone());
        }
        for a in &self.apps {
            topics.push(a.topic.clone());
        }
        for c in &self.commands {
            topics.push(c.topic.clone());
        }
        for s in &self.services {
            topics.push(s.topic.clone());
        }
        for h in &self.hotkeys {
            topics.push(h.topic.clone());
        }
        topics.sort();
        topics.dedup();
        topics
    }

    pub fn enabled_topic_count(&self) -> usize {
        self.topic_index().len()
    }
}

/// Scan the five built-in slots and the four indexed families. Slots whose
/// `_checked` gate is false or whose topic is empty are skipped entirely.
pub fn build(config: &ConfigTree) -> Bindings {
    let mut bindings = Bindings::default();

    for kind in BuiltinKind::ALL {
        if let Some(topic) = config.enabled_topic(kind.config_key()) {
            bindings.builtins.push(BuiltinBinding { kind, topic });
        }
    }

    for n in 1..=MAX_INDEXED_SLOT {
        if let Some(app) = build_app(config, n) {
            bindings.apps.push(app);
        }
        if let Some(command) = build_command(config, n) {
            bindings.commands.push(command);
        }
        if let Some(serve) = build_serve(config, n) {
            bindings.services.push(serve);
        }
        if let Some(hotkey) = build_hotkey(config, n) {
            bindings.hotkeys.push(hotkey);
        }
    }

    bindings
}

fn build_app(config: &ConfigTree, n: u32) -> Option<AppBinding> {
    let key = format!("application{n}");
    let topic = config.enabled_topic(&key)?;
    Some(AppBinding {
        topic,
        display_name: config.string(&format!("{key}_name")),
        on_path: config.string(&format!("{key}_on_value")).unwrap_or_default(),
        off_path: config.string(&format!("{key}_off_value")),
        off_preset: parse_app_off_preset(config.str(&format!("{key}_off_preset"))),
    })
}

fn parse_app_off_preset(raw: Option<&str>) -> AppOffPreset {
    match raw {
        Some("none") => AppOffPreset::None,
        Some("custom") => AppOffPreset::Custom,
        _ => AppOffPreset::Kill,
    }
}

fn build_command(config: &ConfigTree, n: u32) -> Option<CommandBinding> {
    let key = format!("command{n}");
    let topic = config.enabled_topic(&key)?;
    Some(CommandBinding {
        topic,
        display_name: config.string(&format!("{key}_name")),
        legacy_value: config.string(&format!("{key}_value")),
        on_value: config.string(&format!("{key}_on_value")),
        off_value: config.string(&format!("{key}_off_value")),
        off_preset: parse_command_off_preset(config.str(&format!("{key}_off_preset"))),
        window: match config.str(&format!("{key}_window")) {
            Some("hide") => Window::Hide,
            _ => Window::Show,
        },
    })
}

fn parse_command_off_preset(raw: Option<&str>) -> CommandOffPreset {
    match raw {
        Some("interrupt") => CommandOffPreset::Interrupt,
        Some("none") => CommandOffPreset::None,
        Some("custom") => CommandOffPreset::Custom,
        _ => CommandOffPreset::Kill,
    }
}

fn build_serve(config: &ConfigTree, n: u32) -> Option<ServeBinding> {
    let key = format!("serve{n}");
    let topic = config.enabled_topic(&key)?;
    Some(ServeBinding {
        topic,
        display_name: config.string(&format!("{key}_name")),
        service_name: config
            .string(&format!("{key}_service"))
            .unwrap_or_default(),
        off_preset: parse_serve_off_preset(config.str(&format!("{key}_off_preset"))),
        off_value: config.string(&format!("{key}_off_value")),
    })
}

fn parse_serve_off_preset(raw: Option<&str>) -> ServeOffPreset {
    match raw {
        Some("none") => ServeOffPreset::None,
        Some("custom") => ServeOffPreset::Custom,
        _ => ServeOffPreset::Stop,
    }
}

fn build_hotkey(config: &ConfigTree, n: u32) -> Option<HotkeyBinding> {
    let key = format!("hotkey{n}");
    let topic = config.enabled_topic(&key)?;
    Some(HotkeyBinding {
        topic,
        display_name: config.string(&format!("{key}_name")),
        on_type: parse_hotkey_action_kind(config.str(&format!("{key}_on_type"))),
        on_value: config.string(&format!("{key}_on_value")),
        off_type: parse_hotkey_action_kind(config.str(&format!("{key}_off_type"))),
        off_value: config.string(&format!("{key}_off_value")),
        char_delay_ms: config
            .int(&format!("{key}_char_delay_ms"), 0)
            .max(0) as u32,
    })
}

fn parse_hotkey_action_kind(raw: Option<&str>) -> HotkeyActionKind {
    match raw {
        Some("keyboard") => HotkeyActionKind::Keyboard,
        _ => HotkeyActionKind::None,
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
