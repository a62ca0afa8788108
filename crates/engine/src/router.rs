// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatches a parsed `(topic, payload)` to at most one binding, in the
//! fixed scan order Applications → Commands → Services → Built-ins →
//! Hotkeys.

use std::collections::HashSet;
use std::time::Duration;

use parking_lot::Mutex;
use rc_adapters::{
    resolve_media_key, BrightnessAdapter, ComputerActionKind, ExternalBrightnessConfig,
    ExternalTargetMode, HotkeyAdapter, MediaAdapter, NotifyAdapter, PowerAdapter, ProcessAdapter,
    ServiceAdapter, SleepActionKind, SyncLivenessSnapshot, VolumeAdapter,
};
use rc_core::payload::reject_out_of_range_percent;
use rc_core::{
    AppOffPreset, BuiltinKind, CommandOffPreset, ConfigTree, Payload, PayloadBase, Pid, PidTable,
    ServeOffPreset,
};

use crate::builder::{self, Bindings};

/// Bundles the seven action-executor adapters plus the notifier, mirroring
/// a `RuntimeDeps`-style grouping so `Router`'s generic parameter list
/// stays a single bundle instead of eight loose ones.
#[derive(Clone)]
pub struct Adapters<Pw, Md, Vl, Br, Pc, Sv, Hk, Nt> {
    pub power: Pw,
    pub media: Md,
    pub volume: Vl,
    pub brightness: Br,
    pub process: Pc,
    pub service: Sv,
    pub hotkey: Hk,
    pub notify: Nt,
}

/// Owns the config tree, the binding tables, the topic index, and the
/// per-topic process table. Bindings are immutable after construction;
/// only the process table mutates during dispatch.
pub struct Router<Pw, Md, Vl, Br, Pc, Sv, Hk, Nt> {
    config: ConfigTree,
    bindings: Bindings,
    pids: Mutex<PidTable>,
    adapters: Adapters<Pw, Md, Vl, Br, Pc, Sv, Hk, Nt>,
}

impl<Pw, Md, Vl, Br, Pc, Sv, Hk, Nt> Router<Pw, Md, Vl, Br, Pc, Sv, Hk, Nt>
where
    Pw: PowerAdapter,
    Md: MediaAdapter,
    Vl: VolumeAdapter,
    Br: BrightnessAdapter,
    Pc: ProcessAdapter,
    Sv: ServiceAdapter,
    Hk: HotkeyAdapter,
    Nt: NotifyAdapter,
{
    pub fn new(config: ConfigTree, adapters: Adapters<Pw, Md, Vl, Br, Pc, Sv, Hk, Nt>) -> Self {
        let bindings = builder::build(&config);
        Self {
            config,
            bindings,
            pids: Mutex::new(PidTable::new()),
            adapters,
        }
    }

    /// The deduplicated topic list the MQTT session subscribes to.
    pub fn topics(&self) -> Vec<String> {
        self.bindings.topic_index()
    }

    pub fn enabled_topic_count(&self) -> usize {
        self.bindings.enabled_topic_count()
    }

    /// Dispatch a single inbound message.
    pub async fn dispatch(&self, topic: &str, raw_payload: &str) {
        let Some(payload) = Payload::parse(raw_payload) else {
            tracing::warn!(%topic, payload = %raw_payload, "rejected payload");
            return;
        };

        if self.dispatch_applications(topic, payload).await {
            return;
        }
        if self.dispatch_commands(topic, payload).await {
            return;
        }
        if self.dispatch_services(topic, payload).await {
            return;
        }
        if self.dispatch_builtins(topic, payload).await {
            return;
        }
        if self.dispatch_hotkeys(topic, payload).await {
            return;
        }

        tracing::warn!(%topic, "unknown topic");
    }

    async fn dispatch_applications(&self, topic: &str, payload: Payload) -> bool {
        let Some(app) = self.bindings.apps.iter().find(|a| a.topic == topic) else {
            return false;
        };

        match payload.base {
            PayloadBase::On => {
                if self
                    .adapters
                    .process
                    .run_program(&app.on_path, &[])
                    .await
                    .is_none()
                {
                    tracing::warn!(%topic, path = %app.on_path, "run_program failed");
                }
            }
            PayloadBase::Off => {
                if let Some(off_path) = &app.off_path {
                    if self
                        .adapters
                        .process
                        .run_program(off_path, &[])
                        .await
                        .is_none()
                    {
                        tracing::warn!(%topic, path = %off_path, "run_program (off) failed");
                    }
                } else {
                    match app.off_preset {
                        AppOffPreset::Kill => {
                            if !self.adapters.process.kill_by_path(&app.on_path).await {
                                tracing::warn!(%topic, path = %app.on_path, "kill_by_path failed");
                            }
                        }
                        AppOffPreset::None | AppOffPreset::Custom => {}
                    }
                }
            }
            PayloadBase::Pause => {
                tracing::warn!(%topic, "pause payload has no handling for application bindings");
            }
        }
        true
    }

    async fn dispatch_commands(&self, topic: &str, payload: Payload) -> bool {
        let Some(command) = self.bindings.commands.iter().find(|c| c.topic == topic) else {
            return false;
        };

        match payload.base {
            PayloadBase::On => {
                if let Some(on_value) = command.effective_on_value() {
                    self.spawn_tracked_command(topic, on_value, payload.value, command.window)
                        .await;
                }
            }
            PayloadBase::Off => {
                if let Some(off_value) = command.off_value.as_deref() {
                    self.spawn_tracked_command(topic, off_value, payload.value, command.window)
                        .await;
                } else {
                    match command.off_preset {
                        CommandOffPreset::None => {}
                        CommandOffPreset::Custom => {
                            tracing::warn!(%topic, "off_preset=custom without an off_value");
                        }
                        CommandOffPreset::Interrupt => self.interrupt_off(topic).await,
                        CommandOffPreset::Kill => self.kill_off(topic).await,
                    }
                }
            }
            PayloadBase::Pause => {
                tracing::warn!(%topic, "pause payload has no handling for command bindings");
            }
        }
        true
    }

    async fn spawn_tracked_command(
        &self,
        topic: &str,
        raw_command: &str,
        value: Option<i32>,
        window: rc_core::Window,
    ) {
        let prepared = rc_adapters::prepare_shell_command(raw_command, value);
        let hide = window == rc_core::Window::Hide;
        match self
            .adapters
            .process
            .run_shell_command(&prepared, hide, false)
            .await
        {
            Some(pid) => self.pids.lock().append(topic, pid),
            None => tracing::warn!(%topic, "run_shell_command failed"),
        }
    }

    /// Best-effort; liveness is not re-verified after the break is sent.
    async fn interrupt_off(&self, topic: &str) {
        self.cleanup_dead(topic).await;
        let Some(pid) = self.pids.lock().latest(topic) else {
            return;
        };

        let mut succeeded = self.adapters.process.send_break(pid).await;
        if !succeeded {
            succeeded = self.adapters.process.send_break_detached(pid).await;
        }
        if !succeeded {
            succeeded = self.adapters.process.terminate_pid(pid).await;
        }
        if !succeeded {
            self.adapters.process.taskkill_pid(pid, false, false).await;
        }

        self.cleanup_dead(topic).await;
    }

    async fn kill_off(&self, topic: &str) {
        let pids: Vec<Pid> = self.pids.lock().pids(topic).to_vec();
        for pid in pids {
            if !self.adapters.process.terminate_pid(pid).await {
                self.adapters.process.taskkill_pid(pid, true, false).await;
            }
        }
        self.pids.lock().clear(topic);
    }

    async fn cleanup_dead(&self, topic: &str) {
        let pids = self.pids.lock().pids(topic).to_vec();
        let mut alive = HashSet::new();
        for pid in pids {
            if self.adapters.process.is_alive(pid).await {
                alive.insert(pid);
            }
        }
        let snapshot = SyncLivenessSnapshot::new(alive);
        self.pids.lock().cleanup_dead(topic, &snapshot);
    }

    async fn dispatch_services(&self, topic: &str, payload: Payload) -> bool {
        let Some(serve) = self.bindings.services.iter().find(|s| s.topic == topic) else {
            return false;
        };

        match payload.base {
            PayloadBase::On => {
                if !self.adapters.service.service_start(&serve.service_name).await {
                    tracing::warn!(%topic, service = %serve.service_name, "service_start failed");
                }
            }
            PayloadBase::Off => match serve.off_preset {
                ServeOffPreset::Stop => {
                    if !self.adapters.service.service_stop(&serve.service_name).await {
                        tracing::warn!(%topic, service = %serve.service_name, "service_stop failed");
                    }
                }
                ServeOffPreset::Custom => {
                    if let Some(off_value) = &serve.off_value {
                        let prepared = rc_adapters::prepare_shell_command(off_value, payload.value);
                        if self
                            .adapters
                            .process
                            .run_shell_command(&prepared, true, false)
                            .await
                            .is_none()
                        {
                            tracing::warn!(%topic, "service custom off command failed to spawn");
                        }
                    } else {
                        tracing::warn!(%topic, "off_preset=custom without an off_value");
                    }
                }
                ServeOffPreset::None => {}
            },
            PayloadBase::Pause => {
                tracing::warn!(%topic, "pause payload has no handling for service bindings");
            }
        }
        true
    }

    async fn dispatch_builtins(&self, topic: &str, payload: Payload) -> bool {
        let Some(builtin) = self.bindings.builtins.iter().find(|b| b.topic == topic) else {
            return false;
        };

        match builtin.kind {
            BuiltinKind::Computer => self.dispatch_computer(payload).await,
            BuiltinKind::Screen => self.dispatch_screen(topic, payload).await,
            BuiltinKind::Volume => self.dispatch_volume(topic, payload).await,
            BuiltinKind::Sleep => self.dispatch_sleep(payload).await,
            BuiltinKind::Media => {
                self.adapters
                    .media
                    .send_media_key(resolve_media_key(&payload))
                    .await
            }
        }
        true
    }

    async fn dispatch_computer(&self, payload: Payload) {
        let prefix = BuiltinKind::Computer.config_key();
        match payload.base {
            PayloadBase::On => {
                let kind = self
                    .config
                    .str(&format!("{prefix}_on_action"))
                    .map(ComputerActionKind::parse)
                    .unwrap_or(ComputerActionKind::Lock);
                let delay = self.config.int(&format!("{prefix}_on_delay"), 0).max(0) as u32;
                self.adapters.power.computer_action(kind, delay).await;
            }
            PayloadBase::Off => {
                let kind = self
                    .config
                    .str(&format!("{prefix}_off_action"))
                    .map(ComputerActionKind::parse)
                    .unwrap_or(ComputerActionKind::None);
                let delay = self.config.int(&format!("{prefix}_off_delay"), 60).max(0) as u32;
                self.adapters.power.computer_action(kind, delay).await;
            }
            PayloadBase::Pause => {
                tracing::warn!("pause payload has no handling for the Computer built-in");
            }
        }
    }

    async fn dispatch_screen(&self, topic: &str, payload: Payload) {
        let percent = match (payload.base, payload.value) {
            (PayloadBase::Off, _) => 0u8,
            (PayloadBase::On, None) => 100u8,
            (PayloadBase::On, Some(n)) => match reject_out_of_range_percent(n) {
                Some(p) => p,
                None => {
                    tracing::warn!(%topic, %n, "brightness percentage out of range, no executor call");
                    return;
                }
            },
            (PayloadBase::Pause, _) => {
                tracing::warn!(%topic, "pause payload has no handling for the Screen built-in");
                return;
            }
        };

        if self.config.str("brightness_mode") == Some("twinkle_tray") {
            let cfg = self.external_brightness_config();
            if self
                .adapters
                .brightness
                .set_brightness_external(percent, &cfg)
                .await
            {
                return;
            }
            tracing::warn!(%topic, "external brightness tool failed, falling back to native");
        }

        if !self.adapters.brightness.set_brightness_native(percent).await {
            tracing::warn!(%topic, %percent, "native brightness set failed");
        }
    }

    fn external_brightness_config(&self) -> ExternalBrightnessConfig {
        let target_mode = match self.config.str("brightness_target_mode") {
            Some("monitor_id") => ExternalTargetMode::MonitorId,
            Some("monitor_num") => ExternalTargetMode::MonitorNum,
            _ => ExternalTargetMode::All,
        };
        ExternalBrightnessConfig {
            exe_path: self.config.string("twinkle_tray_path").unwrap_or_default(),
            target_mode,
            target_value: self
                .config
                .string("brightness_target_value")
                .unwrap_or_default(),
            overlay: self.config.bool("brightness_overlay", true),
            panel: self.config.bool("brightness_panel", false),
        }
    }

    async fn dispatch_volume(&self, topic: &str, payload: Payload) {
        let percent = match (payload.base, payload.value) {
            (PayloadBase::Off, _) | (PayloadBase::Pause, _) => 0u8,
            (PayloadBase::On, None) => 100u8,
            (PayloadBase::On, Some(n)) => match reject_out_of_range_percent(n) {
                Some(p) => p,
                None => {
                    tracing::warn!(%topic, %n, "volume percentage out of range, no executor call");
                    return;
                }
            },
        };

        if !self.adapters.volume.set_volume(percent).await {
            tracing::warn!(%topic, %percent, "set_volume failed");
        }
    }

    async fn dispatch_sleep(&self, payload: Payload) {
        let prefix = BuiltinKind::Sleep.config_key();
        let (action_key, delay_key, default_kind) = match payload.base {
            PayloadBase::On => (
                format!("{prefix}_on_action"),
                format!("{prefix}_on_delay"),
                SleepActionKind::Sleep,
            ),
            PayloadBase::Off => (
                format!("{prefix}_off_action"),
                format!("{prefix}_off_delay"),
                SleepActionKind::None,
            ),
            PayloadBase::Pause => {
                tracing::warn!("pause payload has no handling for the Sleep built-in");
                return;
            }
        };

        let kind = self
            .config
            .str(&action_key)
            .map(SleepActionKind::parse)
            .unwrap_or(default_kind);
        let delay_s = self.config.int(&delay_key, 0).max(0) as u64;

        if delay_s == 0 {
            self.adapters.power.sleep_action(kind).await;
            return;
        }

        // Fire-and-forget: no dedup, no cancellation; dispatch returns
        // immediately.
        let power = self.adapters.power.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(delay_s)).await;
            power.sleep_action(kind).await;
        });
    }

    async fn dispatch_hotkeys(&self, topic: &str, payload: Payload) -> bool {
        let Some(hotkey) = self.bindings.hotkeys.iter().find(|h| h.topic == topic) else {
            return false;
        };

        match payload.base {
            PayloadBase::On => {
                self.adapters
                    .hotkey
                    .hotkey(hotkey.on_type, hotkey.on_value.as_deref(), hotkey.char_delay_ms)
                    .await
            }
            PayloadBase::Off => {
                self.adapters
                    .hotkey
                    .hotkey(
                        hotkey.off_type,
                        hotkey.off_value.as_deref(),
                        hotkey.char_delay_ms,
                    )
                    .await
            }
            PayloadBase::Pause => {
                tracing::warn!(%topic, "pause payload dropped for hotkey binding");
            }
        }
        true
    }

    /// Surface a message to the desktop notifier. Individual dispatch
    /// branches above log action failures at warn instead of calling this,
    /// reserving toasts for session-level status.
    pub async fn notify(&self, title: &str, message: &str) {
        if let Err(e) = self.adapters.notify.notify(title, message).await {
            tracing::warn!(%title, error = %e, "notification send failed");
        }
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
