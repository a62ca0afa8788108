// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the pieces together: a config tree, a Router built from the
//! platform's concrete adapters, and the MQTT transport, then hands them
//! to the session loop. Kept separate from `main.rs` so the wiring itself
//! is unit-testable without a process entry point.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use rc_core::ConfigTree;
use rc_engine::{Adapters, Router};

use crate::session::{self, BackoffConfig};
use crate::transport::RumqttcTransport;

#[cfg(windows)]
type PowerImpl = rc_adapters::WindowsPowerAdapter;
#[cfg(not(windows))]
type PowerImpl = rc_adapters::NoOpPowerAdapter;

#[cfg(windows)]
type MediaImpl = rc_adapters::WindowsMediaAdapter;
#[cfg(not(windows))]
type MediaImpl = rc_adapters::NoOpMediaAdapter;

#[cfg(windows)]
type VolumeImpl = rc_adapters::WindowsVolumeAdapter;
#[cfg(not(windows))]
type VolumeImpl = rc_adapters::NoOpVolumeAdapter;

#[cfg(windows)]
type BrightnessImpl = rc_adapters::WindowsBrightnessAdapter;
#[cfg(not(windows))]
type BrightnessImpl = rc_adapters::NoOpBrightnessAdapter;

#[cfg(windows)]
type ProcessImpl = rc_adapters::WindowsProcessAdapter;
#[cfg(not(windows))]
type ProcessImpl = rc_adapters::NoOpProcessAdapter;

#[cfg(windows)]
type HotkeyImpl = rc_adapters::WindowsHotkeyAdapter;
#[cfg(not(windows))]
type HotkeyImpl = rc_adapters::NoOpHotkeyAdapter;

type ServiceImpl = rc_adapters::ScServiceAdapter;
type NotifyImpl = rc_adapters::DesktopNotifyAdapter;

pub type LiveRouter =
    Router<PowerImpl, MediaImpl, VolumeImpl, BrightnessImpl, ProcessImpl, ServiceImpl, HotkeyImpl, NotifyImpl>;

/// Build the Router over the platform's real adapters (or the no-op
/// fallbacks off Windows, so the daemon still runs somewhere during
/// development).
pub fn build_router(config: ConfigTree) -> LiveRouter {
    let adapters = Adapters {
        power: PowerImpl::default(),
        media: MediaImpl::default(),
        volume: VolumeImpl::default(),
        brightness: BrightnessImpl::default(),
        process: ProcessImpl::default(),
        service: ServiceImpl::default(),
        hotkey: HotkeyImpl::default(),
        notify: NotifyImpl::default(),
    };
    Router::new(config, adapters)
}

/// Run the daemon body: build the router and transport from `config`, then
/// drive the session loop until `stop` is set or a fatal error occurs.
pub async fn run(config: ConfigTree, stop: Arc<AtomicBool>) -> Option<String> {
    let backoff = BackoffConfig {
        min: Duration::from_secs(config.backoff_min_secs()),
        max: Duration::from_secs(config.backoff_max_secs()),
    };
    let transport = RumqttcTransport::new(&config);
    let router = build_router(config);
    let topics = router.topics();
    session::run_session(transport, topics, Arc::new(router), stop, backoff).await
}
