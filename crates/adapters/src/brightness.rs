// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display-brightness adapters (`set_brightness_native`,
//! `set_brightness_external`).

use crate::subprocess::run_capped;
use async_trait::async_trait;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalTargetMode {
    All,
    MonitorId,
    MonitorNum,
}

#[derive(Debug, Clone)]
pub struct ExternalBrightnessConfig {
    pub exe_path: String,
    pub target_mode: ExternalTargetMode,
    pub target_value: String,
    pub overlay: bool,
    pub panel: bool,
}

#[async_trait]
pub trait BrightnessAdapter: Clone + Send + Sync + 'static {
    /// Enumerate all monitors' physical handles and attempt to set
    /// brightness on each; succeeds if at least one monitor accepted it.
    async fn set_brightness_native(&self, percent: u8) -> bool;

    /// Spawn the external brightness tool with arguments built from `cfg`,
    /// capturing stdout/stderr for diagnostics.
    async fn set_brightness_external(&self, percent: u8, cfg: &ExternalBrightnessConfig) -> bool;
}

/// Shared by every [`BrightnessAdapter`] impl: `--All` |
/// `--MonitorID="<id>"` | `--MonitorNum=<n>`, always `--Set=<0..100>`, plus
/// optional `--Overlay` / `--Panel`.
fn external_args(percent: u8, cfg: &ExternalBrightnessConfig) -> Vec<String> {
    let mut args = Vec::new();
    match cfg.target_mode {
        ExternalTargetMode::All => args.push("--All".to_string()),
        ExternalTargetMode::MonitorId => {
            args.push(format!("--MonitorID=\"{}\"", cfg.target_value));
        }
        ExternalTargetMode::MonitorNum => {
            args.push(format!("--MonitorNum={}", cfg.target_value));
        }
    }
    args.push(format!("--Set={percent}"));
    if cfg.overlay {
        args.push("--Overlay".to_string());
    }
    if cfg.panel {
        args.push("--Panel".to_string());
    }
    args
}

async fn run_external(exe_path: &str, args: &[String]) -> bool {
    let mut cmd = Command::new(exe_path);
    cmd.args(args);
    match run_capped(cmd, "external brightness tool").await {
        Ok(output) => output.success,
        Err(e) => {
            tracing::warn!(%exe_path, error = %e, "external brightness tool failed");
            false
        }
    }
}

#[cfg(windows)]
mod windows_impl {
    #![allow(unsafe_code)]

    use super::{external_args, run_external, BrightnessAdapter, ExternalBrightnessConfig};
    use async_trait::async_trait;
    use windows::Win32::Devices::Display::{
        GetMonitorBrightness, GetNumberOfPhysicalMonitorsFromHMONITOR,
        GetPhysicalMonitorsFromHMONITOR, SetMonitorBrightness, PHYSICAL_MONITOR,
    };
    use windows::Win32::Foundation::{BOOL, LPARAM, RECT};
    use windows::Win32::Graphics::Gdi::{EnumDisplayMonitors, HDC, HMONITOR};

    #[derive(Clone, Copy, Debug, Default)]
    pub struct WindowsBrightnessAdapter;

    impl WindowsBrightnessAdapter {
        pub fn new() -> Self {
            Self
        }
    }

    extern "system" fn collect_monitor(
        hmonitor: HMONITOR,
        _hdc: HDC,
        _rect: *mut RECT,
        lparam: LPARAM,
    ) -> BOOL {
        let monitors = unsafe { &mut *(lparam.0 as *mut Vec<HMONITOR>) };
        monitors.push(hmonitor);
        BOOL(1)
    }

    fn enumerate_monitors() -> Vec<HMONITOR> {
        let mut monitors: Vec<HMONITOR> = Vec::new();
        unsafe {
            let _ = EnumDisplayMonitors(
                None,
                None,
                Some(collect_monitor),
                LPARAM(&mut monitors as *mut _ as isize),
            );
        }
        monitors
    }

    fn set_native_brightness_blocking(percent: u8) -> bool {
        let mut any_success = false;
        for hmonitor in enumerate_monitors() {
            let mut count: u32 = 0;
            unsafe {
                if GetNumberOfPhysicalMonitorsFromHMONITOR(hmonitor, &mut count).is_err()
                    || count == 0
                {
                    continue;
                }
            }
            let mut physical = vec![PHYSICAL_MONITOR::default(); count as usize];
            unsafe {
                if GetPhysicalMonitorsFromHMONITOR(hmonitor, &mut physical).is_err() {
                    continue;
                }
            }
            for handle in &physical {
                let mut min = 0u32;
                let mut current = 0u32;
                let mut max = 100u32;
                unsafe {
                    let _ = GetMonitorBrightness(
                        handle.hPhysicalMonitor,
                        &mut min,
                        &mut current,
                        &mut max,
                    );
                    let target = min + ((max - min) * percent as u32) / 100;
                    if SetMonitorBrightness(handle.hPhysicalMonitor, target).is_ok() {
                        any_success = true;
                    }
                }
            }
        }
        any_success
    }

    #[async_trait]
    impl BrightnessAdapter for WindowsBrightnessAdapter {
        async fn set_brightness_native(&self, percent: u8) -> bool {
            tokio::task::spawn_blocking(move || set_native_brightness_blocking(percent))
                .await
                .unwrap_or(false)
        }

        async fn set_brightness_external(
            &self,
            percent: u8,
            cfg: &ExternalBrightnessConfig,
        ) -> bool {
            run_external(&cfg.exe_path, &external_args(percent, cfg)).await
        }
    }
}
#[cfg(windows)]
pub use windows_impl::WindowsBrightnessAdapter;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpBrightnessAdapter;

impl NoOpBrightnessAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BrightnessAdapter for NoOpBrightnessAdapter {
    async fn set_brightness_native(&self, _percent: u8) -> bool {
        false
    }

    async fn set_brightness_external(
        &self,
        _percent: u8,
        _cfg: &ExternalBrightnessConfig,
    ) -> bool {
        false
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{BrightnessAdapter, ExternalBrightnessConfig};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum BrightnessCall {
        Native(u8),
        External(u8),
    }

    #[derive(Clone, Default)]
    pub struct FakeBrightnessAdapter {
        calls: Arc<Mutex<Vec<BrightnessCall>>>,
        native_succeeds: Arc<Mutex<bool>>,
        external_succeeds: Arc<Mutex<bool>>,
    }

    impl FakeBrightnessAdapter {
        pub fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                native_succeeds: Arc::new(Mutex::new(true)),
                external_succeeds: Arc::new(Mutex::new(true)),
            }
        }

        pub fn calls(&self) -> Vec<BrightnessCall> {
            self.calls.lock().clone()
        }

        pub fn set_native_succeeds(&self, succeeds: bool) {
            *self.native_succeeds.lock() = succeeds;
        }

        pub fn set_external_succeeds(&self, succeeds: bool) {
            *self.external_succeeds.lock() = succeeds;
        }
    }

    #[async_trait]
    impl BrightnessAdapter for FakeBrightnessAdapter {
        async fn set_brightness_native(&self, percent: u8) -> bool {
            self.calls.lock().push(BrightnessCall::Native(percent));
            *self.native_succeeds.lock()
        }

        async fn set_brightness_external(
            &self,
            percent: u8,
            _cfg: &ExternalBrightnessConfig,
        ) -> bool {
            self.calls.lock().push(BrightnessCall::External(percent));
            *self.external_succeeds.lock()
        }
    }
}
#[cfg(any(test, feature = "test-support"))]
pub use fake::{BrightnessCall, FakeBrightnessAdapter};

#[cfg(test)]
#[path = "brightness_tests.rs"]
mod tests;
