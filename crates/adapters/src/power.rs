// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Power-transition adapter.
//!
//! Both executors log and return; failures never propagate as an `Err` —
//! there is nothing upstream that could usefully react to a failed
//! shutdown call beyond what the adapter has already logged.

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputerActionKind {
    None,
    Lock,
    Shutdown,
    Restart,
    Logoff,
}

impl ComputerActionKind {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "lock" => Self::Lock,
            "shutdown" => Self::Shutdown,
            "restart" => Self::Restart,
            "logoff" => Self::Logoff,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepActionKind {
    None,
    Sleep,
    Hibernate,
    DisplayOff,
    DisplayOn,
    Lock,
}

impl SleepActionKind {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "sleep" => Self::Sleep,
            "hibernate" => Self::Hibernate,
            "display_off" => Self::DisplayOff,
            "display_on" => Self::DisplayOn,
            "lock" => Self::Lock,
            _ => Self::None,
        }
    }
}

#[async_trait]
pub trait PowerAdapter: Clone + Send + Sync + 'static {
    async fn computer_action(&self, kind: ComputerActionKind, delay_s: u32);
    async fn sleep_action(&self, kind: SleepActionKind);
}

#[cfg(windows)]
mod windows_impl {
    #![allow(unsafe_code)]

    use super::{ComputerActionKind, PowerAdapter, SleepActionKind};
    use async_trait::async_trait;
    use windows::core::PCWSTR;
    use windows::Win32::System::Power::SetSuspendState;
    use windows::Win32::System::Shutdown::{
        ExitWindowsEx, InitiateSystemShutdownExW, EWX_LOGOFF, EXIT_WINDOWS_FLAGS,
        SHTDN_REASON_FLAG_PLANNED, SHUTDOWN_REASON,
    };
    use windows::Win32::UI::WindowsAndMessaging::LockWorkStation;

    #[derive(Clone, Copy, Debug, Default)]
    pub struct WindowsPowerAdapter;

    impl WindowsPowerAdapter {
        pub fn new() -> Self {
            Self
        }
    }

    #[async_trait]
    impl PowerAdapter for WindowsPowerAdapter {
        async fn computer_action(&self, kind: ComputerActionKind, delay_s: u32) {
            match kind {
                ComputerActionKind::None => {}
                ComputerActionKind::Lock => unsafe {
                    if LockWorkStation().is_err() {
                        tracing::warn!("LockWorkStation failed");
                    }
                },
                ComputerActionKind::Shutdown | ComputerActionKind::Restart => {
                    let restart = kind == ComputerActionKind::Restart;
                    let reason: SHUTDOWN_REASON = SHTDN_REASON_FLAG_PLANNED;
                    unsafe {
                        if InitiateSystemShutdownExW(
                            PCWSTR::null(),
                            PCWSTR::null(),
                            delay_s,
                            true,
                            restart,
                            reason,
                        )
                        .is_err()
                        {
                            tracing::warn!(?kind, "InitiateSystemShutdownExW failed");
                        }
                    }
                }
                ComputerActionKind::Logoff => unsafe {
                    let flags: EXIT_WINDOWS_FLAGS = EWX_LOGOFF;
                    if ExitWindowsEx(flags, SHTDN_REASON_FLAG_PLANNED).is_err() {
                        tracing::warn!("ExitWindowsEx(logoff) failed");
                    }
                },
            }
        }

        async fn sleep_action(&self, kind: SleepActionKind) {
            match kind {
                SleepActionKind::None => {}
                SleepActionKind::Sleep => unsafe {
                    let _ = SetSuspendState(false, false, false);
                },
                SleepActionKind::Hibernate => unsafe {
                    let _ = SetSuspendState(true, false, false);
                },
                SleepActionKind::DisplayOff | SleepActionKind::DisplayOn => {
                    crate::win_util::broadcast_monitor_power(kind == SleepActionKind::DisplayOn);
                }
                SleepActionKind::Lock => unsafe {
                    if LockWorkStation().is_err() {
                        tracing::warn!("LockWorkStation failed");
                    }
                },
            }
        }
    }
}
#[cfg(windows)]
pub use windows_impl::WindowsPowerAdapter;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPowerAdapter;

impl NoOpPowerAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PowerAdapter for NoOpPowerAdapter {
    async fn computer_action(&self, _kind: ComputerActionKind, _delay_s: u32) {}
    async fn sleep_action(&self, _kind: SleepActionKind) {}
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{ComputerActionKind, PowerAdapter, SleepActionKind};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum PowerCall {
        Computer(ComputerActionKind, u32),
        Sleep(SleepActionKind),
    }

    #[derive(Clone, Default)]
    pub struct FakePowerAdapter {
        calls: Arc<Mutex<Vec<PowerCall>>>,
    }

    impl FakePowerAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<PowerCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl PowerAdapter for FakePowerAdapter {
        async fn computer_action(&self, kind: ComputerActionKind, delay_s: u32) {
            self.calls.lock().push(PowerCall::Computer(kind, delay_s));
        }

        async fn sleep_action(&self, kind: SleepActionKind) {
            self.calls.lock().push(PowerCall::Sleep(kind));
        }
    }
}
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePowerAdapter, PowerCall};

#[cfg(test)]
#[path = "power_tests.rs"]
mod tests;
