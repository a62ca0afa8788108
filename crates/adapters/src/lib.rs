// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: every side-effecting leaf named in the
//! action-executor table lives here as a trait with a real Windows
//! implementation plus a no-op and a recording fake for tests.

pub mod brightness;
pub mod hotkey;
pub mod media;
pub mod notify;
pub mod power;
pub mod process;
pub mod service;
pub mod subprocess;
pub mod volume;
mod win_util;

pub use brightness::{BrightnessAdapter, ExternalBrightnessConfig, ExternalTargetMode};
pub use hotkey::{HotkeyAdapter, HotkeyCombo, HotkeySequence, KeyToken, Modifiers};
pub use media::{resolve_media_key, MediaAdapter, MediaKey};
pub use notify::{DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter};
pub use power::{ComputerActionKind, PowerAdapter, SleepActionKind};
pub use process::{ProcessAdapter, SyncLivenessSnapshot};
pub use service::{ScServiceAdapter, ServiceAdapter};
pub use subprocess::prepare_shell_command;
pub use volume::VolumeAdapter;

#[cfg(windows)]
pub use brightness::WindowsBrightnessAdapter;
#[cfg(windows)]
pub use hotkey::WindowsHotkeyAdapter;
#[cfg(windows)]
pub use media::WindowsMediaAdapter;
#[cfg(windows)]
pub use power::WindowsPowerAdapter;
#[cfg(windows)]
pub use process::WindowsProcessAdapter;
#[cfg(windows)]
pub use volume::WindowsVolumeAdapter;

pub use brightness::NoOpBrightnessAdapter;
pub use hotkey::NoOpHotkeyAdapter;
pub use media::NoOpMediaAdapter;
pub use power::NoOpPowerAdapter;
pub use process::NoOpProcessAdapter;
pub use service::NoOpServiceAdapter;
pub use volume::NoOpVolumeAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use brightness::{BrightnessCall, FakeBrightnessAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use hotkey::{FakeHotkeyAdapter, HotkeyCall};
#[cfg(any(test, feature = "test-support"))]
pub use media::FakeMediaAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use power::{FakePowerAdapter, PowerCall};
#[cfg(any(test, feature = "test-support"))]
pub use process::{FakeProcessAdapter, ProcessCall};
#[cfg(any(test, feature = "test-support"))]
pub use service::{FakeServiceAdapter, ServiceCall};
#[cfg(any(test, feature = "test-support"))]
pub use volume::FakeVolumeAdapter;
