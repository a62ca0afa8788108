// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rc-core: data model for the remote-controls desktop agent.
//!
//! Holds the configuration tree, the binding records derived from it, the
//! payload grammar, and the per-topic process table. None of this module
//! touches the OS; see `rc-adapters` for the side-effecting leaves and
//! `rc-engine` for the Router that ties them together.

pub mod bindings;
pub mod config;
pub mod error;
pub mod payload;
pub mod process_table;

pub use bindings::{
    AppBinding, AppOffPreset, BuiltinBinding, BuiltinKind, CommandBinding, CommandOffPreset,
    HotkeyActionKind, HotkeyBinding, OffPreset, ServeBinding, ServeOffPreset, Window,
};
pub use config::{AuthMode, ConfigTree, MAX_INDEXED_SLOT};
pub use error::ConfigError;
pub use payload::{Payload, PayloadBase};
pub use process_table::{Pid, PidTable};
