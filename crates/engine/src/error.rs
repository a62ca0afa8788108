// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the Router. Everything other than config validation is
//! a logged outcome, not an `Err`.

use rc_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("config invalid: {0}")]
    Config(#[from] ConfigError),
}
