// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rc-engine: the Router that ties the configuration tree, the
//! binding tables, and the `rc-adapters` action executors together.

mod builder;
mod error;
mod router;

pub use builder::{build, Bindings};
pub use error::RouterError;
pub use router::{Adapters, Router};
