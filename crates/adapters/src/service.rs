// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Windows service lifecycle adapter.
//!
//! The executor contract names a tool invocation, not the Service Control
//! Manager API directly ("invoke service-control tool `start`/`stop
//! <name>`"), so the real adapter shells out to `sc.exe` rather than
//! binding `OpenSCManagerW`/`StartServiceW`.

use crate::subprocess::run_capped;
use async_trait::async_trait;
use tokio::process::Command;

#[async_trait]
pub trait ServiceAdapter: Clone + Send + Sync + 'static {
    async fn service_start(&self, name: &str) -> bool;
    async fn service_stop(&self, name: &str) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ScServiceAdapter;

impl ScServiceAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ServiceAdapter for ScServiceAdapter {
    async fn service_start(&self, name: &str) -> bool {
        run_sc(&["start", name]).await
    }

    async fn service_stop(&self, name: &str) -> bool {
        run_sc(&["stop", name]).await
    }
}

async fn run_sc(args: &[&str]) -> bool {
    let mut cmd = Command::new("sc.exe");
    cmd.args(args);
    match run_capped(cmd, "sc.exe").await {
        Ok(output) => output.success,
        Err(e) => {
            tracing::warn!(error = %e, "sc.exe invocation failed");
            false
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpServiceAdapter;

impl NoOpServiceAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ServiceAdapter for NoOpServiceAdapter {
    async fn service_start(&self, _name: &str) -> bool {
        false
    }

    async fn service_stop(&self, _name: &str) -> bool {
        false
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::ServiceAdapter;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ServiceCall {
        Start(String),
        Stop(String),
    }

    #[derive(Clone, Default)]
    pub struct FakeServiceAdapter {
        calls: Arc<Mutex<Vec<ServiceCall>>>,
        succeeds: Arc<Mutex<bool>>,
    }

    impl FakeServiceAdapter {
        pub fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                succeeds: Arc::new(Mutex::new(true)),
            }
        }

        pub fn calls(&self) -> Vec<ServiceCall> {
            self.calls.lock().clone()
        }

        pub fn set_succeeds(&self, succeeds: bool) {
            *self.succeeds.lock() = succeeds;
        }
    }

    #[async_trait]
    impl ServiceAdapter for FakeServiceAdapter {
        async fn service_start(&self, name: &str) -> bool {
            self.calls.lock().push(ServiceCall::Start(name.to_string()));
            *self.succeeds.lock()
        }

        async fn service_stop(&self, name: &str) -> bool {
            self.calls.lock().push(ServiceCall::Stop(name.to_string()));
            *self.succeeds.lock()
        }
    }
}
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeServiceAdapter, ServiceCall};

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
