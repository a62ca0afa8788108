// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon-side configuration file loading: locate the config file, read and
//! parse it into a `rc_core::ConfigTree`, and resolve the log path. None of
//! this lives in `rc-core` because the flat keys-to-scalars view there is
//! transport-agnostic; this module is specifically about *where the file
//! lives on disk*.

use std::path::PathBuf;

use rc_core::{ConfigError, ConfigTree};
use thiserror::Error;

/// Paths the daemon needs besides the config file itself.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_path: PathBuf,
    pub log_path: PathBuf,
}

impl Paths {
    /// Resolve paths under `RC_STATE_DIR`, falling back to
    /// `~/.local/state/remote-controls/`. One daemon instance serves one
    /// configuration file; there is no per-project layering.
    pub fn load() -> Result<Self, DaemonConfigError> {
        let state_dir = state_dir()?;
        Ok(Self {
            config_path: state_dir.join("config.json"),
            log_path: state_dir.join("daemon.log"),
        })
    }
}

fn state_dir() -> Result<PathBuf, DaemonConfigError> {
    if let Ok(dir) = std::env::var("RC_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("remote-controls"));
    }
    let home = std::env::var("HOME").map_err(|_| DaemonConfigError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/remote-controls"))
}

#[derive(Debug, Error)]
pub enum DaemonConfigError {
    #[error("could not determine state directory")]
    NoStateDir,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create state directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Called when the config file is missing or fails validation, before the
/// daemon logs and exits. The core daemon only logs; a tray/GUI front end
/// can inject its own hook (open an editor, show a setup wizard) without
/// this crate depending on anything GUI-shaped.
pub trait ConfigRecoveryHook {
    fn on_config_error(&self, error: &DaemonConfigError);
}

/// Logs and otherwise does nothing; the default when no front end is
/// attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRecoveryHook;

impl ConfigRecoveryHook for NoOpRecoveryHook {
    fn on_config_error(&self, error: &DaemonConfigError) {
        tracing::error!(%error, "config load/validation failed");
    }
}

/// Read `path`, parse it as a config tree, and validate it against
/// `enabled_topic_count`. If the file does not exist, an empty `{}` is
/// written in its place and validation runs against that (which will fail
/// with `NoEnabledTopics` unless `test` mode is set), so a missing config
/// file surfaces the same way as a present-but-invalid one.
pub fn load_and_validate(
    path: &std::path::Path,
    enabled_topic_count: impl FnOnce(&ConfigTree) -> usize,
) -> Result<ConfigTree, DaemonConfigError> {
    load_and_validate_with_hook(path, enabled_topic_count, &NoOpRecoveryHook)
}

/// Same as [`load_and_validate`], but runs `hook` before returning any
/// error, so a front end can react (pop a setup wizard, open an editor)
/// without this crate knowing it exists.
pub fn load_and_validate_with_hook(
    path: &std::path::Path,
    enabled_topic_count: impl FnOnce(&ConfigTree) -> usize,
    hook: &dyn ConfigRecoveryHook,
) -> Result<ConfigTree, DaemonConfigError> {
    match load_and_validate_inner(path, enabled_topic_count) {
        Ok(config) => Ok(config),
        Err(error) => {
            hook.on_config_error(&error);
            Err(error)
        }
    }
}

fn load_and_validate_inner(
    path: &std::path::Path,
    enabled_topic_count: impl FnOnce(&ConfigTree) -> usize,
) -> Result<ConfigTree, DaemonConfigError> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, "{}\n")?;
    }

    let text = std::fs::read_to_string(path).map_err(|source| {
        DaemonConfigError::Config(ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    })?;
    let config = ConfigTree::parse(&text)?;
    let count = enabled_topic_count(&config);
    config.validate(count)?;
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
