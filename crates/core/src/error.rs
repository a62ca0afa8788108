// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config-invalid error taxonomy.

use thiserror::Error;

/// Errors that make the configuration tree unusable. All of these are fatal
/// at startup: the daemon must not enter the MQTT loop.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("config root is not a JSON object")]
    NotAnObject,
    #[error("missing or empty `broker`")]
    MissingBroker,
    #[error("missing or invalid `port`")]
    MissingPort,
    #[error("`client_id` is required when auth_mode is private_key")]
    MissingClientId,
    #[error("no topics are enabled and `test` is not set")]
    NoEnabledTopics,
}
