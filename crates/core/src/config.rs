// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The configuration tree: a flat, read-only mapping from string
//! keys to scalars, loaded once at startup. `ConfigTree` is a thin typed
//! view over the parsed `serde_json::Value`; `rc-engine` reads it to build
//! binding tables, `rc-daemon` reads the MQTT connection parameters off it.

use crate::error::ConfigError;
use serde_json::Value;

/// Indexed families go from `N = 1` to `N = 49` inclusive.
pub const MAX_INDEXED_SLOT: u32 = 49;

/// A parsed, validated configuration tree.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    root: serde_json::Map<String, Value>,
}

impl ConfigTree {
    /// Parse a JSON object from its textual form. Does not validate
    /// required fields — call [`ConfigTree::validate`] separately so load
    /// and validate failures map to distinct, logged `ConfigError`
    /// variants.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: "<memory>".to_string(),
            source,
        })?;
        let root = value.as_object().cloned().ok_or(ConfigError::NotAnObject)?;
        Ok(Self { root })
    }

    pub fn empty() -> Self {
        Self {
            root: serde_json::Map::new(),
        }
    }

    /// Validate the required fields. `enabled_topic_count` is
    /// supplied by the caller (the Router already has to compute the topic
    /// index; recomputing it here would duplicate that scan).
    pub fn validate(&self, enabled_topic_count: usize) -> Result<(), ConfigError> {
        if self.str("broker").map(str::is_empty).unwrap_or(true) {
            return Err(ConfigError::MissingBroker);
        }
        if self.get("port").and_then(Value::as_u64).is_none() {
            return Err(ConfigError::MissingPort);
        }
        if self.str("auth_mode") == Some("private_key")
            && self.str("client_id").map(str::is_empty).unwrap_or(true)
        {
            return Err(ConfigError::MissingClientId);
        }
        if enabled_topic_count == 0 && !self.bool("test", false) {
            return Err(ConfigError::NoEnabledTopics);
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.str(key).map(str::to_string)
    }

    pub fn bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn int(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(default)
    }

    /// `key` is enabled iff `{key}_checked` is `true` and `key`'s own value
    /// is a non-empty string (the topic).
    pub fn enabled_topic(&self, key: &str) -> Option<String> {
        let checked_key = format!("{key}_checked");
        if !self.bool(&checked_key, false) {
            return None;
        }
        self.string(key).filter(|s| !s.is_empty())
    }

    // --- MQTT connection parameters ---

    pub fn broker(&self) -> Option<&str> {
        self.str("broker")
    }

    pub fn port(&self) -> u16 {
        self.get("port")
            .and_then(Value::as_u64)
            .and_then(|p| u16::try_from(p).ok())
            .unwrap_or(1883)
    }

    pub fn client_id(&self) -> String {
        self.string("client_id")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "RC-main".to_string())
    }

    pub fn auth_mode(&self) -> AuthMode {
        match self.str("auth_mode") {
            Some("username_password") => AuthMode::UsernamePassword,
            _ => AuthMode::PrivateKey,
        }
    }

    pub fn mqtt_username(&self) -> Option<String> {
        self.string("mqtt_username")
    }

    pub fn mqtt_password(&self) -> Option<String> {
        self.string("mqtt_password")
    }

    pub fn mqtt_tls(&self) -> bool {
        self.bool("mqtt_tls", false)
    }

    pub fn test_mode(&self) -> bool {
        self.bool("test", false)
    }

    pub fn notify_enabled(&self) -> bool {
        self.bool("notify", true)
    }

    pub fn keep_alive_secs(&self) -> u64 {
        self.int("keep_alive", 60).max(1) as u64
    }

    pub fn backoff_min_secs(&self) -> u64 {
        self.int("backoff_min", 2).max(1) as u64
    }

    pub fn backoff_max_secs(&self) -> u64 {
        self.int("backoff_max", 30).max(self.backoff_min_secs() as i64) as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    PrivateKey,
    UsernamePassword,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
