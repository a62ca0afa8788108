// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The MQTT wire transport, abstracted behind a trait so the session state
//! machine in `session.rs` is testable without a real broker — the same
//! shape as the action-executor traits in `rc-adapters`: one real
//! implementation, one recording fake.

use std::time::Duration;

use async_trait::async_trait;
use rc_core::{AuthMode, ConfigTree};

/// An outcome from polling the transport for the next event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// The broker accepted the connection (CONNACK return code 0).
    Connected,
    /// A PUBLISH arrived; payload is not yet truncated or grammar-checked.
    Message { topic: String, payload: String },
    /// Nothing arrived within the poll's bounded wait; callers should check
    /// the stop flag and poll again.
    Timeout,
}

/// `fatal` distinguishes an auth rejection (never retried) from every other
/// transient failure (retried with back-off).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub fatal: bool,
    pub message: String,
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// Payload-size limit before truncation, applied by the session before
/// handing a message to the Router.
pub const PAYLOAD_LIMIT_BYTES: usize = 4 * 1024;

#[async_trait]
pub trait MqttTransport: Send {
    /// Subscribe to every topic in the index, QoS 0.
    async fn subscribe(&mut self, topics: &[String]) -> Result<(), TransportError>;

    /// Block for at most ~1 s waiting for the next broker event.
    async fn poll(&mut self) -> Result<PollEvent, TransportError>;
}

/// Production transport backed by `rumqttc`.
pub struct RumqttcTransport {
    client: rumqttc::AsyncClient,
    eventloop: rumqttc::EventLoop,
}

impl RumqttcTransport {
    pub fn new(config: &ConfigTree) -> Self {
        let broker = config.broker().unwrap_or_default();
        let mut opts = rumqttc::MqttOptions::new(config.client_id(), broker, config.port());
        opts.set_keep_alive(Duration::from_secs(config.keep_alive_secs()));
        opts.set_clean_session(true);

        if config.auth_mode() == AuthMode::UsernamePassword {
            if let (Some(username), Some(password)) =
                (config.mqtt_username(), config.mqtt_password())
            {
                opts.set_credentials(username, password);
            }
        }
        if config.mqtt_tls() {
            opts.set_transport(rumqttc::Transport::tls_with_default_config());
        }

        let (client, eventloop) = rumqttc::AsyncClient::new(opts, 64);
        Self { client, eventloop }
    }
}

#[async_trait]
impl MqttTransport for RumqttcTransport {
    async fn subscribe(&mut self, topics: &[String]) -> Result<(), TransportError> {
        for topic in topics {
            self.client
                .subscribe(topic, rumqttc::QoS::AtMostOnce)
                .await
                .map_err(|e| TransportError {
                    fatal: false,
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }

    async fn poll(&mut self) -> Result<PollEvent, TransportError> {
        let polled = match tokio::time::timeout(Duration::from_secs(1), self.eventloop.poll()).await
        {
            Err(_elapsed) => return Ok(PollEvent::Timeout),
            Ok(result) => result,
        };

        match polled {
            Ok(rumqttc::Event::Incoming(rumqttc::Packet::ConnAck(ack))) => match ack.code {
                rumqttc::ConnectReturnCode::Success => Ok(PollEvent::Connected),
                rumqttc::ConnectReturnCode::NotAuthorized
                | rumqttc::ConnectReturnCode::BadUserNamePassword => Err(TransportError {
                    fatal: true,
                    message: format!("broker rejected connection: {:?}", ack.code),
                }),
                other => Err(TransportError {
                    fatal: false,
                    message: format!("connect refused: {other:?}"),
                }),
            },
            Ok(rumqttc::Event::Incoming(rumqttc::Packet::Publish(publish))) => {
                let payload = String::from_utf8_lossy(&publish.payload).into_owned();
                Ok(PollEvent::Message {
                    topic: publish.topic,
                    payload,
                })
            }
            Ok(_other) => Ok(PollEvent::Timeout),
            Err(e) => {
                let fatal = matches!(
                    &e,
                    rumqttc::ConnectionError::ConnectionRefused(
                        rumqttc::ConnectReturnCode::NotAuthorized
                            | rumqttc::ConnectReturnCode::BadUserNamePassword
                    )
                );
                Err(TransportError {
                    fatal,
                    message: e.to_string(),
                })
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// A scripted transport: each call to `poll` pops the next scripted
    /// result, or returns `Timeout` once the script is exhausted.
    pub struct FakeTransport {
        script: VecDeque<Result<PollEvent, TransportError>>,
        subscribed: Arc<Mutex<Vec<String>>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self {
                script: VecDeque::new(),
                subscribed: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn push(&mut self, event: Result<PollEvent, TransportError>) {
            self.script.push_back(event);
        }

        pub fn subscribed(&self) -> Vec<String> {
            self.subscribed.lock().unwrap_or_else(|e| e.into_inner()).clone()
        }
    }

    impl Default for FakeTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl MqttTransport for FakeTransport {
        async fn subscribe(&mut self, topics: &[String]) -> Result<(), TransportError> {
            self.subscribed
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .extend(topics.iter().cloned());
            Ok(())
        }

        async fn poll(&mut self) -> Result<PollEvent, TransportError> {
            self.script.pop_front().unwrap_or(Ok(PollEvent::Timeout))
        }
    }
}
