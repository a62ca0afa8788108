// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The MQTT session state machine: connect, subscribe, receive, back off,
//! reconnect, and distinguish transient failures from fatal ones. Modelled
//! as explicit states rather than imperative flags so the back-off and
//! fatal-auth invariants are visible in the loop's shape.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rc_adapters::{
    BrightnessAdapter, HotkeyAdapter, MediaAdapter, NotifyAdapter, PowerAdapter, ProcessAdapter,
    ServiceAdapter, VolumeAdapter,
};

use crate::transport::{MqttTransport, PollEvent, PAYLOAD_LIMIT_BYTES};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Connecting,
    Subscribing,
    Receiving,
    Backoff(Duration),
    Terminal(String),
}

/// Narrow interface the session needs from a Router: dispatch a message,
/// and surface a status toast. Implemented generically below for any
/// `rc_engine::Router` whose adapters satisfy the executor traits, so the
/// session loop itself never names the eight adapter type parameters.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, topic: &str, payload: &str);
    async fn notify(&self, title: &str, message: &str);
}

#[async_trait]
impl<Pw, Md, Vl, Br, Pc, Sv, Hk, Nt> Dispatch for rc_engine::Router<Pw, Md, Vl, Br, Pc, Sv, Hk, Nt>
where
    Pw: PowerAdapter,
    Md: MediaAdapter,
    Vl: VolumeAdapter,
    Br: BrightnessAdapter,
    Pc: ProcessAdapter,
    Sv: ServiceAdapter,
    Hk: HotkeyAdapter,
    Nt: NotifyAdapter,
{
    async fn dispatch(&self, topic: &str, payload: &str) {
        rc_engine::Router::dispatch(self, topic, payload).await
    }

    async fn notify(&self, title: &str, message: &str) {
        rc_engine::Router::notify(self, title, message).await
    }
}

pub struct BackoffConfig {
    pub min: Duration,
    pub max: Duration,
}

/// Throttle "Connecting" / "Disconnected" / "Failed" status toasts to at
/// most once per interval, to avoid spamming the notifier during a long
/// outage.
struct StatusThrottle {
    last_sent: Option<Instant>,
    interval: Duration,
}

impl StatusThrottle {
    fn new(interval: Duration) -> Self {
        Self {
            last_sent: None,
            interval,
        }
    }

    fn should_send(&mut self, now: Instant) -> bool {
        let send = self
            .last_sent
            .map(|at| now.duration_since(at) >= self.interval)
            .unwrap_or(true);
        if send {
            self.last_sent = Some(now);
        }
        send
    }
}

/// Run the session loop until the stop flag is set or a fatal error is
/// reached. Returns the terminal reason, if any (`None` for a clean stop).
pub async fn run_session(
    mut transport: impl MqttTransport,
    topics: Vec<String>,
    router: Arc<dyn Dispatch>,
    stop: Arc<AtomicBool>,
    backoff: BackoffConfig,
) -> Option<String> {
    let mut current_backoff = backoff.min;
    let mut throttle = StatusThrottle::new(Duration::from_secs(30));
    let mut state = SessionState::Connecting;

    loop {
        if stop.load(Ordering::Relaxed) {
            return None;
        }

        state = match state {
            SessionState::Connecting => {
                if throttle.should_send(Instant::now()) {
                    router.notify("Remote Controls", "Connecting").await;
                }
                match transport.poll().await {
                    Ok(PollEvent::Connected) => {
                        current_backoff = backoff.min;
                        SessionState::Subscribing
                    }
                    Ok(PollEvent::Message { .. }) | Ok(PollEvent::Timeout) => {
                        SessionState::Connecting
                    }
                    Err(e) if e.fatal => SessionState::Terminal(e.message),
                    Err(e) => {
                        tracing::warn!(error = %e, "connect failed");
                        let sleep_for = current_backoff;
                        current_backoff = (current_backoff * 2).min(backoff.max);
                        SessionState::Backoff(sleep_for)
                    }
                }
            }
            SessionState::Subscribing => match transport.subscribe(&topics).await {
                Ok(()) => SessionState::Receiving,
                Err(e) => {
                    tracing::warn!(error = %e, "subscribe failed");
                    let sleep_for = current_backoff;
                    current_backoff = (current_backoff * 2).min(backoff.max);
                    SessionState::Backoff(sleep_for)
                }
            },
            SessionState::Receiving => match transport.poll().await {
                Ok(PollEvent::Message { topic, payload }) => {
                    let payload = truncate(&payload);
                    router.dispatch(&topic, &payload).await;
                    SessionState::Receiving
                }
                Ok(PollEvent::Timeout) | Ok(PollEvent::Connected) => SessionState::Receiving,
                Err(e) if e.fatal => SessionState::Terminal(e.message),
                Err(e) => {
                    tracing::warn!(error = %e, "disconnected");
                    if throttle.should_send(Instant::now()) {
                        router.notify("Remote Controls", "Disconnected").await;
                    }
                    // Reconnect with whatever back-off is currently in
                    // effect; a prior successful connect already reset it
                    // to the minimum.
                    SessionState::Connecting
                }
            },
            SessionState::Backoff(duration) => {
                tokio::time::sleep(duration).await;
                SessionState::Connecting
            }
            SessionState::Terminal(reason) => {
                router.notify("Remote Controls", "Auth failed").await;
                return Some(reason);
            }
        };
    }
}

fn truncate(payload: &str) -> String {
    if payload.len() <= PAYLOAD_LIMIT_BYTES {
        return payload.to_string();
    }
    let mut end = PAYLOAD_LIMIT_BYTES;
    while !payload.is_char_boundary(end) {
        end -= 1;
    }
    payload[..end].to_string()
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
