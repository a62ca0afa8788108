// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Media-key injection adapter.

use async_trait::async_trait;
use rc_core::{Payload, PayloadBase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKey {
    Next,
    Prev,
    PlayPause,
}

/// Mapping: `off`→next, `on` without value→prev, `pause`→play-pause,
/// `on#N`: N≤33 next, ≤66 play-pause, >66 prev.
pub fn resolve_media_key(payload: &Payload) -> MediaKey {
    match (payload.base, payload.value) {
        (PayloadBase::Off, _) => MediaKey::Next,
        (PayloadBase::Pause, _) => MediaKey::PlayPause,
        (PayloadBase::On, None) => MediaKey::Prev,
        (PayloadBase::On, Some(n)) if n <= 33 => MediaKey::Next,
        (PayloadBase::On, Some(n)) if n <= 66 => MediaKey::PlayPause,
        (PayloadBase::On, Some(_)) => MediaKey::Prev,
    }
}

#[async_trait]
pub trait MediaAdapter: Clone + Send + Sync + 'static {
    async fn send_media_key(&self, key: MediaKey);
}

#[cfg(windows)]
mod windows_impl {
    #![allow(unsafe_code)]

    use super::{MediaAdapter, MediaKey};
    use async_trait::async_trait;
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
        KEYEVENTF_KEYUP, VIRTUAL_KEY, VK_MEDIA_NEXT_TRACK, VK_MEDIA_PLAY_PAUSE,
        VK_MEDIA_PREV_TRACK,
    };

    #[derive(Clone, Copy, Debug, Default)]
    pub struct WindowsMediaAdapter;

    impl WindowsMediaAdapter {
        pub fn new() -> Self {
            Self
        }

        fn vk(key: MediaKey) -> VIRTUAL_KEY {
            match key {
                MediaKey::Next => VK_MEDIA_NEXT_TRACK,
                MediaKey::Prev => VK_MEDIA_PREV_TRACK,
                MediaKey::PlayPause => VK_MEDIA_PLAY_PAUSE,
            }
        }

        fn key_input(vk: VIRTUAL_KEY, flags: KEYBD_EVENT_FLAGS) -> INPUT {
            INPUT {
                r#type: INPUT_KEYBOARD,
                Anonymous: INPUT_0 {
                    ki: KEYBDINPUT {
                        wVk: vk,
                        wScan: 0,
                        dwFlags: flags,
                        time: 0,
                        dwExtraInfo: 0,
                    },
                },
            }
        }
    }

    #[async_trait]
    impl MediaAdapter for WindowsMediaAdapter {
        async fn send_media_key(&self, key: MediaKey) {
            let vk = Self::vk(key);
            let down = Self::key_input(vk, KEYBD_EVENT_FLAGS(0));
            let up = Self::key_input(vk, KEYEVENTF_KEYUP);
            unsafe {
                let sent = SendInput(&[down, up], std::mem::size_of::<INPUT>() as i32);
                if sent as usize != 2 {
                    tracing::warn!(?key, "SendInput did not report both events sent");
                }
            }
        }
    }
}
#[cfg(windows)]
pub use windows_impl::WindowsMediaAdapter;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpMediaAdapter;

impl NoOpMediaAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaAdapter for NoOpMediaAdapter {
    async fn send_media_key(&self, _key: MediaKey) {}
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{MediaAdapter, MediaKey};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    pub struct FakeMediaAdapter {
        calls: Arc<Mutex<Vec<MediaKey>>>,
    }

    impl FakeMediaAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<MediaKey> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl MediaAdapter for FakeMediaAdapter {
        async fn send_media_key(&self, key: MediaKey) {
            self.calls.lock().push(key);
        }
    }
}
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeMediaAdapter;

#[cfg(test)]
#[path = "media_tests.rs"]
mod tests;
