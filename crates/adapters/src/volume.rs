// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Master-volume adapter.

use async_trait::async_trait;

#[async_trait]
pub trait VolumeAdapter: Clone + Send + Sync + 'static {
    /// `percent` is already clamped to `[0, 100]` by the Router.
    async fn set_volume(&self, percent: u8) -> bool;
}

#[cfg(windows)]
mod windows_impl {
    #![allow(unsafe_code)]

    use super::VolumeAdapter;
    use async_trait::async_trait;
    use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
    use windows::Win32::Media::Audio::{eConsole, eRender, IMMDeviceEnumerator, MMDeviceEnumerator};
    use windows::Win32::System::Com::{CoCreateInstance, CLSCTX_ALL};

    #[derive(Clone, Copy, Debug, Default)]
    pub struct WindowsVolumeAdapter;

    impl WindowsVolumeAdapter {
        pub fn new() -> Self {
            Self
        }
    }

    #[async_trait]
    impl VolumeAdapter for WindowsVolumeAdapter {
        async fn set_volume(&self, percent: u8) -> bool {
            // COM calls are blocking and apartment-bound; run them on a
            // dedicated blocking thread rather than the async reactor.
            tokio::task::spawn_blocking(move || set_volume_blocking(percent))
                .await
                .unwrap_or(false)
        }
    }

    fn set_volume_blocking(percent: u8) -> bool {
        unsafe {
            let enumerator: IMMDeviceEnumerator =
                match CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL) {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::warn!(error = %e, "CoCreateInstance(MMDeviceEnumerator) failed");
                        return false;
                    }
                };
            let device = match enumerator.GetDefaultAudioEndpoint(eRender, eConsole) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(error = %e, "GetDefaultAudioEndpoint failed");
                    return false;
                }
            };
            let endpoint_volume: IAudioEndpointVolume = match device.Activate(CLSCTX_ALL, None) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "Activate(IAudioEndpointVolume) failed");
                    return false;
                }
            };
            let level = percent as f32 / 100.0;
            match endpoint_volume.SetMasterVolumeLevelScalar(level, std::ptr::null()) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "SetMasterVolumeLevelScalar failed");
                    false
                }
            }
        }
    }
}
#[cfg(windows)]
pub use windows_impl::WindowsVolumeAdapter;

#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpVolumeAdapter;

impl NoOpVolumeAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VolumeAdapter for NoOpVolumeAdapter {
    async fn set_volume(&self, _percent: u8) -> bool {
        false
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::VolumeAdapter;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    pub struct FakeVolumeAdapter {
        calls: Arc<Mutex<Vec<u8>>>,
        succeeds: Arc<Mutex<bool>>,
    }

    impl FakeVolumeAdapter {
        pub fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                succeeds: Arc::new(Mutex::new(true)),
            }
        }

        pub fn calls(&self) -> Vec<u8> {
            self.calls.lock().clone()
        }

        pub fn set_succeeds(&self, succeeds: bool) {
            *self.succeeds.lock() = succeeds;
        }
    }

    #[async_trait]
    impl VolumeAdapter for FakeVolumeAdapter {
        async fn set_volume(&self, percent: u8) -> bool {
            self.calls.lock().push(percent);
            *self.succeeds.lock()
        }
    }
}
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeVolumeAdapter;

#[cfg(test)]
#[path = "volume_tests.rs"]
mod tests;
