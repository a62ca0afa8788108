// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Small Win32 helpers shared by more than one adapter.

#[cfg(windows)]
#[allow(unsafe_code)]
pub fn broadcast_monitor_power(on: bool) {
    use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
    use windows::Win32::UI::WindowsAndMessaging::{
        PostMessageW, HWND_BROADCAST, SC_MONITORPOWER, WM_SYSCOMMAND,
    };

    // lParam: -1 = on, 2 = off (monitor power state, per SC_MONITORPOWER).
    let state: isize = if on { -1 } else { 2 };
    unsafe {
        let _ = PostMessageW(
            HWND(HWND_BROADCAST.0),
            WM_SYSCOMMAND,
            WPARAM(SC_MONITORPOWER as usize),
            LPARAM(state),
        );
    }
}

#[cfg(not(windows))]
pub fn broadcast_monitor_power(_on: bool) {}
