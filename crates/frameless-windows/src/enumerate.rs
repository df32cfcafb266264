use std::collections::HashMap;

use frameless_core::{Window, WindowResult, WindowSource};

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::core::BOOL;

use crate::{process, window};

/// The live Win32 window catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Windows;

impl WindowSource for Win32Windows {
    fn enumerate(&self) -> Vec<Window> {
        enumerate_windows().unwrap_or_else(|e| {
            frameless_core::log_warn!("window enumeration failed: {e}");
            Vec::new()
        })
    }
}

/// Enumerates all visible top-level windows with their attributes.
///
/// Handles are collected first and queried afterwards, so the
/// `EnumWindows` callback stays trivial. Attributes that cannot be read
/// (a window closing mid-enumeration, a process we may not open)
/// come back empty instead of failing the whole call. Executable
/// paths are resolved once per process.
pub fn enumerate_windows() -> WindowResult<Vec<Window>> {
    let mut handles: Vec<HWND> = Vec::new();

    // SAFETY: EnumWindows calls our callback for each top-level window.
    // We pass a pointer to our Vec as LPARAM (user data). The callback
    // casts it back to &mut Vec<HWND>. EnumWindows runs synchronously,
    // so the Vec outlives the call.
    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut handles as *mut _ as isize),
        )?;
    }

    let mut exe_paths: HashMap<u32, String> = HashMap::new();
    let windows = handles
        .into_iter()
        .map(|hwnd| {
            let pid = window::process_id(hwnd);
            let exe_path = exe_paths
                .entry(pid)
                .or_insert_with(|| process::executable_path(pid).unwrap_or_default())
                .clone();
            Window::new(
                hwnd.0 as usize,
                window::title(hwnd),
                pid,
                exe_path,
                window::style(hwnd),
            )
        })
        .collect();

    Ok(windows)
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Returns `TRUE` to continue enumeration.
unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is a pointer to our Vec<HWND>, cast from enumerate_windows().
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HWND>) };

    if window::is_visible(hwnd) {
        handles.push(hwnd);
    }

    BOOL(1)
}
