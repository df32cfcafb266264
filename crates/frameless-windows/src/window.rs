use frameless_core::WindowStyle;

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_STYLE, GetWindowLongPtrW, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsWindowVisible,
};

/// Creates an `HWND` from a raw handle value.
pub fn hwnd_from_raw(handle: usize) -> HWND {
    HWND(handle as *mut _)
}

/// Returns the window's caption text, or an empty string.
pub fn title(hwnd: HWND) -> String {
    // SAFETY: GetWindowTextLengthW and GetWindowTextW only read window
    // text. A stale HWND makes them return 0.
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length <= 0 {
            return String::new();
        }

        // +1 for the null terminator that Windows requires
        let mut buffer = vec![0u16; (length + 1) as usize];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
    }
}

/// Reads the decoration flags from `GWL_STYLE`.
pub fn style(hwnd: HWND) -> WindowStyle {
    // SAFETY: GetWindowLongPtrW reads a window attribute. It returns 0
    // for an invalid handle, which maps to no flags.
    let raw = unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) };
    WindowStyle::from_raw(raw as u32)
}

/// Returns the ID of the process that owns the window, or 0.
pub fn process_id(hwnd: HWND) -> u32 {
    let mut pid: u32 = 0;
    // SAFETY: GetWindowThreadProcessId writes the owner PID into `pid`.
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    pid
}

pub fn is_visible(hwnd: HWND) -> bool {
    // SAFETY: IsWindowVisible is a simple query that returns a BOOL.
    unsafe { IsWindowVisible(hwnd).as_bool() }
}
