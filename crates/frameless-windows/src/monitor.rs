use std::mem;

use frameless_core::monitor::number_monitors;
use frameless_core::{Monitor, RawMonitor, Rect};

use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    DEVMODEW, ENUM_CURRENT_SETTINGS, EnumDisplayMonitors, EnumDisplaySettingsW, GetMonitorInfoW,
    HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
};
use windows::core::{BOOL, PCWSTR};

/// `dwFlags` bit marking the primary display.
const MONITORINFOF_PRIMARY: u32 = 1;

/// Enumerates all displays in OS order, numbered from 1.
///
/// A display whose info cannot be read is left out rather than listed
/// with a zero size.
pub fn enumerate_monitors() -> Vec<Monitor> {
    let mut raw: Vec<RawMonitor> = Vec::new();

    // SAFETY: EnumDisplayMonitors runs synchronously and hands our Vec
    // pointer back to the callback for each display.
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitor_callback),
            LPARAM(&mut raw as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        frameless_core::log_warn!("EnumDisplayMonitors failed after {} display(s)", raw.len());
    }

    number_monitors(raw)
}

unsafe extern "system" fn enum_monitor_callback(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is a pointer to our Vec<RawMonitor>, cast from enumerate_monitors().
    let raw = unsafe { &mut *(lparam.0 as *mut Vec<RawMonitor>) };

    match query_monitor(hmonitor) {
        Some(monitor) => raw.push(monitor),
        None => frameless_core::log_debug!("skipping display {:?}", hmonitor.0),
    }

    BOOL(1)
}

fn query_monitor(hmonitor: HMONITOR) -> Option<RawMonitor> {
    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;

    // SAFETY: cbSize tells GetMonitorInfoW it may fill the extended
    // struct, including the device name.
    let ok = unsafe {
        GetMonitorInfoW(hmonitor, &mut info as *mut MONITORINFOEXW as *mut MONITORINFO)
    };
    if !ok.as_bool() {
        return None;
    }

    let rc = info.monitorInfo.rcMonitor;
    Some(RawMonitor {
        is_primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
        mode: display_mode(&info.szDevice),
        bounds: Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom),
    })
}

/// Reads the current display mode's pixel size for a device name.
fn display_mode(device: &[u16]) -> Option<(u32, u32)> {
    let mut mode = DEVMODEW {
        dmSize: mem::size_of::<DEVMODEW>() as u16,
        ..Default::default()
    };

    // SAFETY: `device` is the null-terminated name from MONITORINFOEXW
    // and `mode` has dmSize set as the API requires.
    let ok = unsafe { EnumDisplaySettingsW(PCWSTR(device.as_ptr()), ENUM_CURRENT_SETTINGS, &mut mode) };
    ok.as_bool().then_some((mode.dmPelsWidth, mode.dmPelsHeight))
}
