#![cfg(windows)]

/// Ctrl+C handling.
pub mod ctrl_c;

/// Per-monitor DPI awareness.
pub mod dpi;

/// Win32 window enumeration.
pub mod enumerate;

/// Raw WinEvent translation.
pub mod event;

/// WinEvent hook thread.
pub mod event_loop;

/// Display enumeration and geometry.
pub mod monitor;

/// Process utilities (executable path).
pub mod process;

/// Named mutex instance lock.
pub mod singleton;

/// Per-`HWND` attribute queries.
pub mod window;

pub use enumerate::{Win32Windows, enumerate_windows};
pub use monitor::enumerate_monitors;
pub use singleton::{InstanceGuard, Win32Mutex, is_instance_running};
