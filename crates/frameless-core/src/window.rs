use std::fmt;
use std::ops::BitOr;

use serde::Serialize;

/// A boxed error type for OS-facing operations.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

// Raw Win32 `GWL_STYLE` bits consulted for classification.
const WS_BORDER: u32 = 0x0080_0000;
const WS_CAPTION: u32 = 0x00C0_0000;
const WS_THICKFRAME: u32 = 0x0004_0000;

/// Decoration attributes of a window, used only for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowStyle(u8);

impl WindowStyle {
    pub const NONE: Self = Self(0);
    /// The window has a title bar.
    pub const CAPTION: Self = Self(0b001);
    /// The window has a sizing border.
    pub const RESIZABLE_BORDER: Self = Self(0b010);
    /// The window has a thin, fixed border.
    pub const FIXED_BORDER: Self = Self(0b100);

    /// Maps a raw `GWL_STYLE` value onto the semantic flags.
    ///
    /// Any caption bit counts as a caption. A window that had its
    /// decoration stripped loses all three.
    pub fn from_raw(style: u32) -> Self {
        let mut flags = Self::NONE;
        if style & WS_CAPTION != 0 {
            flags = flags | Self::CAPTION;
        }
        if style & WS_THICKFRAME != 0 {
            flags = flags | Self::RESIZABLE_BORDER;
        }
        if style & WS_BORDER != 0 {
            flags = flags | Self::FIXED_BORDER;
        }
        flags
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for WindowStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A live top-level window captured during one enumeration.
///
/// Windows are rebuilt from scratch on every enumeration and never
/// change afterwards. Two values are the same window when their
/// handles are equal, whatever their title says.
#[derive(Debug, Clone, Serialize)]
pub struct Window {
    handle: usize,
    title: String,
    process_id: u32,
    executable_path: String,
    #[serde(skip)]
    style: WindowStyle,
}

impl Window {
    pub fn new(
        handle: usize,
        title: impl Into<String>,
        process_id: u32,
        executable_path: impl Into<String>,
        style: WindowStyle,
    ) -> Self {
        Self {
            handle,
            title: title.into(),
            process_id,
            executable_path: executable_path.into(),
            style,
        }
    }

    /// Raw OS handle. Only meaningful while the window exists.
    pub fn handle(&self) -> usize {
        self.handle
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    /// Absolute path of the owning executable, or empty if it could
    /// not be resolved.
    pub fn executable_path(&self) -> &str {
        &self.executable_path
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }

    /// File name portion of the executable path (`notepad.exe`).
    pub fn executable_name(&self) -> &str {
        self.executable_path
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or_default()
    }

    /// Returns whether the user may pick this window for a profile.
    ///
    /// Requires a caption and either kind of border. Tool windows,
    /// popups and windows this tool already stripped all fail.
    pub fn is_valid_for_selection(&self) -> bool {
        self.style.contains(WindowStyle::CAPTION)
            && (self.style.contains(WindowStyle::RESIZABLE_BORDER)
                || self.style.contains(WindowStyle::FIXED_BORDER))
    }
}

impl PartialEq for Window {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Window {}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Anything that can produce the current list of top-level windows.
///
/// Implementations must not fail: an enumeration that breaks down
/// returns an empty list.
pub trait WindowSource {
    fn enumerate(&self) -> Vec<Window>;
}

impl<F> WindowSource for F
where
    F: Fn() -> Vec<Window>,
{
    fn enumerate(&self) -> Vec<Window> {
        self()
    }
}

/// Orders a whole catalog by title, case-insensitive. Titles that
/// compare equal keep their enumeration order.
///
/// Profiles resolve against this order, so the first match does not
/// depend on which window has focus.
pub fn catalog_order(all: &[Window]) -> Vec<Window> {
    let mut sorted = all.to_vec();
    sort_by_title(&mut sorted);
    sorted
}

/// Filters a catalog down to selectable windows, in catalog order.
pub fn eligible_windows(all: &[Window]) -> Vec<Window> {
    let mut eligible: Vec<Window> = all
        .iter()
        .filter(|w| w.is_valid_for_selection())
        .cloned()
        .collect();
    sort_by_title(&mut eligible);
    eligible
}

fn sort_by_title(windows: &mut [Window]) {
    windows.sort_by_cached_key(|w| w.to_string().to_lowercase());
}
