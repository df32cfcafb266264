//! Display devices and their resolved geometry.

use std::fmt;

use serde::Serialize;

use crate::Rect;

/// A display device as seen at catalog build time.
///
/// `number` is 1-based and follows enumeration order, so it is only
/// stable within one run of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Monitor {
    pub number: u32,
    pub is_primary: bool,
    pub width: i32,
    pub height: i32,
    pub left: i32,
    pub top: i32,
}

impl Monitor {
    /// Full monitor area in virtual-desktop coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Display {}", self.number)?;
        if self.is_primary {
            f.write_str(" (Primary)")?;
        }
        write!(f, " | {}x{}", self.width, self.height)
    }
}

/// What the OS reported for one monitor before numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMonitor {
    pub is_primary: bool,
    /// Pixel size from the current display mode, if the query succeeded.
    pub mode: Option<(u32, u32)>,
    /// Monitor rectangle in the virtual desktop.
    pub bounds: Rect,
}

/// Picks the pixel size for a monitor.
///
/// The display mode wins unless it is missing or reports a zero
/// dimension, in which case the monitor rectangle is used. Some
/// drivers report a zero mode for rotated or scaled outputs.
pub fn resolve_size(mode: Option<(u32, u32)>, bounds: Rect) -> (i32, i32) {
    match mode {
        Some((w, h)) if w > 0 && h > 0 => (
            i32::try_from(w).unwrap_or(bounds.width),
            i32::try_from(h).unwrap_or(bounds.height),
        ),
        _ => (bounds.width, bounds.height),
    }
}

/// Numbers monitors from 1 in the order given and resolves their size.
pub fn number_monitors(raw: impl IntoIterator<Item = RawMonitor>) -> Vec<Monitor> {
    raw.into_iter()
        .zip(1..)
        .map(|(m, number)| {
            let (width, height) = resolve_size(m.mode, m.bounds);
            Monitor {
                number,
                is_primary: m.is_primary,
                width,
                height,
                left: m.bounds.x,
                top: m.bounds.y,
            }
        })
        .collect()
}

/// Index of the primary monitor, if the OS flagged one.
pub fn primary_index(monitors: &[Monitor]) -> Option<usize> {
    monitors.iter().position(|m| m.is_primary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(is_primary: bool, mode: Option<(u32, u32)>, bounds: Rect) -> RawMonitor {
        RawMonitor {
            is_primary,
            mode,
            bounds,
        }
    }

    #[test]
    fn mode_size_wins_when_valid() {
        let bounds = Rect::from_edges(0, 0, 1536, 864);
        assert_eq!(resolve_size(Some((1920, 1080)), bounds), (1920, 1080));
    }

    #[test]
    fn zero_mode_width_falls_back_to_rect_span() {
        // Arrange
        let bounds = Rect::from_edges(1920, 0, 3360, 2560);

        // Act
        let (width, height) = resolve_size(Some((0, 2560)), bounds);

        // Assert
        assert_eq!(width, 3360 - 1920);
        assert_eq!(height, 2560);
    }

    #[test]
    fn failed_mode_query_falls_back_to_rect_span() {
        let bounds = Rect::from_edges(-1280, -200, 0, 824);
        assert_eq!(resolve_size(None, bounds), (1280, 1024));
    }

    #[test]
    fn monitors_are_numbered_from_one() {
        // Arrange
        let reported = [
            raw(false, Some((2560, 1440)), Rect::from_edges(-2560, 0, 0, 1440)),
            raw(true, Some((1920, 1080)), Rect::from_edges(0, 0, 1920, 1080)),
        ];

        // Act
        let monitors = number_monitors(reported);

        // Assert
        assert_eq!(monitors[0].number, 1);
        assert_eq!(monitors[0].left, -2560);
        assert_eq!(monitors[1].number, 2);
        assert_eq!(primary_index(&monitors), Some(1));
    }

    #[test]
    fn display_form_marks_primary() {
        let monitors = number_monitors([raw(
            true,
            Some((1920, 1080)),
            Rect::from_edges(0, 0, 1920, 1080),
        )]);
        assert_eq!(monitors[0].to_string(), "Display 1 (Primary) | 1920x1080");
    }

    #[test]
    fn no_primary_yields_none() {
        assert_eq!(primary_index(&[]), None);
    }
}
