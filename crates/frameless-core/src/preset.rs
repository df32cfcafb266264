use crate::{Monitor, Rect};

/// One-click placements offered when editing a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    HalfLeft,
    HalfRight,
    Full,
}

impl Preset {
    /// Offsets and size for this preset, relative to the monitor's
    /// top-left corner.
    pub fn placement(self, monitor: &Monitor) -> Rect {
        match self {
            Self::HalfLeft => Rect::new(0, 0, monitor.width / 2, monitor.height),
            Self::HalfRight => {
                let half = monitor.width / 2;
                Rect::new(half, 0, half, monitor.height)
            }
            Self::Full => Rect::new(0, 0, monitor.width, monitor.height),
        }
    }
}
