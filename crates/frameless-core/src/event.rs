use std::fmt;

/// An OS notification that the window catalog may be out of date.
///
/// Platform crates translate raw OS events into these variants. The
/// bus does not consume them directly; they only trigger a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// A top-level window was created.
    Created { hwnd: usize },

    /// A top-level window was destroyed.
    Destroyed { hwnd: usize },

    /// A window became visible.
    Shown { hwnd: usize },

    /// A window was hidden.
    Hidden { hwnd: usize },

    /// A window's title changed.
    TitleChanged { hwnd: usize },
}

impl WindowEvent {
    /// Returns the window handle associated with this event.
    pub fn hwnd(&self) -> usize {
        match self {
            Self::Created { hwnd }
            | Self::Destroyed { hwnd }
            | Self::Shown { hwnd }
            | Self::Hidden { hwnd }
            | Self::TitleChanged { hwnd } => *hwnd,
        }
    }
}

impl fmt::Display for WindowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Created { .. } => "created",
            Self::Destroyed { .. } => "destroyed",
            Self::Shown { .. } => "shown",
            Self::Hidden { .. } => "hidden",
            Self::TitleChanged { .. } => "title",
        };
        write!(f, "{kind:<9} 0x{:X}", self.hwnd())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_kind_and_hex_handle() {
        let event = WindowEvent::TitleChanged { hwnd: 0x1A2B };
        assert_eq!(event.to_string(), "title     0x1A2B");
    }
}
