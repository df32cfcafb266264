//! Editing state for one profile dialog.
//!
//! Everything a dialog needs to remember between callbacks lives in a
//! [`ProfileSession`] that the dialog owns. Nothing is shared between
//! sessions.

use std::sync::{Arc, Mutex, PoisonError};

use crate::bus::{Subscription, WindowBus};
use crate::config::{AppSetting, Defaults, MatchType};
use crate::matching::default_monitor_index;
use crate::window::eligible_windows;
use crate::{Monitor, Preset, Rect, Window};

/// What a new snapshot did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    /// The snapshot was empty and was dropped.
    Ignored,
    /// The window options were replaced; any selection still stands.
    OptionsChanged,
    /// The selected window is gone. The selection was cleared and the
    /// user has to pick again.
    SelectionLost,
}

pub struct ProfileSession {
    is_new: bool,
    draft: AppSetting,
    monitors: Vec<Monitor>,
    options: Vec<Window>,
    selected_window: Option<Window>,
    selected_monitor: Option<usize>,
}

impl ProfileSession {
    /// Opens a session. `profile` is `None` when creating a new one.
    pub fn new(
        defaults: &Defaults,
        profile: Option<AppSetting>,
        monitors: Vec<Monitor>,
        catalog: &[Window],
    ) -> Self {
        let is_new = profile.is_none();
        let selected_monitor = default_monitor_index(defaults, profile.as_ref(), &monitors)
            .filter(|&i| i < monitors.len());
        let mut draft = profile.unwrap_or_else(|| AppSetting::from_defaults(defaults));
        if let Some(monitor) = selected_monitor.map(|i| &monitors[i]) {
            draft.monitor = monitor.number;
        }

        Self {
            is_new,
            draft,
            monitors,
            options: eligible_windows(catalog),
            selected_window: None,
            selected_monitor,
        }
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn draft(&self) -> &AppSetting {
        &self.draft
    }

    /// Selectable windows, in display order.
    pub fn options(&self) -> &[Window] {
        &self.options
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn selected_window(&self) -> Option<&Window> {
        self.selected_window.as_ref()
    }

    pub fn selected_monitor(&self) -> Option<&Monitor> {
        self.selected_monitor.map(|i| &self.monitors[i])
    }

    /// Selects a window and copies its title and executable path into
    /// the draft.
    ///
    /// A window that is not among the current options (it closed since
    /// the list was shown) clears the selection instead.
    pub fn select_window(&mut self, window: &Window) -> bool {
        let Some(current) = self.options.iter().find(|w| *w == window) else {
            crate::log_info!(
                "selected window 0x{:X} no longer exists, clearing selection",
                window.handle()
            );
            self.selected_window = None;
            return false;
        };
        self.draft.window_name = current.title().to_string();
        self.draft.exe_path = current.executable_path().to_string();
        self.selected_window = Some(current.clone());
        true
    }

    /// Replaces the options with a fresh catalog.
    pub fn apply_snapshot(&mut self, catalog: &[Window]) -> SessionUpdate {
        if catalog.is_empty() {
            return SessionUpdate::Ignored;
        }
        self.options = eligible_windows(catalog);

        let Some(selected) = self.selected_window.take() else {
            return SessionUpdate::OptionsChanged;
        };
        // The handle may have survived under a new title; the draft
        // follows the live window.
        let Some(current) = self.options.iter().find(|w| **w == selected).cloned() else {
            crate::log_info!(
                "selected window 0x{:X} disappeared, clearing selection",
                selected.handle()
            );
            return SessionUpdate::SelectionLost;
        };
        self.draft.window_name = current.title().to_string();
        self.draft.exe_path = current.executable_path().to_string();
        self.selected_window = Some(current);
        SessionUpdate::OptionsChanged
    }

    pub fn select_monitor(&mut self, index: usize) -> bool {
        let Some(monitor) = self.monitors.get(index) else {
            return false;
        };
        self.draft.monitor = monitor.number;
        self.selected_monitor = Some(index);
        true
    }

    pub fn set_match_type(&mut self, match_type: MatchType) {
        self.draft.match_type = match_type;
    }

    /// Sets offsets (`x`, `y`) and size from a rectangle relative to the
    /// selected monitor.
    pub fn set_geometry(&mut self, placement: Rect) {
        self.draft.offset_x = placement.x;
        self.draft.offset_y = placement.y;
        self.draft.width = placement.width;
        self.draft.height = placement.height;
    }

    /// Applies a preset for the selected monitor. Does nothing without
    /// a monitor.
    pub fn apply_preset(&mut self, preset: Preset) -> bool {
        let Some(placement) = self.selected_monitor().map(|m| preset.placement(m)) else {
            return false;
        };
        self.set_geometry(placement);
        true
    }

    /// Whether the draft can be saved.
    pub fn is_valid(&self) -> bool {
        (!self.is_new || self.selected_window.is_some())
            && self.selected_monitor.is_some()
            && !self.draft.match_key().is_empty()
            && self.draft.width > 0
            && self.draft.height > 0
    }

    /// Ends the session, returning the profile if it is valid.
    pub fn finish(self) -> Option<AppSetting> {
        self.is_valid().then_some(self.draft)
    }

    /// Keeps a new-profile session's options in sync with the bus.
    ///
    /// `notify` hears about every non-ignored update. Sessions editing
    /// an existing profile do not subscribe and get `None`.
    pub fn subscribe(
        session: &Arc<Mutex<Self>>,
        bus: &WindowBus,
        mut notify: impl FnMut(SessionUpdate) + Send + 'static,
    ) -> Option<Subscription> {
        if !session.lock().unwrap_or_else(PoisonError::into_inner).is_new {
            return None;
        }
        let session = Arc::clone(session);
        Some(bus.subscribe(move |snapshot| {
            let update = session
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .apply_snapshot(snapshot);
            if update != SessionUpdate::Ignored {
                notify(update);
            }
        }))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
