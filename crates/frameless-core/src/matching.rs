//! Resolves saved profiles against the live window catalog.

use crate::config::{AppSetting, Defaults, MatchType};
use crate::monitor::primary_index;
use crate::{Monitor, Window};

/// Finds the window a profile refers to.
///
/// The first match in catalog order wins, so pass a catalog ordered
/// with [`crate::window::catalog_order`] rather than raw enumeration
/// order.
pub fn resolve<'a>(profile: &AppSetting, catalog: &'a [Window]) -> Option<&'a Window> {
    catalog.iter().find(|w| matches(profile, w))
}

/// Whether `window` is what the profile refers to: its title or
/// executable path (per the match type) equals the profile's exactly.
/// A profile whose match field is empty never matches.
pub fn matches(profile: &AppSetting, window: &Window) -> bool {
    let key = profile.match_key();
    !key.is_empty()
        && match profile.match_type {
            MatchType::Title => window.title() == key,
            MatchType::Executable => window.executable_path() == key,
        }
}

/// Returns whether a window with this handle is in the catalog.
pub fn contains_handle(catalog: &[Window], handle: usize) -> bool {
    catalog.iter().any(|w| w.handle() == handle)
}

/// Picks the monitor index a profile dialog should start on.
///
/// An existing profile uses its own stored number. A new one uses the
/// configured default number, or the primary display when no default
/// is set. `None` when nothing applies.
pub fn default_monitor_index(
    defaults: &Defaults,
    profile: Option<&AppSetting>,
    monitors: &[Monitor],
) -> Option<usize> {
    match profile {
        Some(existing) => existing.monitor.checked_sub(1).map(|i| i as usize),
        None => match defaults.monitor.checked_sub(1) {
            Some(i) => Some(i as usize),
            None => primary_index(monitors),
        },
    }
}

/// A change in which window a profile is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The profile now refers to this window.
    Resolved { profile: usize, window: Window },
    /// The profile's previous window no longer applies. `closed` is
    /// true when the handle vanished from the catalog, false when the
    /// window is still there but stopped matching.
    Lost {
        profile: usize,
        handle: usize,
        closed: bool,
    },
}

/// Keeps each profile bound to a live window across snapshots.
///
/// Bindings are by handle. A handle that disappears is dropped before
/// anything else happens, since the OS may hand the same value to an
/// unrelated window later.
#[derive(Debug, Default)]
pub struct Reconciler {
    profiles: Vec<AppSetting>,
    bound: Vec<Option<usize>>,
}

impl Reconciler {
    pub fn new(profiles: Vec<AppSetting>) -> Self {
        let bound = vec![None; profiles.len()];
        Self { profiles, bound }
    }

    pub fn profiles(&self) -> &[AppSetting] {
        &self.profiles
    }

    /// Handle currently bound to the profile at `index`.
    pub fn bound_handle(&self, index: usize) -> Option<usize> {
        self.bound.get(index).copied().flatten()
    }

    /// Re-resolves every profile and reports what changed.
    ///
    /// A bound window keeps its binding for as long as it is in the
    /// catalog and still matches, even when another matching window
    /// now sorts ahead of it. Empty catalogs are ignored and leave
    /// bindings untouched.
    pub fn reconcile(&mut self, catalog: &[Window]) -> Vec<Reconciliation> {
        let mut changes = Vec::new();
        if catalog.is_empty() {
            return changes;
        }

        for (index, profile) in self.profiles.iter().enumerate() {
            let previous = self.bound[index];
            let kept = previous
                .and_then(|handle| catalog.iter().find(|w| w.handle() == handle))
                .is_some_and(|w| matches(profile, w));
            if kept {
                continue;
            }
            let current = resolve(profile, catalog);
            let current_handle = current.map(Window::handle);

            if previous == current_handle {
                continue;
            }
            if let Some(handle) = previous {
                changes.push(Reconciliation::Lost {
                    profile: index,
                    handle,
                    closed: !contains_handle(catalog, handle),
                });
            }
            if let Some(window) = current {
                changes.push(Reconciliation::Resolved {
                    profile: index,
                    window: window.clone(),
                });
            }
            self.bound[index] = current_handle;
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WindowStyle;
    use crate::window::catalog_order;

    fn window(handle: usize, title: &str, exe: &str) -> Window {
        Window::new(
            handle,
            title,
            100,
            exe,
            WindowStyle::CAPTION | WindowStyle::RESIZABLE_BORDER,
        )
    }

    fn by_exe(path: &str) -> AppSetting {
        AppSetting {
            exe_path: path.into(),
            match_type: MatchType::Executable,
            monitor: 1,
            ..Default::default()
        }
    }

    fn by_title(title: &str) -> AppSetting {
        AppSetting {
            window_name: title.into(),
            match_type: MatchType::Title,
            monitor: 1,
            ..Default::default()
        }
    }

    fn monitors() -> Vec<Monitor> {
        [false, true, false]
            .into_iter()
            .zip(1..)
            .map(|(is_primary, number)| Monitor {
                number,
                is_primary,
                width: 1920,
                height: 1080,
                left: 0,
                top: 0,
            })
            .collect()
    }

    #[test]
    fn resolves_by_executable_and_reports_not_found_after_removal() {
        // Arrange
        let profile = by_exe("C:/app/game.exe");
        let mut catalog = vec![
            window(1, "Other", "C:/other.exe"),
            window(2, "Game", "C:/app/game.exe"),
        ];

        // Act / Assert
        assert_eq!(resolve(&profile, &catalog).map(Window::handle), Some(2));

        catalog.retain(|w| w.handle() != 2);
        assert_eq!(resolve(&profile, &catalog), None);
    }

    #[test]
    fn resolves_by_exact_title_first_match_wins() {
        // Arrange
        let catalog = vec![
            window(1, "editor", "a.exe"),
            window(2, "Editor", "b.exe"),
            window(3, "Editor", "c.exe"),
        ];

        // Act
        let found = resolve(&by_title("Editor"), &catalog);

        // Assert
        assert_eq!(found.map(Window::handle), Some(2));
    }

    #[test]
    fn title_profile_ignores_executable_path() {
        let catalog = vec![window(1, "Game", "C:/app/game.exe")];
        assert_eq!(resolve(&by_title("C:/app/game.exe"), &catalog), None);
    }

    #[test]
    fn empty_match_field_never_matches() {
        // Arrange
        let catalog = vec![window(1, "", "")];

        // Act / Assert
        assert_eq!(resolve(&by_title(""), &catalog), None);
        assert_eq!(resolve(&by_exe(""), &catalog), None);
    }

    #[test]
    fn new_profile_uses_default_monitor_number() {
        let defaults = Defaults {
            monitor: 3,
            ..Default::default()
        };
        assert_eq!(default_monitor_index(&defaults, None, &monitors()), Some(2));
    }

    #[test]
    fn new_profile_without_default_uses_primary() {
        let defaults = Defaults::default();
        assert_eq!(default_monitor_index(&defaults, None, &monitors()), Some(1));
    }

    #[test]
    fn existing_profile_uses_its_own_monitor() {
        // Arrange
        let defaults = Defaults {
            monitor: 3,
            ..Default::default()
        };
        let mut profile = by_title("x");
        profile.monitor = 1;

        // Act / Assert
        assert_eq!(
            default_monitor_index(&defaults, Some(&profile), &monitors()),
            Some(0)
        );
    }

    #[test]
    fn reconciler_binds_then_reports_closed_window() {
        // Arrange
        let mut reconciler = Reconciler::new(vec![by_exe("C:/app/game.exe")]);
        let game = window(2, "Game", "C:/app/game.exe");

        // Act
        let first = reconciler.reconcile(&[window(1, "A", "a.exe"), game.clone()]);
        let unchanged = reconciler.reconcile(&[game.clone()]);
        let gone = reconciler.reconcile(&[window(1, "A", "a.exe")]);

        // Assert
        assert_eq!(
            first,
            vec![Reconciliation::Resolved {
                profile: 0,
                window: game
            }]
        );
        assert!(unchanged.is_empty());
        assert_eq!(
            gone,
            vec![Reconciliation::Lost {
                profile: 0,
                handle: 2,
                closed: true
            }]
        );
        assert_eq!(reconciler.bound_handle(0), None);
    }

    #[test]
    fn reconciler_rebinds_when_window_is_recreated() {
        // Arrange
        let mut reconciler = Reconciler::new(vec![by_title("Game")]);
        reconciler.reconcile(&[window(10, "Game", "")]);

        // Act
        let changes = reconciler.reconcile(&[window(11, "Game", "")]);

        // Assert
        assert_eq!(changes.len(), 2);
        assert!(matches!(
            changes[0],
            Reconciliation::Lost {
                handle: 10,
                closed: true,
                ..
            }
        ));
        assert!(matches!(
            &changes[1],
            Reconciliation::Resolved { window, .. } if window.handle() == 11
        ));
    }

    #[test]
    fn reconciler_reports_renamed_window_as_lost_but_open() {
        let mut reconciler = Reconciler::new(vec![by_title("Game")]);
        reconciler.reconcile(&[window(10, "Game", "")]);

        let changes = reconciler.reconcile(&[window(10, "Game - Paused", "")]);

        assert_eq!(
            changes,
            vec![Reconciliation::Lost {
                profile: 0,
                handle: 10,
                closed: false
            }]
        );
    }

    #[test]
    fn reconciler_keeps_binding_when_catalog_order_changes() {
        // Arrange
        let mut reconciler = Reconciler::new(vec![by_exe("C:/b/browser.exe")]);
        let first = window(10, "Docs", "C:/b/browser.exe");
        let second = window(20, "Mail", "C:/b/browser.exe");
        reconciler.reconcile(&[first.clone(), second.clone()]);

        // Act
        let changes = reconciler.reconcile(&[second, first]);

        // Assert
        assert!(changes.is_empty());
        assert_eq!(reconciler.bound_handle(0), Some(10));
    }

    #[test]
    fn reconciler_moves_to_other_match_when_bound_window_closes() {
        // Arrange
        let mut reconciler = Reconciler::new(vec![by_exe("C:/b/browser.exe")]);
        reconciler.reconcile(&[
            window(10, "Docs", "C:/b/browser.exe"),
            window(20, "Mail", "C:/b/browser.exe"),
        ]);

        // Act
        let changes = reconciler.reconcile(&[window(20, "Mail", "C:/b/browser.exe")]);

        // Assert
        assert_eq!(changes.len(), 2);
        assert!(matches!(changes[0], Reconciliation::Lost { handle: 10, closed: true, .. }));
        assert_eq!(reconciler.bound_handle(0), Some(20));
    }

    #[test]
    fn sorted_catalog_makes_first_match_independent_of_z_order() {
        // Arrange
        let z_order = vec![
            window(1, "Zeta", "C:/x/app.exe"),
            window(2, "Alpha", "C:/x/app.exe"),
        ];

        // Act
        let catalog = catalog_order(&z_order);

        // Assert
        assert_eq!(resolve(&by_exe("C:/x/app.exe"), &catalog).map(Window::title), Some("Alpha"));
    }

    #[test]
    fn reconciler_ignores_empty_catalog() {
        let mut reconciler = Reconciler::new(vec![by_title("Game")]);
        reconciler.reconcile(&[window(10, "Game", "")]);

        assert!(reconciler.reconcile(&[]).is_empty());
        assert_eq!(reconciler.bound_handle(0), Some(10));
    }
}
