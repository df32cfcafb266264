use frameless_core::window::catalog_order;
use frameless_core::{Monitor, config, resolve};

/// Resolves every saved profile against the live window list and
/// prints where its window would be placed.
pub fn execute() {
    let settings = config::load();
    if settings.apps.is_empty() {
        println!("No profiles saved. Add one with 'frameless add'.");
        return;
    }

    frameless_windows::dpi::enable_dpi_awareness();
    let windows = match frameless_windows::enumerate_windows() {
        Ok(windows) => catalog_order(&windows),
        Err(e) => {
            eprintln!("Error: failed to enumerate windows: {e}");
            std::process::exit(1);
        }
    };
    let monitors = frameless_windows::enumerate_monitors();

    for profile in &settings.apps {
        let Some(window) = resolve(profile, &windows) else {
            println!("{profile}: not found ({})", profile.match_type);
            continue;
        };
        match find_monitor(&monitors, profile.monitor) {
            Some(monitor) => {
                let target = profile.target_rect(monitor);
                println!(
                    "{profile}: 0x{:X} -> {}x{} at ({}, {}) on {monitor}",
                    window.handle(),
                    target.width,
                    target.height,
                    target.x,
                    target.y
                );
            }
            None => println!(
                "{profile}: 0x{:X} -> display {} is not connected",
                window.handle(),
                profile.monitor
            ),
        }
    }
}

pub(crate) fn find_monitor(monitors: &[Monitor], number: u32) -> Option<&Monitor> {
    monitors.iter().find(|m| m.number == number)
}
