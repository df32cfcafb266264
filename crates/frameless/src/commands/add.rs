use frameless_core::{ProfileSession, Rect, config, log};

use crate::AddArgs;

/// Builds a profile for a live window and appends it to `config.toml`.
pub fn execute(args: &AddArgs) {
    let mut settings = config::load();
    log::init(&settings.logging);
    frameless_windows::dpi::enable_dpi_awareness();

    let windows = match frameless_windows::enumerate_windows() {
        Ok(windows) => windows,
        Err(e) => fail(&format!("failed to enumerate windows: {e}")),
    };
    let monitors = frameless_windows::enumerate_monitors();
    let mut session = ProfileSession::new(&settings.defaults, None, monitors, &windows);

    let Some(window) = windows.iter().find(|w| w.handle() == args.handle) else {
        fail(&format!("no window with handle 0x{:X}", args.handle));
    };
    if !session.select_window(window) {
        fail(&format!(
            "\"{window}\" has no caption or border and cannot be pinned; see 'frameless list'"
        ));
    }

    if let Some(number) = args.monitor {
        let selected = number
            .checked_sub(1)
            .is_some_and(|index| session.select_monitor(index as usize));
        if !selected {
            fail(&format!("display {number} is not connected; see 'frameless monitors'"));
        }
    }
    if let Some(match_type) = args.match_type {
        session.set_match_type(match_type.into());
    }
    if let Some(preset) = args.preset
        && !session.apply_preset(preset.into())
    {
        fail("a display must be selected to use a preset");
    }
    if args.x.is_some() || args.y.is_some() || args.width.is_some() || args.height.is_some() {
        let draft = session.draft();
        let placement = Rect::new(
            args.x.unwrap_or(draft.offset_x),
            args.y.unwrap_or(draft.offset_y),
            args.width.unwrap_or(draft.width),
            args.height.unwrap_or(draft.height),
        );
        session.set_geometry(placement);
    }

    let Some(profile) = session.finish() else {
        fail("profile is incomplete: it needs a display, a positive size and a title or path to match");
    };

    println!(
        "{profile}: {} on display {}, {}x{} at offset ({}, {})",
        profile.match_type,
        profile.monitor,
        profile.width,
        profile.height,
        profile.offset_x,
        profile.offset_y
    );
    settings.apps.push(profile);

    match config::save(&settings) {
        Ok(()) => {
            if let Some(path) = config::config_path() {
                println!("Saved to {}", path.display());
            }
        }
        Err(e) => fail(&e),
    }
}

fn fail(message: &str) -> ! {
    frameless_core::log_error!("add: {message}");
    eprintln!("Error: {message}");
    std::process::exit(1);
}
