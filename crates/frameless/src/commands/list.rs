use frameless_core::Window;
use frameless_core::window::eligible_windows;

/// Prints the window catalog. Without `all`, only windows that can be
/// picked for a profile are shown, in the order a profile editor
/// offers them.
pub fn execute(all: bool, json: bool) {
    let windows = match frameless_windows::enumerate_windows() {
        Ok(windows) => windows,
        Err(e) => {
            eprintln!("Error: failed to enumerate windows: {e}");
            std::process::exit(1);
        }
    };
    let windows = if all { windows } else { eligible_windows(&windows) };

    if json {
        match serde_json::to_string_pretty(&windows) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    print_table(&windows, all);
    println!("\n{} windows found", windows.len());
}

fn print_table(windows: &[Window], all: bool) {
    let title_width = windows
        .iter()
        .map(|w| w.title().chars().count())
        .max()
        .unwrap_or(0)
        .clamp(5, 60);

    print!("{:<12} {:>7}  {:<title_width$}  ", "HWND", "PID", "Title");
    if all {
        print!("{:<8}  ", "Eligible");
    }
    println!("Executable");

    for window in windows {
        let handle = format!("0x{:X}", window.handle());
        let title = truncate(window.title(), title_width);
        print!(
            "{handle:<12} {:>7}  {title:<title_width$}  ",
            window.process_id()
        );
        if all {
            let eligible = if window.is_valid_for_selection() { "yes" } else { "no" };
            print!("{eligible:<8}  ");
        }
        println!("{}", window.executable_name());
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
