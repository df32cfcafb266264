pub fn execute(json: bool) {
    frameless_windows::dpi::enable_dpi_awareness();
    let monitors = frameless_windows::enumerate_monitors();

    if json {
        match serde_json::to_string_pretty(&monitors) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    for monitor in &monitors {
        let bounds = monitor.bounds();
        println!(
            "{monitor}  at ({}, {}) to ({}, {})",
            bounds.x,
            bounds.y,
            bounds.right(),
            bounds.bottom()
        );
    }
    println!("\n{} displays found", monitors.len());
}
