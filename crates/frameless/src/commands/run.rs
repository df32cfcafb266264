use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use frameless_core::window::catalog_order;
use frameless_core::{
    AcquireError, INSTANCE_NAME, Monitor, Reconciler, Reconciliation, Refresher, WindowBus,
    config, log,
};
use frameless_windows::{InstanceGuard, Win32Windows};

use super::resolve::find_monitor;

/// Runs in the foreground: keeps the window list fresh and reports
/// whenever a saved profile gains or loses its window. Stops on Ctrl+C.
pub fn execute() {
    let settings = config::load();
    log::init(&settings.logging);

    let guard = match InstanceGuard::acquire(INSTANCE_NAME) {
        Ok(guard) => guard,
        Err(AcquireError::AlreadyRunning) => {
            eprintln!("Frameless is already running.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    frameless_windows::dpi::enable_dpi_awareness();
    let monitors = frameless_windows::enumerate_monitors();
    print_banner(&monitors, settings.apps.len());

    let (stop_tx, stop_rx) = mpsc::channel();
    if let Err(e) = frameless_windows::ctrl_c::set_handler(stop_tx) {
        eprintln!("Error: {e}");
        guard.release();
        std::process::exit(1);
    }

    let bus = Arc::new(WindowBus::new());
    let mut reconciler = Reconciler::new(settings.apps.clone());
    let subscription = bus.subscribe(move |snapshot| {
        let catalog = catalog_order(snapshot.windows());
        for change in reconciler.reconcile(&catalog) {
            report(&reconciler, &change, &monitors);
        }
    });

    let interval = Duration::from_millis(settings.refresh.interval_ms);
    let refresher = Refresher::start(Arc::clone(&bus), Win32Windows, interval);

    // OS window events only nudge the refresher; the bus still sees
    // whole snapshots.
    let watcher = if settings.refresh.event_hooks {
        let (event_tx, event_rx) = mpsc::channel();
        match frameless_windows::event_loop::start(event_tx) {
            Ok(event_loop) => {
                let trigger = refresher.trigger();
                let forwarder = thread::spawn(move || {
                    for event in event_rx {
                        frameless_core::log_debug!("{event}");
                        trigger.fire();
                    }
                });
                Some((event_loop, forwarder))
            }
            Err(e) => {
                frameless_core::log_warn!("event hooks unavailable, polling only: {e}");
                eprintln!("Warning: event hooks unavailable, polling only: {e}");
                None
            }
        }
    } else {
        None
    };

    frameless_core::log_info!("frameless running");
    let _ = stop_rx.recv();
    println!("\nStopping...");

    if let Some((event_loop, forwarder)) = watcher {
        event_loop.stop();
        let _ = forwarder.join();
    }
    refresher.stop();
    bus.unsubscribe(subscription);
    guard.release();
    frameless_core::log_info!("frameless stopped");
}

fn report(reconciler: &Reconciler, change: &Reconciliation, monitors: &[Monitor]) {
    match change {
        Reconciliation::Resolved { profile, window } => {
            let profile = &reconciler.profiles()[*profile];
            let target = match find_monitor(monitors, profile.monitor) {
                Some(monitor) => {
                    let r = profile.target_rect(monitor);
                    format!("{}x{} at ({}, {})", r.width, r.height, r.x, r.y)
                }
                None => format!("display {} is not connected", profile.monitor),
            };
            frameless_core::log_info!("{profile}: bound to 0x{:X}", window.handle());
            println!("+ {profile}: 0x{:X} \"{window}\" -> {target}", window.handle());
        }
        Reconciliation::Lost {
            profile,
            handle,
            closed,
        } => {
            let profile = &reconciler.profiles()[*profile];
            let why = if *closed { "closed" } else { "no longer matches" };
            frameless_core::log_info!("{profile}: 0x{handle:X} {why}");
            println!("- {profile}: 0x{handle:X} {why}");
        }
    }
}

fn print_banner(monitors: &[Monitor], profiles: usize) {
    let d = "\x1b[90m"; // Dim gray: labels
    let w = "\x1b[1;97m"; // Bold bright white: values
    let r = "\x1b[0m"; // Reset

    super::banner::print_logo();
    println!();
    println!("  {d}Config{r}     ~/.config/frameless/config.toml");
    println!("  {d}Profiles{r}   {w}{profiles}{r}");
    for monitor in monitors {
        println!("  {d}Display{r}    {monitor}");
    }
    println!("  {d}Stop{r}       Ctrl+C");
    println!();
}
