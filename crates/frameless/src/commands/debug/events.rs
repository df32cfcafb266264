use std::sync::mpsc;
use std::time::Duration;

use frameless_windows::window;

/// Watches window events in real time. Press Ctrl+C to stop.
pub fn execute() {
    println!("Watching window events (press Ctrl+C to stop)...\n");

    let (tx, rx) = mpsc::channel();
    let event_loop = match frameless_windows::event_loop::start(tx) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to start event loop: {e}");
            return;
        }
    };

    // Set up Ctrl+C handler to stop the event loop cleanly.
    let (stop_tx, stop_rx) = mpsc::channel();
    if let Err(e) = frameless_windows::ctrl_c::set_handler(stop_tx) {
        eprintln!("Failed to install Ctrl+C handler: {e}");
        event_loop.stop();
        return;
    }

    loop {
        if stop_rx.try_recv().is_ok() {
            break;
        }

        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                let title = window::title(window::hwnd_from_raw(event.hwnd()));
                println!("{event} \"{title}\"");
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    event_loop.stop();
}
