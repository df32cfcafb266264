//! Background thread that keeps the bus current.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::{WindowBus, WindowSource};

enum Signal {
    Refresh,
    Stop,
}

/// Requests an out-of-schedule refresh. Cheap to clone and safe to
/// fire from any thread, including OS callbacks.
#[derive(Clone)]
pub struct RefreshTrigger(Sender<Signal>);

impl RefreshTrigger {
    pub fn fire(&self) {
        let _ = self.0.send(Signal::Refresh);
    }
}

/// Handle for the refresh thread.
pub struct Refresher {
    tx: Sender<Signal>,
    handle: thread::JoinHandle<()>,
}

impl Refresher {
    /// Starts refreshing `bus` from `source`: once right away, then
    /// every `interval` and whenever a trigger fires.
    pub fn start<S>(bus: Arc<WindowBus>, source: S, interval: Duration) -> Self
    where
        S: WindowSource + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || run(&bus, &source, interval, &rx));
        crate::log_info!("refresher started ({} ms)", interval.as_millis());
        Self { tx, handle }
    }

    pub fn trigger(&self) -> RefreshTrigger {
        RefreshTrigger(self.tx.clone())
    }

    /// Stops the thread and waits for it to finish. An enumeration in
    /// progress runs to completion first.
    pub fn stop(self) {
        let _ = self.tx.send(Signal::Stop);
        let _ = self.handle.join();
        crate::log_info!("refresher stopped");
    }
}

fn run(bus: &WindowBus, source: &impl WindowSource, interval: Duration, rx: &Receiver<Signal>) {
    loop {
        bus.refresh(source);

        match rx.recv_timeout(interval) {
            Ok(Signal::Refresh) | Err(RecvTimeoutError::Timeout) => {}
            Ok(Signal::Stop) | Err(RecvTimeoutError::Disconnected) => return,
        }

        // Triggers that piled up during the wait collapse into one refresh.
        for signal in rx.try_iter() {
            if let Signal::Stop = signal {
                return;
            }
        }
    }
}
