use std::cell::RefCell;
use std::sync::mpsc::{self, Sender};
use std::thread;

use frameless_core::{WindowEvent, WindowResult};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, EVENT_OBJECT_CREATE, EVENT_OBJECT_NAMECHANGE, GetMessageW, MSG,
    PostThreadMessageW, TranslateMessage, WINEVENT_OUTOFCONTEXT, WINEVENT_SKIPOWNPROCESS, WM_QUIT,
};

use crate::event;

// Thread-local sender for the WinEvent callback.
thread_local! {
    static EVENT_SENDER: RefCell<Option<Sender<WindowEvent>>> = const { RefCell::new(None) };
}

/// Starts the Win32 event loop on a new thread.
///
/// Hooks object create, destroy, show, hide and name-change events for
/// every process except our own, and forwards the translated events
/// through `event_tx`. Returns once the hook is installed.
pub fn start(event_tx: Sender<WindowEvent>) -> WindowResult<EventLoopHandle> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();

    let handle = thread::spawn(move || {
        EVENT_SENDER.with(|cell| {
            *cell.borrow_mut() = Some(event_tx);
        });

        // SAFETY: GetCurrentThreadId has no preconditions.
        let thread_id = unsafe { GetCurrentThreadId() };

        // SAFETY: SetWinEventHook registers our callback for system-wide
        // window events. WINEVENT_OUTOFCONTEXT means the callback runs on
        // this thread's message loop. WINEVENT_SKIPOWNPROCESS ignores our
        // own windows.
        let hook = unsafe {
            SetWinEventHook(
                EVENT_OBJECT_CREATE,
                EVENT_OBJECT_NAMECHANGE,
                None,
                Some(win_event_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
            )
        };

        if hook.is_invalid() {
            let _ = ready_tx.send(Err("failed to set WinEvent hook".to_string()));
            return;
        }

        let _ = ready_tx.send(Ok(thread_id));
        frameless_core::log_debug!("event hook installed on thread {thread_id}");

        run_message_pump();

        // SAFETY: `hook` came from SetWinEventHook on this thread.
        unsafe {
            let _ = UnhookWinEvent(hook);
        }
        EVENT_SENDER.with(|cell| cell.borrow_mut().take());
    });

    let thread_id: u32 = ready_rx
        .recv()
        .map_err(|_| -> Box<dyn std::error::Error> {
            "event loop thread exited unexpectedly".into()
        })?
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    Ok(EventLoopHandle { thread_id, handle })
}

/// Handle for stopping the event loop thread.
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Signals the event loop to stop and waits for the thread to finish.
    pub fn stop(self) {
        // SAFETY: posting WM_QUIT to a thread we own.
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// Blocks until WM_QUIT, dispatching messages so out-of-context hooks fire.
fn run_message_pump() {
    let mut msg = MSG::default();

    // SAFETY: standard message loop over a stack-allocated MSG.
    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// The WinEvent callback.
unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if let Some(window_event) = event::translate(event, hwnd, id_object, id_child) {
        EVENT_SENDER.with(|cell| {
            if let Some(sender) = cell.borrow().as_ref() {
                let _ = sender.send(window_event);
            }
        });
    }
}
