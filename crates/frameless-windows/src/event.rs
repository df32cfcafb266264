use frameless_core::WindowEvent;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_OBJECT_CREATE, EVENT_OBJECT_DESTROY, EVENT_OBJECT_HIDE, EVENT_OBJECT_NAMECHANGE,
    EVENT_OBJECT_SHOW,
};

/// Object ID indicating the event applies to the window itself,
/// not a child element like a scrollbar or menu item.
const OBJID_WINDOW: i32 = 0;

/// Child ID for the object itself.
const CHILDID_SELF: i32 = 0;

/// Translates a raw Win32 event into a platform-agnostic `WindowEvent`.
///
/// Returns `None` for child objects, for events without a window, and
/// for event types that cannot change the window catalog.
pub fn translate(event: u32, hwnd: HWND, id_object: i32, id_child: i32) -> Option<WindowEvent> {
    if id_object != OBJID_WINDOW || id_child != CHILDID_SELF || hwnd.is_invalid() {
        return None;
    }

    let hwnd = hwnd.0 as usize;

    match event {
        EVENT_OBJECT_CREATE => Some(WindowEvent::Created { hwnd }),
        EVENT_OBJECT_DESTROY => Some(WindowEvent::Destroyed { hwnd }),
        EVENT_OBJECT_SHOW => Some(WindowEvent::Shown { hwnd }),
        EVENT_OBJECT_HIDE => Some(WindowEvent::Hidden { hwnd }),
        EVENT_OBJECT_NAMECHANGE => Some(WindowEvent::TitleChanged { hwnd }),
        _ => None,
    }
}
