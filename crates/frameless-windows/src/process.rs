use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::ProcessStatus::K32GetModuleFileNameExW;
use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ};

/// Returns the executable path for a process ID.
///
/// `None` when the process is gone or cannot be opened (elevated and
/// protected processes refuse this access from a normal user).
pub fn executable_path(pid: u32) -> Option<String> {
    if pid == 0 {
        return None;
    }
    // SAFETY: The handle is opened with read-only query rights, used
    // for one call and closed before returning.
    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, false, pid).ok()?;
        let mut buf = [0u16; 1024];
        let len = K32GetModuleFileNameExW(Some(handle), None, &mut buf);
        let _ = CloseHandle(handle);
        if len == 0 {
            return None;
        }
        Some(String::from_utf16_lossy(&buf[..len as usize]))
    }
}
