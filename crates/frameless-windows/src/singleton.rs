use frameless_core::{AcquireError, NamedLock, SingletonGuard};
use windows::Win32::Foundation::{
    CloseHandle, ERROR_ACCESS_DENIED, ERROR_ALREADY_EXISTS, GetLastError, HANDLE,
};
use windows::Win32::System::Threading::{CreateMutexW, OpenMutexW, SYNCHRONIZATION_SYNCHRONIZE};
use windows::core::{HRESULT, HSTRING};

/// The process-wide instance guard on Windows.
pub type InstanceGuard = SingletonGuard<Win32Mutex>;

/// A named Win32 mutex. Existence is the signal; it is never waited on.
#[derive(Debug)]
pub struct Win32Mutex(HANDLE);

impl NamedLock for Win32Mutex {
    fn create(name: &str) -> Result<Self, AcquireError> {
        // SAFETY: CreateMutexW with default security and no initial owner.
        // The last-error code is read immediately after the call.
        let (handle, last_error) = unsafe {
            let handle = CreateMutexW(None, false, &HSTRING::from(name))
                .map_err(|e| AcquireError::Os(e.message()))?;
            (handle, GetLastError())
        };

        if last_error == ERROR_ALREADY_EXISTS {
            // We got a second reference to someone else's mutex.
            // SAFETY: `handle` is a valid handle we own.
            unsafe {
                let _ = CloseHandle(handle);
            }
            return Err(AcquireError::AlreadyRunning);
        }

        Ok(Self(handle))
    }

    fn release(self) {
        // SAFETY: the handle came from CreateMutexW and is closed once.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Checks whether another process holds the named mutex without
/// creating it.
///
/// A `Global\` mutex created by another user exists but cannot be
/// opened from here, so access-denied also counts as running.
pub fn is_instance_running(name: &str) -> bool {
    // SAFETY: OpenMutexW only opens an existing object by name.
    match unsafe { OpenMutexW(SYNCHRONIZATION_SYNCHRONIZE, false, &HSTRING::from(name)) } {
        Ok(handle) => {
            // SAFETY: `handle` is a valid handle we own.
            unsafe {
                let _ = CloseHandle(handle);
            }
            true
        }
        Err(e) => open_error_means_running(e.code()),
    }
}

fn open_error_means_running(code: HRESULT) -> bool {
    code == ERROR_ACCESS_DENIED.to_hresult()
}

#[cfg(test)]
mod tests {
    use windows::Win32::Foundation::ERROR_FILE_NOT_FOUND;

    use super::*;

    #[test]
    fn access_denied_counts_as_running() {
        assert!(open_error_means_running(ERROR_ACCESS_DENIED.to_hresult()));
    }

    #[test]
    fn missing_mutex_is_not_running() {
        assert!(!open_error_means_running(ERROR_FILE_NOT_FOUND.to_hresult()));
    }

    #[test]
    fn second_lock_under_the_same_name_is_refused() {
        // Arrange
        let name = format!(r"Local\frameless-test-{}", std::process::id());
        let first = Win32Mutex::create(&name).unwrap();

        // Act
        let second = Win32Mutex::create(&name);

        // Assert
        assert_eq!(second.unwrap_err(), AcquireError::AlreadyRunning);
        assert!(is_instance_running(&name));
        first.release();
        assert!(!is_instance_running(&name));
    }
}
