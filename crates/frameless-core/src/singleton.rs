//! Single-instance guard backed by a named, system-wide OS object.

use std::fmt;

/// Name of the object that marks a running instance.
///
/// The `Global\` prefix makes it visible across login sessions.
pub const INSTANCE_NAME: &str = r"Global\frameless-instance-5d3f9c1e";

/// Why the guard could not be taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireError {
    /// Another live process already owns the object. Startup must
    /// be aborted, not retried.
    AlreadyRunning,
    /// The OS refused to create the object at all.
    Os(String),
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => f.write_str("another instance is already running"),
            Self::Os(msg) => write!(f, "could not create instance lock: {msg}"),
        }
    }
}

impl std::error::Error for AcquireError {}

/// A platform named lock object.
pub trait NamedLock: Sized {
    /// Creates the object under `name`.
    ///
    /// Returns [`AcquireError::AlreadyRunning`] when an object with that
    /// name already exists.
    fn create(name: &str) -> Result<Self, AcquireError>;

    /// Closes this process's reference to the object.
    fn release(self);
}

/// Holds the named lock for the lifetime of the process.
///
/// The lock is released exactly once: by [`SingletonGuard::release`]
/// or, on any other exit path, when the guard is dropped.
pub struct SingletonGuard<L: NamedLock> {
    lock: Option<L>,
    name: String,
}

impl<L: NamedLock> SingletonGuard<L> {
    pub fn acquire(name: &str) -> Result<Self, AcquireError> {
        match L::create(name) {
            Ok(lock) => {
                crate::log_info!("instance lock acquired: {name}");
                Ok(Self {
                    lock: Some(lock),
                    name: name.to_string(),
                })
            }
            Err(e) => {
                crate::log_warn!("instance lock {name} not acquired: {e}");
                Err(e)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if let Some(lock) = self.lock.take() {
            lock.release();
            crate::log_info!("instance lock released: {}", self.name);
        }
    }
}

impl<L: NamedLock> Drop for SingletonGuard<L> {
    fn drop(&mut self) {
        self.release_once();
    }
}
