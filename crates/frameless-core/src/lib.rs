pub mod bus;
pub mod config;
pub mod event;
pub mod log;
pub mod matching;
pub mod monitor;
pub mod preset;
pub mod rect;
pub mod refresher;
pub mod session;
pub mod singleton;
pub mod window;

pub use bus::{Snapshot, Subscription, WindowBus};
pub use config::{AppSetting, Defaults, MatchType, Settings};
pub use event::WindowEvent;
pub use matching::{Reconciler, Reconciliation, resolve};
pub use monitor::{Monitor, RawMonitor};
pub use preset::Preset;
pub use rect::Rect;
pub use refresher::{RefreshTrigger, Refresher};
pub use session::{ProfileSession, SessionUpdate};
pub use singleton::{AcquireError, INSTANCE_NAME, NamedLock, SingletonGuard};
pub use window::{Window, WindowResult, WindowSource, WindowStyle};
