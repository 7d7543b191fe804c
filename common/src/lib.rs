pub mod config;
pub mod endpoints;
pub mod error;
pub mod notifier;
pub mod preference;
pub mod scheduler;
pub mod session;
pub mod temperature;
pub mod types;

pub use config::DashboardConfig;
pub use endpoints::*;
pub use error::DashboardError;
pub use notifier::{Notifier, TOAST_DURATION_MS};
pub use preference::{KeyValueStore, MemoryStore, PreferenceStore, SCALE_PREF_KEY};
pub use scheduler::Scheduler;
pub use session::SessionState;
pub use temperature::{convert, decode_fixed_point, FixedPointFormat};
pub use types::{
    signal_percent, AccessPointInfo, InfoSource, LedOp, NetworkInfo, PollTask, ScalePreference,
    SignalReading, Visibility,
};
