//! Infrastructure layer of the Fiscal Flow shell.
//!
//! Concrete collaborators for the capability traits in `fiscal-core`:
//! file-backed preferences, configuration, a local identity provider, a
//! watch-based router and notification sinks.

pub mod config_service;
pub mod local_session_oracle;
pub mod notifier;
pub mod paths;
pub mod preference_store;
pub mod storage;
pub mod watch_router;

pub use crate::config_service::ConfigService;
pub use crate::local_session_oracle::LocalSessionOracle;
pub use crate::notifier::{ChannelNotifier, TracingNotifier};
pub use crate::paths::FiscalPaths;
pub use crate::preference_store::{InMemoryPreferenceStore, TomlPreferenceStore};
pub use crate::watch_router::WatchRouter;
