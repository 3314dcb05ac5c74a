//! Route observer backed by a `tokio::sync::watch` channel.

use fiscal_core::navigation::Router;
use tokio::sync::watch;

/// Holds the current path and publishes every change to watchers.
///
/// Navigating to the path already shown is a no-op for watchers, so a late
/// duplicate redirect does not wake anyone.
#[derive(Debug)]
pub struct WatchRouter {
    path: watch::Sender<String>,
}

impl WatchRouter {
    pub fn new(initial_path: impl Into<String>) -> Self {
        let (path, _) = watch::channel(initial_path.into());
        Self { path }
    }

    /// Receiver that yields the path after every change.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.path.subscribe()
    }
}

impl Router for WatchRouter {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        let changed = self.path.send_if_modified(|current| {
            if current == path {
                return false;
            }
            *current = path.to_string();
            true
        });
        if changed {
            tracing::debug!("[Router] -> {}", path);
        }
    }
}
