//! Route observer capability.

/// Observes and changes the current route.
///
/// Routing mechanics belong to the host; the shell only reads the path and
/// requests redirects.
pub trait Router: Send + Sync {
    /// The path currently displayed, e.g. `/dashboard`.
    fn current_path(&self) -> String;

    /// Moves the view to `path`. This is the only mutation the shell performs.
    fn navigate(&self, path: &str);
}
