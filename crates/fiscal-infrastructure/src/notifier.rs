//! Notification sinks.

use fiscal_core::notification::{Notification, Notifier};
use tokio::sync::mpsc;

/// Writes notifications to the log. Destructive ones are warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_destructive() {
            tracing::warn!(
                "[Notify] {}: {}",
                notification.title,
                notification.description
            );
        } else {
            tracing::info!(
                "[Notify] {}: {}",
                notification.title,
                notification.description
            );
        }
    }
}

/// Forwards notifications to a front end over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(sender: mpsc::UnboundedSender<Notification>) -> Self {
        Self { sender }
    }

    /// Creates a notifier together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // Fire-and-forget: a closed receiver just drops the toast
        if self.sender.send(notification).is_err() {
            tracing::debug!("[Notify] receiver closed, notification dropped");
        }
    }
}
