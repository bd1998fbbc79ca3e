//! Notification emission
//!
//! Handlers publish short operational messages on named channels. Emission is
//! fire-and-forget: nothing waits for delivery and a missing listener is not
//! an error.

use crate::contracts::Notification;
use tokio::sync::broadcast;
use tracing::debug;

/// Default number of notifications buffered per subscriber
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Publish capability injected into the handlers
pub trait NotificationSink: Send + Sync {
    fn emit(&self, channel: &str, message: &str);
}

/// Broadcast bus for notifications.
///
/// Every subscriber sees every notification emitted after it subscribed.
/// Slow subscribers drop the oldest entries once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Notification>,
}

impl EventBus {
    /// Create new bus
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl NotificationSink for EventBus {
    fn emit(&self, channel: &str, message: &str) {
        debug!(channel = %channel, message = %message, "Emitting notification");

        // Err only means nobody is listening
        let _ = self.sender.send(Notification::new(channel, message));
    }
}
