use tokio::sync::mpsc;
use tracing::{debug, instrument};

use super::messages::{Action, Notice};
use super::registry::{ConnectionId, SubscriberRegistry};

/// Bridges room mutations to the subscriber registry
///
/// The engine calls `notify` after every successful mutation; the dispatcher
/// serializes the `{action}` payload once and fans it out to every live
/// connection of the room. Send failures are recovered locally (the registry
/// prunes the dead subscriber) and never surface to the caller.
pub struct RoomNotifier {
    registry: SubscriberRegistry,
}

impl Default for RoomNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomNotifier {
    pub fn new() -> Self {
        Self {
            registry: SubscriberRegistry::new(),
        }
    }

    /// Register a connection for a room code, returning its id
    pub fn subscribe(&self, room_id: &str, sender: mpsc::UnboundedSender<String>) -> ConnectionId {
        self.registry.subscribe(room_id, sender)
    }

    /// Drop a connection from a room code; no-op if already gone
    pub fn unsubscribe(&self, room_id: &str, conn_id: ConnectionId) {
        self.registry.unsubscribe(room_id, conn_id);
    }

    /// Push an action tag to every live connection of the room
    #[instrument(skip(self))]
    pub fn notify(&self, room_id: &str, action: Action) {
        let payload = Notice::new(action).to_json();
        let delivered = self.registry.broadcast(room_id, &payload);

        debug!(
            room_id = %room_id,
            action = %action,
            delivered,
            "Room notification dispatched"
        );
    }

    /// Number of live subscribers for a room code
    pub fn subscriber_count(&self, room_id: &str) -> usize {
        self.registry.subscriber_count(room_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notify_sends_action_payload() {
        let notifier = RoomNotifier::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        notifier.subscribe("R1", tx);

        notifier.notify("R1", Action::GotoResult);

        let payload = rx.recv().await.unwrap();
        let notice: Notice = serde_json::from_str(&payload).unwrap();
        assert_eq!(notice.action, Action::GotoResult);
    }

    #[test]
    fn test_notify_without_subscribers_is_silent() {
        let notifier = RoomNotifier::new();

        // Must not panic or error even though nobody is listening
        notifier.notify("EMPTY", Action::Refresh);
    }

    #[tokio::test]
    async fn test_one_dead_subscriber_does_not_starve_the_rest() {
        let notifier = RoomNotifier::new();
        let (tx_dead, rx_dead) = mpsc::unbounded_channel();
        let (tx_live, mut rx_live) = mpsc::unbounded_channel();
        notifier.subscribe("R1", tx_dead);
        notifier.subscribe("R1", tx_live);
        drop(rx_dead);

        notifier.notify("R1", Action::Refresh);

        let payload = rx_live.recv().await.unwrap();
        assert!(payload.contains("refresh"));
        assert_eq!(notifier.subscriber_count("R1"), 1);
    }
}
