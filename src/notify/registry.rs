use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// Unique identifier for a real-time connection
pub type ConnectionId = Uuid;

/// A live connection handle: the connection task owns the socket and drains
/// messages pushed through this sender.
#[derive(Clone)]
pub struct Subscriber {
    pub conn_id: ConnectionId,
    sender: mpsc::UnboundedSender<String>,
}

/// Registry of live real-time connections, keyed by room code
///
/// The registry is independent of the room table: a room code may gain
/// subscribers before or after the room itself exists. Per-room subscriber
/// lists keep registration order; the map is sharded so rooms do not contend
/// on a single lock.
pub struct SubscriberRegistry {
    rooms: DashMap<String, Vec<Subscriber>>,
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Register a connection under a room code, returning its fresh id
    pub fn subscribe(&self, room_id: &str, sender: mpsc::UnboundedSender<String>) -> ConnectionId {
        let conn_id = Uuid::new_v4();

        self.rooms
            .entry(room_id.to_string())
            .or_default()
            .push(Subscriber { conn_id, sender });

        info!(room_id = %room_id, conn_id = %conn_id, "Subscriber registered");

        conn_id
    }

    /// Remove a connection from a room's list; no-op if already absent
    pub fn unsubscribe(&self, room_id: &str, conn_id: ConnectionId) {
        let mut removed = false;
        if let Some(mut subscribers) = self.rooms.get_mut(room_id) {
            let before = subscribers.len();
            subscribers.retain(|s| s.conn_id != conn_id);
            removed = subscribers.len() < before;
        }
        self.rooms.remove_if(room_id, |_, subscribers| subscribers.is_empty());

        if removed {
            info!(room_id = %room_id, conn_id = %conn_id, "Subscriber removed");
        }
    }

    /// Send a payload to every connection registered for a room code.
    ///
    /// Iterates over a snapshot taken at call time, so removals triggered
    /// while the broadcast runs never corrupt the iteration. Subscribers
    /// whose send fails are pruned from the live list and the broadcast
    /// continues to the rest. Returns the number of successful deliveries;
    /// an unknown room code is a silent no-op.
    pub fn broadcast(&self, room_id: &str, payload: &str) -> usize {
        let snapshot = match self.rooms.get(room_id) {
            Some(subscribers) => subscribers.value().clone(),
            None => return 0,
        };

        let mut dead = Vec::new();
        let mut delivered = 0;
        for subscriber in &snapshot {
            if subscriber.sender.send(payload.to_string()).is_ok() {
                delivered += 1;
            } else {
                dead.push(subscriber.conn_id);
            }
        }

        for conn_id in dead {
            debug!(room_id = %room_id, conn_id = %conn_id, "Pruning dead subscriber");
            self.unsubscribe(room_id, conn_id);
        }

        delivered
    }

    /// Number of live subscribers currently registered for a room code
    pub fn subscriber_count(&self, room_id: &str) -> usize {
        self.rooms.get(room_id).map(|s| s.len()).unwrap_or(0)
    }
}
