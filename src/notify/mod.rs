// Public API
pub use dispatcher::RoomNotifier;
pub use messages::{Action, Notice};
pub use registry::{ConnectionId, SubscriberRegistry};

// Internal modules
mod dispatcher;
mod messages;
mod registry;
