// Library crate for the pointcast voting server
// This file exposes the public API for integration tests

pub mod notify;
pub mod room;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use notify::{Action, Notice, RoomNotifier, SubscriberRegistry};
pub use room::{models::RoomModel, repository::RoomRepository, RoomService};
pub use shared::{AppError, AppState};
pub use websockets::{Connection, SocketWrapper};
