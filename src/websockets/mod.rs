// Public API
pub use handler::websocket_handler;
pub use socket::{Connection, SocketError, SocketWrapper};

// Internal modules
mod handler;
mod socket;
