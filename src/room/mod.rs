// Public API - what other modules can use
pub use handlers::{create_room, get_results, join_room, lock_votes, restart_game, submit_vote};
pub use service::RoomService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
