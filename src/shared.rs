use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::notify::RoomNotifier;
use crate::room::repository::RoomRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_repository: Arc<dyn RoomRepository + Send + Sync>,
    pub notifier: Arc<RoomNotifier>,
}

impl AppState {
    pub fn new(
        room_repository: Arc<dyn RoomRepository + Send + Sync>,
        notifier: Arc<RoomNotifier>,
    ) -> Self {
        Self {
            room_repository,
            notifier,
        }
    }
}

/// Failure outcomes of the room operations.
///
/// All of these are expected, non-fatal cases surfaced as structured
/// `{message}` bodies; no operation panics on an unknown room or player.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("room not found")]
    RoomNotFound,

    #[error("player not found")]
    PlayerNotFound,

    #[error("not host")]
    NotHost,

    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::RoomNotFound | AppError::PlayerNotFound => StatusCode::NOT_FOUND,
            AppError::NotHost => StatusCode::FORBIDDEN,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
