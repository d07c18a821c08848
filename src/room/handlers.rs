use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::RoomService,
    types::{
        CreateRoomRequest, CreateRoomResponse, JoinRoomRequest, LockRequest, RestartRequest,
        ResultsQuery, ResultsResponse, StatusResponse, VoteRequest,
    },
};
use crate::shared::{AppError, AppState};

fn room_service(state: &AppState) -> RoomService {
    RoomService::new(
        Arc::clone(&state.room_repository),
        Arc::clone(&state.notifier),
    )
}

/// HTTP handler for creating a new room
///
/// POST /create-room
/// Returns the generated room code
#[instrument(name = "create_room", skip(state))]
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>, AppError> {
    info!(host_name = %request.host_name, "Creating new room");

    let response = room_service(&state).create_room(request).await?;

    Ok(Json(response))
}

/// HTTP handler for joining an existing room
///
/// POST /join
#[instrument(name = "join_room", skip(state))]
pub async fn join_room(
    State(state): State<AppState>,
    Json(request): Json<JoinRoomRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let response = room_service(&state).join_room(request).await?;

    Ok(Json(response))
}

/// HTTP handler for casting or changing a vote
///
/// POST /vote
#[instrument(name = "submit_vote", skip(state))]
pub async fn submit_vote(
    State(state): State<AppState>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let response = room_service(&state).submit_vote(request).await?;

    Ok(Json(response))
}

/// HTTP handler for locking a room's voting (host only)
///
/// POST /lock
#[instrument(name = "lock_votes", skip(state))]
pub async fn lock_votes(
    State(state): State<AppState>,
    Json(request): Json<LockRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let response = room_service(&state).lock_votes(request).await?;

    Ok(Json(response))
}

/// HTTP handler for the aggregated results view
///
/// GET /results?roomId=CODE
#[instrument(name = "get_results", skip(state))]
pub async fn get_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<ResultsResponse>, AppError> {
    let room_id = query.room_id.ok_or(AppError::RoomNotFound)?;

    let response = room_service(&state).get_results(&room_id).await?;

    Ok(Json(response))
}

/// HTTP handler for restarting a round
///
/// POST /restart
#[instrument(name = "restart_game", skip(state))]
pub async fn restart_game(
    State(state): State<AppState>,
    Json(request): Json<RestartRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let response = room_service(&state).restart_game(request).await?;

    Ok(Json(response))
}
