use serde::{Deserialize, Serialize};

/// Request payload for creating a new room
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub host_name: String,
}

/// Response for room creation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: String,
}

/// Request payload for joining a room
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    pub room_id: String,
    pub name: String,
}

/// Request payload for casting (or changing) a vote
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub room_id: String,
    pub name: String,
    pub score: i32,
}

/// Request payload for locking a room's voting; only the host may lock
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockRequest {
    pub room_id: String,
    pub name: String,
}

/// Request payload for restarting a round
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartRequest {
    pub room_id: String,
}

/// Query string for the results endpoint.
/// The room id is optional so a missing parameter reads as "room not found"
/// rather than a request rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsQuery {
    pub room_id: Option<String>,
}

/// Generic acknowledgement carrying a human-readable message
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

impl StatusResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One roster entry in the results view; `score` is null until the player votes
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerResult {
    pub name: String,
    pub score: Option<i32>,
}

/// Aggregated view of a room's current round
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub locked: bool,
    pub results: Vec<PlayerResult>,
    pub average: Option<f64>,
}
