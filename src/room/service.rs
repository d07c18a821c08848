use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::RoomModel,
    repository::{JoinRoomResult, LockResult, RestartResult, RoomRepository, VoteResult},
    types::{
        CreateRoomRequest, CreateRoomResponse, JoinRoomRequest, LockRequest, PlayerResult,
        RestartRequest, ResultsResponse, StatusResponse, VoteRequest,
    },
};
use crate::{
    notify::{Action, RoomNotifier},
    shared::AppError,
};

/// Implements the room lifecycle on top of the room store
///
/// Every successful mutation triggers exactly one notification for the room;
/// rejected operations and pure reads trigger none.
pub struct RoomService {
    repository: Arc<dyn RoomRepository + Send + Sync>,
    notifier: Arc<RoomNotifier>,
}

impl RoomService {
    pub fn new(
        repository: Arc<dyn RoomRepository + Send + Sync>,
        notifier: Arc<RoomNotifier>,
    ) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Creates a new room with a generated code; always succeeds
    #[instrument(skip(self))]
    pub async fn create_room(
        &self,
        request: CreateRoomRequest,
    ) -> Result<CreateRoomResponse, AppError> {
        let room_model = RoomModel::new(request.host_name);
        debug!(room_id = %room_model.id, "Generated room code");

        self.repository.create_room(&room_model).await?;

        info!(
            room_id = %room_model.id,
            host_name = %room_model.host_name,
            "Room created"
        );

        Ok(CreateRoomResponse {
            room_id: room_model.id,
        })
    }

    /// Adds a player to a room's roster.
    ///
    /// Joining twice with the same name is a soft no-op: state is unchanged
    /// and no notification goes out.
    #[instrument(skip(self))]
    pub async fn join_room(&self, request: JoinRoomRequest) -> Result<StatusResponse, AppError> {
        let result = self
            .repository
            .try_join_room(&request.room_id, &request.name)
            .await?;

        match result {
            JoinRoomResult::Joined(room) => {
                self.notifier.notify(&room.id, Action::Refresh);
                Ok(StatusResponse::new(format!(
                    "Welcome {}, you joined room {}!",
                    request.name, room.id
                )))
            }
            JoinRoomResult::AlreadyJoined => Ok(StatusResponse::new(format!(
                "{} already joined",
                request.name
            ))),
            JoinRoomResult::RoomNotFound => Err(AppError::RoomNotFound),
        }
    }

    /// Records a player's score for the current round.
    ///
    /// A player may change their vote; the latest score wins. Voting is
    /// accepted even while the room is locked.
    #[instrument(skip(self))]
    pub async fn submit_vote(&self, request: VoteRequest) -> Result<StatusResponse, AppError> {
        let result = self
            .repository
            .record_vote(&request.room_id, &request.name, request.score)
            .await?;

        match result {
            VoteResult::Recorded(room) => {
                self.notifier.notify(&room.id, Action::Refresh);
                Ok(StatusResponse::new(format!(
                    "{} voted {}",
                    request.name, request.score
                )))
            }
            VoteResult::PlayerNotFound => Err(AppError::PlayerNotFound),
            VoteResult::RoomNotFound => Err(AppError::RoomNotFound),
        }
    }

    /// Locks voting and sends clients to the results view; host only.
    /// Locking an already-locked room succeeds again and re-notifies.
    #[instrument(skip(self))]
    pub async fn lock_votes(&self, request: LockRequest) -> Result<StatusResponse, AppError> {
        let result = self
            .repository
            .lock_room(&request.room_id, &request.name)
            .await?;

        match result {
            LockResult::Locked => {
                self.notifier.notify(&request.room_id, Action::GotoResult);
                Ok(StatusResponse::new(format!(
                    "Voting locked for room {}",
                    request.room_id
                )))
            }
            LockResult::NotHost => Err(AppError::NotHost),
            LockResult::RoomNotFound => Err(AppError::RoomNotFound),
        }
    }

    /// Aggregated snapshot of a room's round; pure read, no notification
    #[instrument(skip(self))]
    pub async fn get_results(&self, room_id: &str) -> Result<ResultsResponse, AppError> {
        let room = self
            .repository
            .get_room(room_id)
            .await?
            .ok_or(AppError::RoomNotFound)?;

        let results = room
            .players
            .iter()
            .map(|(name, vote)| PlayerResult {
                name: name.clone(),
                score: vote.score,
            })
            .collect();

        Ok(ResultsResponse {
            locked: room.locked,
            results,
            average: room.average(),
        })
    }

    /// Clears every score, unlocks the room, and sends clients back to the
    /// voting view. Any caller may restart; this is not host-gated.
    #[instrument(skip(self))]
    pub async fn restart_game(&self, request: RestartRequest) -> Result<StatusResponse, AppError> {
        let result = self.repository.reset_room(&request.room_id).await?;

        match result {
            RestartResult::Restarted => {
                self.notifier.notify(&request.room_id, Action::GotoVote);
                Ok(StatusResponse::new(format!(
                    "Room {} reset, voting is open again",
                    request.room_id
                )))
            }
            RestartResult::RoomNotFound => Err(AppError::RoomNotFound),
        }
    }
}
