use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, info, instrument};

use super::models::RoomModel;
use crate::shared::AppError;

/// Result of attempting to join a room
#[derive(Debug, Clone)]
pub enum JoinRoomResult {
    /// Player was added to the roster, returns updated room data
    Joined(RoomModel),
    /// Player name is already on the roster; nothing was changed
    AlreadyJoined,
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to record a vote
#[derive(Debug, Clone)]
pub enum VoteResult {
    /// Score recorded (overwriting any previous value this round)
    Recorded(RoomModel),
    /// Player name is not on the roster
    PlayerNotFound,
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to lock voting
#[derive(Debug, Clone)]
pub enum LockResult {
    /// Voting is now locked (idempotent: re-locking succeeds again)
    Locked,
    /// Caller is not the room's host
    NotHost,
    /// Room does not exist
    RoomNotFound,
}

/// Result of attempting to reset a room for a new round
#[derive(Debug, Clone)]
pub enum RestartResult {
    /// Every score cleared and the room unlocked
    Restarted,
    /// Room does not exist
    RoomNotFound,
}

/// Trait for room store operations
///
/// Compound operations are atomic per room: the check and the mutation happen
/// inside one critical section, so concurrent callers cannot interleave
/// between them.
#[async_trait]
pub trait RoomRepository {
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError>;
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;

    /// Atomically adds a player to the roster unless the name is taken
    async fn try_join_room(
        &self,
        room_id: &str,
        player_name: &str,
    ) -> Result<JoinRoomResult, AppError>;

    /// Atomically records a player's score for the current round
    async fn record_vote(
        &self,
        room_id: &str,
        player_name: &str,
        score: i32,
    ) -> Result<VoteResult, AppError>;

    /// Atomically locks voting if the caller is the host
    async fn lock_room(&self, room_id: &str, caller: &str) -> Result<LockResult, AppError>;

    /// Atomically clears every score and unlocks the room
    async fn reset_room(&self, room_id: &str) -> Result<RestartResult, AppError>;
}

/// In-memory implementation of RoomRepository
///
/// Rooms live in a sharded map: mutating one room serializes on its shard
/// while other rooms stay accessible, and there is no process-wide lock.
/// Rooms are never removed; they live for the lifetime of the process.
pub struct InMemoryRoomRepository {
    rooms: DashMap<String, RoomModel>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self, room))]
    async fn create_room(&self, room: &RoomModel) -> Result<(), AppError> {
        debug!(room_id = %room.id, host_name = %room.host_name, "Creating room in memory");

        // Code collisions are negligible-probability and not defended against
        self.rooms.insert(room.id.clone(), room.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        let room = self.rooms.get(room_id).map(|entry| entry.value().clone());

        match &room {
            Some(r) => debug!(room_id = %room_id, player_count = r.player_count(), "Room found"),
            None => debug!(room_id = %room_id, "Room not found"),
        }

        Ok(room)
    }

    #[instrument(skip(self))]
    async fn try_join_room(
        &self,
        room_id: &str,
        player_name: &str,
    ) -> Result<JoinRoomResult, AppError> {
        let mut room = match self.rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(JoinRoomResult::RoomNotFound);
            }
        };

        if room.has_player(player_name) {
            debug!(room_id = %room_id, player_name = %player_name, "Player already joined");
            return Ok(JoinRoomResult::AlreadyJoined);
        }

        room.add_player(player_name);
        let updated_room = room.clone();

        info!(
            room_id = %room_id,
            player_name = %player_name,
            new_player_count = updated_room.player_count(),
            "Player joined room"
        );

        Ok(JoinRoomResult::Joined(updated_room))
    }

    #[instrument(skip(self))]
    async fn record_vote(
        &self,
        room_id: &str,
        player_name: &str,
        score: i32,
    ) -> Result<VoteResult, AppError> {
        let mut room = match self.rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(VoteResult::RoomNotFound);
            }
        };

        // Votes are accepted regardless of lock state
        if !room.record_score(player_name, score) {
            debug!(room_id = %room_id, player_name = %player_name, "Player not in room");
            return Ok(VoteResult::PlayerNotFound);
        }

        info!(room_id = %room_id, player_name = %player_name, score, "Vote recorded");

        Ok(VoteResult::Recorded(room.clone()))
    }

    #[instrument(skip(self))]
    async fn lock_room(&self, room_id: &str, caller: &str) -> Result<LockResult, AppError> {
        let mut room = match self.rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(LockResult::RoomNotFound);
            }
        };

        if !room.is_host(caller) {
            debug!(room_id = %room_id, caller = %caller, "Lock refused, caller is not host");
            return Ok(LockResult::NotHost);
        }

        room.locked = true;

        info!(room_id = %room_id, "Voting locked");

        Ok(LockResult::Locked)
    }

    #[instrument(skip(self))]
    async fn reset_room(&self, room_id: &str) -> Result<RestartResult, AppError> {
        let mut room = match self.rooms.get_mut(room_id) {
            Some(room) => room,
            None => {
                debug!(room_id = %room_id, "Room not found");
                return Ok(RestartResult::RoomNotFound);
            }
        };

        room.reset_round();

        info!(room_id = %room_id, "Room reset for a new round");

        Ok(RestartResult::Restarted)
    }
}
