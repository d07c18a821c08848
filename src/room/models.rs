use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Room codes are the first characters of a v4 UUID, uppercased
pub const ROOM_CODE_LEN: usize = 6;

/// A player's ballot for the current round; `None` means not voted yet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerVote {
    pub score: Option<i32>,
}

/// In-memory state for a single voting room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomModel {
    pub id: String,
    pub host_name: String,
    pub locked: bool,
    pub players: BTreeMap<String, PlayerVote>,
}

impl RoomModel {
    /// Creates a new unlocked room with a generated code and the host as the
    /// only player. The host is always part of the roster.
    pub fn new(host_name: String) -> Self {
        let room_id = uuid::Uuid::new_v4().simple().to_string()[..ROOM_CODE_LEN].to_uppercase();

        let mut players = BTreeMap::new();
        players.insert(host_name.clone(), PlayerVote::default());

        Self {
            id: room_id,
            host_name,
            locked: false,
            players,
        }
    }

    /// Get the current number of players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Check if a player is in this room (by display name)
    pub fn has_player(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    /// Check if a player is the room's host
    pub fn is_host(&self, name: &str) -> bool {
        self.host_name == name
    }

    /// Add a player with no score yet; keeps an existing entry untouched
    pub fn add_player(&mut self, name: &str) {
        self.players
            .entry(name.to_string())
            .or_insert_with(PlayerVote::default);
    }

    /// Record (or overwrite) a player's score; false if the player is unknown
    pub fn record_score(&mut self, name: &str, score: i32) -> bool {
        match self.players.get_mut(name) {
            Some(vote) => {
                vote.score = Some(score);
                true
            }
            None => false,
        }
    }

    /// Clear every score and reopen voting for the next round
    pub fn reset_round(&mut self) {
        for vote in self.players.values_mut() {
            vote.score = None;
        }
        self.locked = false;
    }

    /// Arithmetic mean of all present scores, rounded to 2 decimal places.
    /// `None` when nobody has voted yet.
    pub fn average(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .players
            .values()
            .filter_map(|vote| vote.score)
            .map(f64::from)
            .collect();

        if scores.is_empty() {
            return None;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Some((mean * 100.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_room_shape() {
        let room = RoomModel::new("alice".to_string());

        assert_eq!(room.id.len(), ROOM_CODE_LEN);
        assert_eq!(room.id, room.id.to_uppercase());
        assert!(!room.locked);
        assert_eq!(room.host_name, "alice");
        assert_eq!(room.player_count(), 1);
        assert!(room.has_player("alice"));
        assert!(room.players["alice"].score.is_none());
    }

    #[test]
    fn test_room_codes_are_unique() {
        let room1 = RoomModel::new("alice".to_string());
        let room2 = RoomModel::new("alice".to_string());

        assert_ne!(room1.id, room2.id);
    }

    #[test]
    fn test_add_player_keeps_existing_vote() {
        let mut room = RoomModel::new("alice".to_string());
        room.add_player("bob");
        assert!(room.record_score("bob", 8));

        // Re-adding must not wipe the recorded score
        room.add_player("bob");
        assert_eq!(room.players["bob"].score, Some(8));
        assert_eq!(room.player_count(), 2);
    }

    #[test]
    fn test_record_score_unknown_player() {
        let mut room = RoomModel::new("alice".to_string());

        assert!(!room.record_score("carol", 5));
        assert!(room.players["alice"].score.is_none());
    }

    #[test]
    fn test_record_score_overwrites() {
        let mut room = RoomModel::new("alice".to_string());

        assert!(room.record_score("alice", 3));
        assert!(room.record_score("alice", 13));
        assert_eq!(room.players["alice"].score, Some(13));
    }

    #[rstest]
    #[case(vec![], None)]
    #[case(vec![("alice", Some(7))], Some(7.0))]
    #[case(vec![("alice", Some(5)), ("bob", Some(7))], Some(6.0))]
    #[case(vec![("alice", Some(5)), ("bob", Some(7)), ("carol", None)], Some(6.0))]
    #[case(vec![("alice", Some(1)), ("bob", Some(2)), ("carol", Some(2))], Some(1.67))]
    #[case(vec![("alice", None), ("bob", None)], None)]
    fn test_average(#[case] votes: Vec<(&str, Option<i32>)>, #[case] expected: Option<f64>) {
        let mut room = RoomModel::new("host".to_string());
        room.players.clear();
        for (name, score) in votes {
            room.players.insert(name.to_string(), PlayerVote { score });
        }

        assert_eq!(room.average(), expected);
    }

    #[test]
    fn test_reset_round_clears_scores_and_unlocks() {
        let mut room = RoomModel::new("alice".to_string());
        room.add_player("bob");
        room.record_score("alice", 5);
        room.record_score("bob", 7);
        room.locked = true;

        room.reset_round();

        assert!(!room.locked);
        assert_eq!(room.player_count(), 2);
        assert!(room.players.values().all(|v| v.score.is_none()));
    }
}
