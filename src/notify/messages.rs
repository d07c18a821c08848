use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Navigation instruction pushed to every client of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    /// Data changed, re-fetch and stay on the current view
    Refresh,
    /// Voting locked, navigate to the results view
    GotoResult,
    /// Round restarted, navigate back to the voting view
    GotoVote,
}

/// Wire format for server-to-client pushes: `{"action": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub action: Action,
}

impl Notice {
    pub fn new(action: Action) -> Self {
        Self { action }
    }

    /// Serialize to JSON text for transmission
    pub fn to_json(&self) -> String {
        // An enum-and-nothing-else struct cannot fail to serialize
        serde_json::to_string(self).unwrap()
    }
}
