//! GameMatch: one head-to-head pairing and its holes for the current round.

use crate::models::hole::HoleResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// A pairing of two participants (players or team names) within a round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub player_a: String,
    pub player_b: String,
    /// Keyed by hole number; a re-submitted hole replaces the earlier entry.
    #[serde(default)]
    pub holes: BTreeMap<u32, HoleResult>,
}

impl GameMatch {
    pub fn new(player_a: impl Into<String>, player_b: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_a: player_a.into(),
            player_b: player_b.into(),
            holes: BTreeMap::new(),
        }
    }

    /// True when the two names are this match's participants, in either order.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.player_a == a && self.player_b == b) || (self.player_a == b && self.player_b == a)
    }
}
