//! HoleResult, HoleWinner, and the score submission record.

use crate::logic::evaluate;
use crate::models::game::MatchId;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker reported for a hole tied on strokes.
pub const HALVED: &str = "Halved";

/// Who took a hole: one participant by name, or nobody (halved).
///
/// Serialized as a plain string so a scoreboard reads `"Alice"` or `"Halved"`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HoleWinner {
    Player(String),
    #[default]
    Halved,
}

impl HoleWinner {
    /// True when `name` won the hole outright.
    pub fn is_player(&self, name: &str) -> bool {
        matches!(self, HoleWinner::Player(p) if p == name)
    }
}

impl From<String> for HoleWinner {
    fn from(s: String) -> Self {
        if s == HALVED {
            HoleWinner::Halved
        } else {
            HoleWinner::Player(s)
        }
    }
}

impl From<HoleWinner> for String {
    fn from(w: HoleWinner) -> Self {
        match w {
            HoleWinner::Player(name) => name,
            HoleWinner::Halved => HALVED.to_string(),
        }
    }
}

impl fmt::Display for HoleWinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoleWinner::Player(name) => write!(f, "{}", name),
            HoleWinner::Halved => write!(f, "{}", HALVED),
        }
    }
}

/// One recorded hole between two participants.
///
/// Participant names default to empty when loaded from a snapshot that lacks them;
/// such entries are kept in storage but skipped by the scoreboard.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HoleResult {
    pub hole: u32,
    #[serde(default)]
    pub player_a: String,
    #[serde(default)]
    pub strokes_a: u32,
    #[serde(default)]
    pub player_b: String,
    #[serde(default)]
    pub strokes_b: u32,
    #[serde(default)]
    pub winner: HoleWinner,
}

impl HoleResult {
    /// Record a hole; the winner is derived from the stroke counts.
    pub fn new(
        hole: u32,
        player_a: impl Into<String>,
        strokes_a: u32,
        player_b: impl Into<String>,
        strokes_b: u32,
    ) -> Self {
        let player_a = player_a.into();
        let player_b = player_b.into();
        let winner = evaluate(strokes_a, strokes_b, &player_a, &player_b).winner;
        Self {
            hole,
            player_a,
            strokes_a,
            player_b,
            strokes_b,
            winner,
        }
    }

    /// Both participants present (stored data may be partial).
    pub fn is_complete(&self) -> bool {
        !self.player_a.trim().is_empty() && !self.player_b.trim().is_empty()
    }
}

/// Raw score submission as it arrives from a client. Every field is optional here so
/// missing ones can be reported as `InvalidInput` instead of a parse failure.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SubmitScoreRequest {
    /// Target a specific pairing; omitted for the tournament-level head-to-head.
    #[serde(default)]
    pub match_id: Option<MatchId>,
    pub hole: Option<i64>,
    pub player_a: Option<String>,
    pub strokes_a: Option<i64>,
    pub player_b: Option<String>,
    pub strokes_b: Option<i64>,
}

/// A score submission that passed boundary validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoreEntry {
    pub match_id: Option<MatchId>,
    pub hole: u32,
    pub player_a: String,
    pub strokes_a: u32,
    pub player_b: String,
    pub strokes_b: u32,
}

impl SubmitScoreRequest {
    /// Check required fields, hole number and stroke counts before anything touches the engine.
    pub fn validate(&self) -> Result<ScoreEntry, TournamentError> {
        let hole = required(self.hole, "hole")?;
        if hole < 1 || hole > i64::from(u32::MAX) {
            return Err(TournamentError::InvalidInput(format!(
                "hole must be a positive integer (got {})",
                hole
            )));
        }
        let player_a = required_name(self.player_a.as_deref(), "player_a")?;
        let player_b = required_name(self.player_b.as_deref(), "player_b")?;
        if player_a == player_b {
            return Err(TournamentError::InvalidInput(
                "player_a and player_b must be different".to_string(),
            ));
        }
        Ok(ScoreEntry {
            match_id: self.match_id,
            hole: hole as u32,
            player_a,
            strokes_a: strokes(self.strokes_a, "strokes_a")?,
            player_b,
            strokes_b: strokes(self.strokes_b, "strokes_b")?,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, TournamentError> {
    value.ok_or_else(|| TournamentError::InvalidInput(format!("missing field: {}", field)))
}

fn required_name(value: Option<&str>, field: &str) -> Result<String, TournamentError> {
    let name = required(value, field)?.trim();
    if name.is_empty() {
        return Err(TournamentError::InvalidInput(format!("{} must not be blank", field)));
    }
    if name.eq_ignore_ascii_case(HALVED) {
        return Err(TournamentError::InvalidInput(format!(
            "{} cannot be \"{}\"",
            field, HALVED
        )));
    }
    Ok(name.to_string())
}

fn strokes(value: Option<i64>, field: &str) -> Result<u32, TournamentError> {
    let n = required(value, field)?;
    u32::try_from(n).map_err(|_| {
        TournamentError::InvalidInput(format!("{} must be a non-negative stroke count (got {})", field, n))
    })
}
