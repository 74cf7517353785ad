//! Match-play scoring: per-hole winners and cumulative match status.

use crate::models::{HoleResult, HoleWinner};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Result of comparing two stroke counts on one hole.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HoleOutcome {
    pub winner: HoleWinner,
    /// `score_a` compared to `score_b`; `Less` means A took the hole.
    pub comparison: Ordering,
}

/// Decide a hole: fewer strokes wins, equal strokes halve.
pub fn evaluate(score_a: u32, score_b: u32, name_a: &str, name_b: &str) -> HoleOutcome {
    let comparison = score_a.cmp(&score_b);
    let winner = match comparison {
        Ordering::Less => HoleWinner::Player(name_a.to_string()),
        Ordering::Greater => HoleWinner::Player(name_b.to_string()),
        Ordering::Equal => HoleWinner::Halved,
    };
    HoleOutcome { winner, comparison }
}

/// Reported when the holes do not describe a single pair of participants.
pub const NOT_ENOUGH_DATA: &str = "Not enough data";

/// Cumulative match-play status, e.g. "All Square" or "Alice 2 Up".
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(into = "String")]
pub enum MatchStatus {
    AllSquare,
    Up { leader: String, holes: u32 },
    /// The holes mix more than one pairing.
    NotEnoughData,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::AllSquare => write!(f, "All Square"),
            MatchStatus::Up { leader, holes } => write!(f, "{} {} Up", leader, holes),
            MatchStatus::NotEnoughData => write!(f, "{}", NOT_ENOUGH_DATA),
        }
    }
}

impl From<MatchStatus> for String {
    fn from(s: MatchStatus) -> Self {
        s.to_string()
    }
}

/// Fold the holes of pair (a, b) into a status. Only win counts matter, so hole order
/// is irrelevant. Every recorded hole counts: a match is never closed out early.
pub fn match_status<'a, I>(results: I, a: &str, b: &str) -> MatchStatus
where
    I: IntoIterator<Item = &'a HoleResult>,
{
    let (mut wins_a, mut wins_b) = (0u32, 0u32);
    for r in results {
        let winner = evaluate(r.strokes_a, r.strokes_b, &r.player_a, &r.player_b).winner;
        if winner.is_player(a) {
            wins_a += 1;
        } else if winner.is_player(b) {
            wins_b += 1;
        }
    }
    match wins_a.cmp(&wins_b) {
        Ordering::Equal => MatchStatus::AllSquare,
        Ordering::Greater => MatchStatus::Up {
            leader: a.to_string(),
            holes: wins_a - wins_b,
        },
        Ordering::Less => MatchStatus::Up {
            leader: b.to_string(),
            holes: wins_b - wins_a,
        },
    }
}

/// Distinct participant names seen across a set of holes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Participants {
    /// No complete holes yet.
    None,
    /// Exactly two names, in order of first appearance.
    Pair(String, String),
    /// One name or more than two: not a single head-to-head.
    Inconsistent,
}

/// Collect participant names from complete holes (incomplete ones are ignored).
pub fn participants<'a, I>(results: I) -> Participants
where
    I: IntoIterator<Item = &'a HoleResult>,
{
    let mut names: Vec<&str> = Vec::new();
    for r in results.into_iter().filter(|r| r.is_complete()) {
        for name in [r.player_a.as_str(), r.player_b.as_str()] {
            if !names.contains(&name) {
                names.push(name);
                if names.len() > 2 {
                    return Participants::Inconsistent;
                }
            }
        }
    }
    match names.as_slice() {
        [] => Participants::None,
        [a, b] => Participants::Pair(a.to_string(), b.to_string()),
        _ => Participants::Inconsistent,
    }
}

/// Status of a hole set whose pair is not known up front: the pair is taken from the
/// complete holes, and anything other than exactly two names is `NotEnoughData`.
pub fn head_to_head_status<'a, I>(results: I) -> MatchStatus
where
    I: IntoIterator<Item = &'a HoleResult>,
    I::IntoIter: Clone,
{
    let results = results.into_iter().filter(|r| r.is_complete());
    match participants(results.clone()) {
        Participants::None => MatchStatus::AllSquare,
        Participants::Pair(a, b) => match_status(results, &a, &b),
        Participants::Inconsistent => MatchStatus::NotEnoughData,
    }
}
