//! Tournament engine: scoring, scoreboard, lifecycle, registry, roster import.

mod lifecycle;
mod registry;
mod roster;
mod scoreboard;
mod scoring;

pub use lifecycle::{
    advance_round, end_tournament, start_tournament, submit_score, RoundOutcome, StartOutcome,
};
pub use registry::{IdPolicy, Registry, TournamentSelector};
pub use roster::parse_roster_csv;
pub use scoreboard::{scoreboard, HoleDetail, MatchBoard, Scoreboard};
pub use scoring::{
    evaluate, head_to_head_status, match_status, participants, HoleOutcome, MatchStatus,
    Participants, NOT_ENOUGH_DATA,
};
