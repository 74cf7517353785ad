//! Golf match-play tournament tracker: library with models, scoring engine and persistence.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    advance_round, end_tournament, evaluate, head_to_head_status, match_status, parse_roster_csv,
    scoreboard, start_tournament, submit_score, HoleDetail, HoleOutcome, IdPolicy, MatchBoard, MatchStatus,
    Registry, RoundOutcome, Scoreboard, StartOutcome, TournamentSelector, NOT_ENOUGH_DATA,
};
pub use models::{
    CreateTournamentRequest, GameMatch, HoleResult, HoleWinner, MatchId, Roster, ScoreEntry,
    SubmitScoreRequest, Team, TeamPoints, Teams, Tournament, TournamentError, TournamentId,
    TournamentStatus, DEFAULT_FORMAT, HALVED,
};
pub use store::{SnapshotStore, StoreError};
