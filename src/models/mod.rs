//! Data structures for the golf tournament: tournaments, rosters, pairings, holes.

mod game;
mod hole;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId};
pub use hole::{HoleResult, HoleWinner, ScoreEntry, SubmitScoreRequest, HALVED};
pub use team::{Roster, Team, TeamPoints, Teams};
pub use tournament::{
    CreateTournamentRequest, Tournament, TournamentError, TournamentId, TournamentStatus,
    DEFAULT_FORMAT,
};
