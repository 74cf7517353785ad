//! Tournament, TournamentStatus, and TournamentError.

use crate::models::game::{GameMatch, MatchId};
use crate::models::hole::{HoleResult, HALVED};
use crate::models::team::{Roster, TeamPoints, Teams};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, PartialEq)]
pub enum TournamentError {
    /// No tournament with this id.
    NotFound(TournamentId),
    /// The most recent tournament was requested but none exist.
    NoTournaments,
    /// No pairing with this id in the current round.
    MatchNotFound(MatchId),
    /// Tournament is not in a state that allows this action.
    InvalidState {
        action: &'static str,
        status: TournamentStatus,
    },
    /// Missing or malformed request field.
    InvalidInput(String),
    /// Random id policy ran out of 4-digit ids.
    IdSpaceExhausted,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotFound(id) => write!(f, "Tournament {} not found", id),
            TournamentError::NoTournaments => write!(f, "No tournaments have been created"),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::InvalidState { action, status } => {
                write!(f, "Cannot {} while tournament is {}", action, status)
            }
            TournamentError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            TournamentError::IdSpaceExhausted => write!(f, "No tournament ids left to assign"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Identifier for a tournament (sequential or random 4-digit, see `IdPolicy`).
pub type TournamentId = u32;

/// Format label used when none is given.
pub const DEFAULT_FORMAT: &str = "Ryder Cup";

/// Lifecycle status. `Closed` is terminal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Created, not yet accepting scores.
    #[default]
    Inactive,
    /// Accepting scores.
    Active,
    /// Finished; no further scores or rounds.
    Closed,
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TournamentStatus::Inactive => "inactive",
            TournamentStatus::Active => "active",
            TournamentStatus::Closed => "closed",
        };
        write!(f, "{}", s)
    }
}

/// Admin input for creating a tournament.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CreateTournamentRequest {
    /// Defaults to "Tournament <id>" when omitted.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_total_rounds")]
    pub total_rounds: u32,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_total_rounds() -> u32 {
    1
}

impl Default for CreateTournamentRequest {
    fn default() -> Self {
        Self {
            name: None,
            start_date: None,
            end_date: None,
            format: default_format(),
            total_rounds: default_total_rounds(),
        }
    }
}

impl CreateTournamentRequest {
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.total_rounds < 1 {
            return Err(TournamentError::InvalidInput(
                "total_rounds must be at least 1".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(TournamentError::InvalidInput(
                    "end_date is before start_date".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Full tournament state: settings, rosters, pairings, and the current round's holes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub format: String,
    pub total_rounds: u32,
    /// 1-based; never exceeds `total_rounds`.
    pub current_round: u32,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub teams: Teams,
    /// Current round's pairings, each with its own holes.
    #[serde(default)]
    pub pairings: Vec<GameMatch>,
    /// Novelty-hole lists by category, e.g. "closest_to_pin".
    #[serde(default)]
    pub novelty: BTreeMap<String, Vec<String>>,
    /// Tournament-level head-to-head holes for the current round.
    #[serde(default)]
    pub holes: BTreeMap<u32, HoleResult>,
    #[serde(default)]
    pub team_points: TeamPoints,
}

impl Tournament {
    /// Create a new inactive tournament in round 1. The request is assumed validated.
    pub fn new(id: TournamentId, request: CreateTournamentRequest) -> Self {
        let name = request
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Tournament {}", id));
        let format = if request.format.trim().is_empty() {
            default_format()
        } else {
            request.format.trim().to_string()
        };
        Self {
            id,
            name,
            start_date: request.start_date,
            end_date: request.end_date,
            format,
            total_rounds: request.total_rounds,
            current_round: 1,
            status: TournamentStatus::Inactive,
            created_at: Utc::now(),
            teams: Teams::default(),
            pairings: Vec::new(),
            novelty: BTreeMap::new(),
            holes: BTreeMap::new(),
            team_points: TeamPoints::default(),
        }
    }

    /// Fail with `InvalidState` once the tournament is closed.
    pub fn ensure_open(&self, action: &'static str) -> Result<(), TournamentError> {
        if self.status == TournamentStatus::Closed {
            return Err(TournamentError::InvalidState {
                action,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Mutable reference to a pairing of the current round.
    pub fn get_match_mut(&mut self, id: MatchId) -> Result<&mut GameMatch, TournamentError> {
        self.pairings
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(TournamentError::MatchNotFound(id))
    }

    /// Replace both rosters. Names are trimmed; a player may only be on one side.
    pub fn set_teams(&mut self, teams: Teams) -> Result<(), TournamentError> {
        self.ensure_open("change teams")?;
        let team_one = clean_roster(teams.team_one)?;
        let team_two = clean_roster(teams.team_two)?;
        if team_one.name.eq_ignore_ascii_case(&team_two.name) {
            return Err(TournamentError::InvalidInput(
                "teams must have different names".to_string(),
            ));
        }
        if let Some(p) = team_one
            .players
            .iter()
            .find(|p| team_two.players.iter().any(|q| q.eq_ignore_ascii_case(p)))
        {
            return Err(TournamentError::InvalidInput(format!(
                "{} is on both teams",
                p
            )));
        }
        self.teams = Teams { team_one, team_two };
        Ok(())
    }

    /// Replace the current round's pairings. Each becomes a fresh match with no holes.
    pub fn set_pairings(&mut self, pairings: Vec<(String, String)>) -> Result<(), TournamentError> {
        self.ensure_open("change pairings")?;
        let mut seen = HashSet::new();
        let mut matches = Vec::with_capacity(pairings.len());
        for (a, b) in pairings {
            let a = clean_name(&a, "pairing participant")?;
            let b = clean_name(&b, "pairing participant")?;
            if a == b {
                return Err(TournamentError::InvalidInput(format!(
                    "{} cannot be paired with themself",
                    a
                )));
            }
            for name in [&a, &b] {
                if !seen.insert(name.clone()) {
                    return Err(TournamentError::InvalidInput(format!(
                        "{} appears in more than one pairing",
                        name
                    )));
                }
            }
            matches.push(GameMatch::new(a, b));
        }
        self.pairings = matches;
        Ok(())
    }

    /// Replace one novelty-hole list (e.g. closest to pin).
    pub fn set_novelty(&mut self, category: &str, players: Vec<String>) -> Result<(), TournamentError> {
        self.ensure_open("change novelty holes")?;
        let category = clean_name(category, "novelty category")?;
        let players = players
            .iter()
            .map(|p| clean_name(p, "novelty player"))
            .collect::<Result<Vec<_>, _>>()?;
        self.novelty.insert(category, players);
        Ok(())
    }
}

fn clean_name(name: &str, what: &str) -> Result<String, TournamentError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::InvalidInput(format!("{} must not be blank", what)));
    }
    // Reserved: a player by this name could not be told apart from a halved hole.
    if trimmed.eq_ignore_ascii_case(HALVED) {
        return Err(TournamentError::InvalidInput(format!(
            "{} cannot be \"{}\"",
            what, HALVED
        )));
    }
    Ok(trimmed.to_string())
}

fn clean_roster(roster: Roster) -> Result<Roster, TournamentError> {
    let name = clean_name(&roster.name, "team name")?;
    let mut players: Vec<String> = Vec::with_capacity(roster.players.len());
    for p in &roster.players {
        let p = clean_name(p, "player name")?;
        if players.iter().any(|q| q.eq_ignore_ascii_case(&p)) {
            return Err(TournamentError::InvalidInput(format!(
                "{} is listed twice on {}",
                p, name
            )));
        }
        players.push(p);
    }
    Ok(Roster { name, players })
}
