//! Team rosters and aggregate team points.

use serde::{Deserialize, Serialize};

/// Which of the two sides a player belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    One,
    Two,
}

/// A named side and its ordered player list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub name: String,
    #[serde(default)]
    pub players: Vec<String>,
}

impl Roster {
    pub fn new(name: impl Into<String>, players: Vec<String>) -> Self {
        Self {
            name: name.into(),
            players,
        }
    }
}

/// The two rosters of a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Teams {
    pub team_one: Roster,
    pub team_two: Roster,
}

impl Default for Teams {
    fn default() -> Self {
        Self {
            team_one: Roster::new("Team One", Vec::new()),
            team_two: Roster::new("Team Two", Vec::new()),
        }
    }
}

impl Teams {
    /// Side of the named participant: a player on a roster, or the roster name itself.
    pub fn team_of(&self, name: &str) -> Option<Team> {
        let on = |r: &Roster| r.name == name || r.players.iter().any(|p| p == name);
        if on(&self.team_one) {
            Some(Team::One)
        } else if on(&self.team_two) {
            Some(Team::Two)
        } else {
            None
        }
    }
}

/// Season-to-date points per side (1 per match won, 0.5 each for All Square).
/// Not touched by the per-round reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamPoints {
    pub team_one: f64,
    pub team_two: f64,
}

impl TeamPoints {
    pub fn award(&mut self, team: Team, points: f64) {
        match team {
            Team::One => self.team_one += points,
            Team::Two => self.team_two += points,
        }
    }
}
