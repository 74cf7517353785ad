//! Scoreboard view: per-hole detail and current match status for presentation.

use crate::logic::scoring::{head_to_head_status, match_status, MatchStatus};
use crate::models::{
    GameMatch, HoleResult, MatchId, TeamPoints, Tournament, TournamentId, TournamentStatus,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// One hole as shown on the board.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct HoleDetail {
    pub hole: u32,
    pub player_a: String,
    pub strokes_a: u32,
    pub player_b: String,
    pub strokes_b: u32,
    pub winner: String,
}

/// One pairing of the current round.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchBoard {
    pub match_id: MatchId,
    pub player_a: String,
    pub player_b: String,
    pub holes_played_count: usize,
    pub per_hole_detail: Vec<HoleDetail>,
    pub match_status: String,
}

/// Tournament scoreboard response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scoreboard {
    pub tournament_id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    pub current_round: u32,
    pub total_rounds: u32,
    pub holes_played_count: usize,
    pub per_hole_detail: Vec<HoleDetail>,
    pub match_status: String,
    pub matches: Vec<MatchBoard>,
    pub team_points: TeamPoints,
}

/// Build the scoreboard for a tournament. Incomplete stored holes are skipped, and
/// inconsistent participants degrade `match_status` instead of failing the request.
pub fn scoreboard(tournament: &Tournament) -> Scoreboard {
    let holes = complete_holes(tournament.id, &tournament.holes);
    let match_status = head_to_head_status(holes.iter().copied());
    if match_status == MatchStatus::NotEnoughData {
        log::warn!(
            "Tournament {}: holes reference other than two participants",
            tournament.id
        );
    }
    Scoreboard {
        tournament_id: tournament.id,
        name: tournament.name.clone(),
        status: tournament.status,
        current_round: tournament.current_round,
        total_rounds: tournament.total_rounds,
        holes_played_count: holes.len(),
        per_hole_detail: holes.iter().map(|h| detail(h)).collect(),
        match_status: match_status.to_string(),
        matches: tournament
            .pairings
            .iter()
            .map(|m| match_board(tournament.id, m))
            .collect(),
        team_points: tournament.team_points,
    }
}

fn match_board(tournament_id: TournamentId, m: &GameMatch) -> MatchBoard {
    let holes = complete_holes(tournament_id, &m.holes);
    MatchBoard {
        match_id: m.id,
        player_a: m.player_a.clone(),
        player_b: m.player_b.clone(),
        holes_played_count: holes.len(),
        per_hole_detail: holes.iter().map(|h| detail(h)).collect(),
        match_status: match_status(holes.iter().copied(), &m.player_a, &m.player_b).to_string(),
    }
}

/// Holes in ascending hole order, without entries missing a participant.
fn complete_holes(tournament_id: TournamentId, holes: &BTreeMap<u32, HoleResult>) -> Vec<&HoleResult> {
    holes
        .values()
        .filter(|h| {
            if !h.is_complete() {
                log::warn!(
                    "Tournament {}: skipping hole {} with a missing participant",
                    tournament_id,
                    h.hole
                );
            }
            h.is_complete()
        })
        .collect()
}

fn detail(h: &HoleResult) -> HoleDetail {
    let winner = crate::logic::evaluate(h.strokes_a, h.strokes_b, &h.player_a, &h.player_b).winner;
    HoleDetail {
        hole: h.hole,
        player_a: h.player_a.clone(),
        strokes_a: h.strokes_a,
        player_b: h.player_b.clone(),
        strokes_b: h.strokes_b,
        winner: winner.to_string(),
    }
}
