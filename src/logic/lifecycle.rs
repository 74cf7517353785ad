//! Lifecycle transitions: start, round advancement, closure, and score submission.

use crate::logic::scoring::{head_to_head_status, match_status, MatchStatus};
use crate::models::{
    HoleResult, ScoreEntry, Teams, TeamPoints, Tournament, TournamentError, TournamentStatus,
};
use serde::Serialize;

/// What `start_tournament` did.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOutcome {
    Started,
    /// Already active; nothing changed.
    AlreadyActive,
}

/// What `advance_round` did.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum RoundOutcome {
    /// Moved on to `round`; the previous round's holes were cleared.
    Advanced { round: u32 },
    /// The last round finished and the tournament is now closed.
    Completed,
}

/// Start the tournament (Inactive -> Active). Starting an active tournament is a no-op.
pub fn start_tournament(tournament: &mut Tournament) -> Result<StartOutcome, TournamentError> {
    match tournament.status {
        TournamentStatus::Inactive => {
            tournament.status = TournamentStatus::Active;
            log::info!("Tournament {} started", tournament.id);
            Ok(StartOutcome::Started)
        }
        TournamentStatus::Active => Ok(StartOutcome::AlreadyActive),
        TournamentStatus::Closed => Err(TournamentError::InvalidState {
            action: "start",
            status: tournament.status,
        }),
    }
}

/// Finish the current round (Active only).
///
/// Round results are added to the team points first. Before the last round the round
/// counter moves on and per-round holes are cleared; on the last round the tournament
/// closes instead and its holes stay for display.
pub fn advance_round(tournament: &mut Tournament) -> Result<RoundOutcome, TournamentError> {
    if tournament.status != TournamentStatus::Active {
        return Err(TournamentError::InvalidState {
            action: "advance the round",
            status: tournament.status,
        });
    }

    award_round_points(tournament);

    if tournament.current_round >= tournament.total_rounds {
        tournament.status = TournamentStatus::Closed;
        log::info!(
            "Tournament {} completed after round {}",
            tournament.id,
            tournament.current_round
        );
        return Ok(RoundOutcome::Completed);
    }

    tournament.current_round += 1;
    tournament.holes.clear();
    for m in &mut tournament.pairings {
        m.holes.clear();
    }
    log::info!(
        "Tournament {} advanced to round {} of {}",
        tournament.id,
        tournament.current_round,
        tournament.total_rounds
    );
    Ok(RoundOutcome::Advanced {
        round: tournament.current_round,
    })
}

/// Close the tournament from Inactive or Active, regardless of rounds played.
pub fn end_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    tournament.ensure_open("end")?;
    tournament.status = TournamentStatus::Closed;
    log::info!("Tournament {} ended by organizer", tournament.id);
    Ok(())
}

/// Record a validated score (Active only) and return the updated status of that pairing.
///
/// A hole already recorded for the same context is replaced. With a `match_id`, the names
/// must be that match's participants. Without one, the status is the same one the
/// scoreboard reports, so holes against a third name give `NotEnoughData`.
pub fn submit_score(
    tournament: &mut Tournament,
    entry: &ScoreEntry,
) -> Result<MatchStatus, TournamentError> {
    if tournament.status != TournamentStatus::Active {
        return Err(TournamentError::InvalidState {
            action: "submit scores",
            status: tournament.status,
        });
    }

    let hole = HoleResult::new(
        entry.hole,
        entry.player_a.as_str(),
        entry.strokes_a,
        entry.player_b.as_str(),
        entry.strokes_b,
    );
    let status = match entry.match_id {
        Some(id) => {
            let m = tournament.get_match_mut(id)?;
            if !m.is_between(&entry.player_a, &entry.player_b) {
                return Err(TournamentError::InvalidInput(format!(
                    "match {} is between {} and {}",
                    id, m.player_a, m.player_b
                )));
            }
            m.holes.insert(entry.hole, hole);
            let complete = m.holes.values().filter(|h| h.is_complete());
            match_status(complete, &m.player_a, &m.player_b)
        }
        None => {
            tournament.holes.insert(entry.hole, hole);
            head_to_head_status(tournament.holes.values())
        }
    };
    log::debug!(
        "Tournament {}: hole {} recorded, {}",
        tournament.id,
        entry.hole,
        status
    );
    Ok(status)
}

/// Add one round's match outcomes to the team totals.
fn award_round_points(tournament: &mut Tournament) {
    let mut results = Vec::new();
    if let Some(h) = tournament.holes.values().find(|h| h.is_complete()) {
        let status = head_to_head_status(tournament.holes.values());
        results.push((status, h.player_a.clone(), h.player_b.clone()));
    }
    for m in &tournament.pairings {
        if m.holes.values().any(|h| h.is_complete()) {
            let complete = m.holes.values().filter(|h| h.is_complete());
            results.push((
                match_status(complete, &m.player_a, &m.player_b),
                m.player_a.clone(),
                m.player_b.clone(),
            ));
        }
    }
    for (status, a, b) in results {
        award(&tournament.teams, &mut tournament.team_points, &status, &a, &b);
    }
}

fn award(teams: &Teams, points: &mut TeamPoints, status: &MatchStatus, a: &str, b: &str) {
    match status {
        MatchStatus::Up { leader, .. } => {
            if let Some(team) = teams.team_of(leader) {
                points.award(team, 1.0);
            }
        }
        MatchStatus::AllSquare => {
            for name in [a, b] {
                if let Some(team) = teams.team_of(name) {
                    points.award(team, 0.5);
                }
            }
        }
        MatchStatus::NotEnoughData => {}
    }
}
