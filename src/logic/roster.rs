//! Roster import from CSV (`team,player` rows).

use crate::models::{Roster, Teams, TournamentError};
use serde::Deserialize;

#[derive(Deserialize)]
struct RosterRow {
    team: String,
    player: String,
}

/// Parse a two-team roster. Teams are taken in order of first appearance.
///
/// ```text
/// team,player
/// Europe,Rory
/// USA,Scottie
/// ```
pub fn parse_roster_csv(text: &str) -> Result<Teams, TournamentError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut rosters: Vec<Roster> = Vec::new();
    for (i, row) in reader.deserialize::<RosterRow>().enumerate() {
        let row = row.map_err(|e| {
            TournamentError::InvalidInput(format!("roster row {}: {}", i + 1, e))
        })?;
        if let Some(r) = rosters.iter_mut().find(|r| r.name == row.team) {
            r.players.push(row.player);
            continue;
        }
        if rosters.len() == 2 {
            return Err(TournamentError::InvalidInput(format!(
                "roster has more than two teams ({})",
                row.team
            )));
        }
        rosters.push(Roster::new(row.team, vec![row.player]));
    }
    let mut rosters = rosters.into_iter();
    match (rosters.next(), rosters.next()) {
        (Some(team_one), Some(team_two)) => Ok(Teams { team_one, team_two }),
        _ => Err(TournamentError::InvalidInput(
            "roster must list players for two teams".to_string(),
        )),
    }
}
