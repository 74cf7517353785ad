//! Tournament registry: owns all tournaments, assigns ids, and remembers the most recent one.

use crate::models::{CreateTournamentRequest, Tournament, TournamentError, TournamentId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Lowest and highest id handed out by `IdPolicy::Random`.
const RANDOM_ID_MIN: TournamentId = 1000;
const RANDOM_ID_MAX: TournamentId = 9999;

/// How new tournament ids are chosen. Fixed for the lifetime of a registry.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// 1, 2, 3, ...
    #[default]
    Sequential,
    /// Random 4-digit id, redrawn on collision.
    Random,
}

impl FromStr for IdPolicy {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(IdPolicy::Sequential),
            "random" => Ok(IdPolicy::Random),
            other => Err(TournamentError::InvalidInput(format!(
                "unknown id policy: {}",
                other
            ))),
        }
    }
}

/// Which tournament a request targets. `Latest` is the explicit "most recently created"
/// fallback; callers must ask for it by name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum TournamentSelector {
    Id(TournamentId),
    Latest,
}

impl FromStr for TournamentSelector {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("latest") {
            return Ok(TournamentSelector::Latest);
        }
        s.parse()
            .map(TournamentSelector::Id)
            .map_err(|_| TournamentError::InvalidInput(format!("bad tournament id: {}", s)))
    }
}

impl TryFrom<String> for TournamentSelector {
    type Error = TournamentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TournamentId> for TournamentSelector {
    fn from(id: TournamentId) -> Self {
        TournamentSelector::Id(id)
    }
}

/// All tournaments known to the process. Construct one at start-up and hand it to
/// request handlers; wrap it in a lock when shared.
#[derive(Debug)]
pub struct Registry {
    tournaments: HashMap<TournamentId, Tournament>,
    latest: Option<TournamentId>,
    next_sequence: TournamentId,
    policy: IdPolicy,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(IdPolicy::default())
    }
}

impl Registry {
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            tournaments: HashMap::new(),
            latest: None,
            next_sequence: 1,
            policy,
        }
    }

    /// Rebuild from stored tournaments. The most recent is the one created last.
    pub fn from_tournaments(policy: IdPolicy, tournaments: Vec<Tournament>) -> Self {
        let mut registry = Self::new(policy);
        registry.latest = tournaments
            .iter()
            .max_by_key(|t| (t.created_at, t.id))
            .map(|t| t.id);
        registry.next_sequence = tournaments.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        registry.tournaments = tournaments.into_iter().map(|t| (t.id, t)).collect();
        registry
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    /// Id of the most recently created tournament, if any.
    pub fn latest_id(&self) -> Option<TournamentId> {
        self.latest
    }

    /// Create an inactive tournament, assign it an id, and make it the latest.
    pub fn create(&mut self, request: CreateTournamentRequest) -> Result<&Tournament, TournamentError> {
        request.validate()?;
        let id = self.next_id()?;
        log::debug!("Assigned tournament id {} ({:?} policy)", id, self.policy);
        self.latest = Some(id);
        let tournament = self
            .tournaments
            .entry(id)
            .or_insert_with(|| Tournament::new(id, request));
        Ok(&*tournament)
    }

    /// Undo a `create` whose snapshot could not be written: drop the tournament and point
    /// `latest` back at `previous_latest`. The id sequence is not rewound.
    pub fn discard(&mut self, id: TournamentId, previous_latest: Option<TournamentId>) {
        if self.tournaments.remove(&id).is_some() && self.latest == Some(id) {
            self.latest = previous_latest;
        }
    }

    pub fn get(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    /// Look up a tournament by id or the explicit latest fallback.
    pub fn resolve(&self, selector: TournamentSelector) -> Result<&Tournament, TournamentError> {
        let id = self.selected_id(selector)?;
        self.tournaments.get(&id).ok_or(TournamentError::NotFound(id))
    }

    pub fn resolve_mut(&mut self, selector: TournamentSelector) -> Result<&mut Tournament, TournamentError> {
        let id = self.selected_id(selector)?;
        self.tournaments
            .get_mut(&id)
            .ok_or(TournamentError::NotFound(id))
    }

    /// All tournaments, newest first.
    pub fn list(&self) -> Vec<&Tournament> {
        let mut all: Vec<_> = self.tournaments.values().collect();
        all.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        all
    }

    fn selected_id(&self, selector: TournamentSelector) -> Result<TournamentId, TournamentError> {
        match selector {
            TournamentSelector::Id(id) => Ok(id),
            TournamentSelector::Latest => self.latest.ok_or(TournamentError::NoTournaments),
        }
    }

    fn next_id(&mut self) -> Result<TournamentId, TournamentError> {
        match self.policy {
            IdPolicy::Sequential => {
                let id = self.next_sequence;
                self.next_sequence += 1;
                Ok(id)
            }
            IdPolicy::Random => {
                let capacity = (RANDOM_ID_MAX - RANDOM_ID_MIN + 1) as usize;
                let in_range = self
                    .tournaments
                    .keys()
                    .filter(|id| (RANDOM_ID_MIN..=RANDOM_ID_MAX).contains(*id))
                    .count();
                if in_range >= capacity {
                    return Err(TournamentError::IdSpaceExhausted);
                }
                let mut rng = rand::thread_rng();
                loop {
                    let id = rng.gen_range(RANDOM_ID_MIN..=RANDOM_ID_MAX);
                    if !self.tournaments.contains_key(&id) {
                        return Ok(id);
                    }
                }
            }
        }
    }
}
