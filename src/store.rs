//! Snapshot persistence: one JSON file per tournament, rewritten whole on every change.

use crate::models::{Tournament, TournamentId};
use std::fs;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "tournament-";
const FILE_SUFFIX: &str = ".json";

/// Errors reading or writing snapshots.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "snapshot I/O failed: {}", e),
            StoreError::Json(e) => write!(f, "snapshot is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Directory of tournament snapshots.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Open (creating if needed) a snapshot directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: TournamentId) -> PathBuf {
        self.dir.join(format!("{}{}{}", FILE_PREFIX, id, FILE_SUFFIX))
    }

    /// Write the whole tournament. Goes through a temp file so a crash never leaves half a snapshot.
    pub fn save(&self, tournament: &Tournament) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(tournament)?;
        let path = self.path_for(tournament.id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn load(&self, id: TournamentId) -> Result<Tournament, StoreError> {
        let bytes = fs::read(self.path_for(id))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Load every snapshot in the directory, ordered by id.
    pub fn load_all(&self) -> Result<Vec<Tournament>, StoreError> {
        let mut tournaments = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_snapshot = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(FILE_PREFIX) && n.ends_with(FILE_SUFFIX))
                .unwrap_or(false);
            if !is_snapshot {
                continue;
            }
            let bytes = fs::read(&path)?;
            tournaments.push(serde_json::from_slice::<Tournament>(&bytes)?);
        }
        tournaments.sort_by_key(|t| t.id);
        log::info!(
            "Loaded {} tournament snapshot(s) from {}",
            tournaments.len(),
            self.dir.display()
        );
        Ok(tournaments)
    }
}
