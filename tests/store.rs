//! Integration tests for snapshot persistence.

use golf_match_play_web::{
    advance_round, start_tournament, submit_score, CreateTournamentRequest, HoleResult, IdPolicy,
    Registry, Roster, ScoreEntry, SnapshotStore, Teams, TournamentSelector,
};
use std::path::PathBuf;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("golf-store-{}", uuid::Uuid::new_v4()))
}

#[test]
fn save_and_load_round_trip_every_field() {
    let dir = temp_dir();
    let store = SnapshotStore::open(&dir).unwrap();

    let mut registry = Registry::default();
    let id = registry
        .create(CreateTournamentRequest {
            name: Some("Club Match".into()),
            total_rounds: 2,
            ..Default::default()
        })
        .unwrap()
        .id;
    let t = registry.resolve_mut(TournamentSelector::Id(id)).unwrap();
    t.set_teams(Teams {
        team_one: Roster::new("Blue", vec!["Ana".into()]),
        team_two: Roster::new("Red", vec!["Ben".into()]),
    })
    .unwrap();
    t.set_pairings(vec![("Ana".into(), "Ben".into())]).unwrap();
    t.set_novelty("longest_drive", vec!["Ben".into()]).unwrap();
    start_tournament(t).unwrap();
    let entry = ScoreEntry {
        match_id: None,
        hole: 1,
        player_a: "Ana".into(),
        strokes_a: 3,
        player_b: "Ben".into(),
        strokes_b: 4,
    };
    submit_score(t, &entry).unwrap();
    advance_round(t).unwrap();
    submit_score(t, &entry).unwrap();

    store.save(t).unwrap();
    let loaded = store.load(id).unwrap();
    assert_eq!(&loaded, &*t);

    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 1);
    let rebuilt = Registry::from_tournaments(IdPolicy::Sequential, all);
    assert_eq!(rebuilt.resolve(TournamentSelector::Latest).unwrap().id, id);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn load_all_ignores_unrelated_files() {
    let dir = temp_dir();
    let store = SnapshotStore::open(&dir).unwrap();
    std::fs::write(dir.join("notes.txt"), "not a tournament").unwrap();
    assert!(store.load_all().unwrap().is_empty());
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn partial_hole_entries_still_load() {
    let dir = temp_dir();
    let store = SnapshotStore::open(&dir).unwrap();
    let mut registry = Registry::default();
    let mut t = registry.create(CreateTournamentRequest::default()).unwrap().clone();
    t.holes.insert(1, HoleResult::new(1, "Ana", 4, "Ben", 5));
    store.save(&t).unwrap();

    // Drop a participant from the stored hole by hand.
    let path = dir.join(format!("tournament-{}.json", t.id));
    let mut json: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    json["holes"]["1"]
        .as_object_mut()
        .unwrap()
        .remove("player_b");
    std::fs::write(&path, serde_json::to_vec(&json).unwrap()).unwrap();

    let loaded = store.load(t.id).unwrap();
    assert!(!loaded.holes[&1].is_complete());
    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn missing_snapshot_is_an_error() {
    let dir = temp_dir();
    let store = SnapshotStore::open(&dir).unwrap();
    assert!(store.load(5).is_err());
    std::fs::remove_dir_all(dir).unwrap();
}
