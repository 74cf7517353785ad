//! Integration tests for lifecycle transitions and score submission.

use golf_match_play_web::{
    advance_round, end_tournament, scoreboard, start_tournament, submit_score,
    CreateTournamentRequest, MatchStatus, RoundOutcome, ScoreEntry, StartOutcome, SubmitScoreRequest,
    Roster, Teams, Tournament, TournamentError, TournamentStatus,
};

fn tournament(total_rounds: u32) -> Tournament {
    Tournament::new(
        1,
        CreateTournamentRequest {
            total_rounds,
            ..Default::default()
        },
    )
}

fn active(total_rounds: u32) -> Tournament {
    let mut t = tournament(total_rounds);
    start_tournament(&mut t).unwrap();
    t
}

fn entry(hole: u32, a: u32, b: u32) -> ScoreEntry {
    ScoreEntry {
        match_id: None,
        hole,
        player_a: "Ana".into(),
        strokes_a: a,
        player_b: "Ben".into(),
        strokes_b: b,
    }
}

#[test]
fn start_is_idempotent() {
    let mut t = tournament(1);
    assert_eq!(start_tournament(&mut t), Ok(StartOutcome::Started));
    assert_eq!(start_tournament(&mut t), Ok(StartOutcome::AlreadyActive));
    assert_eq!(t.status, TournamentStatus::Active);
}

#[test]
fn closed_tournament_cannot_restart() {
    let mut t = tournament(1);
    end_tournament(&mut t).unwrap();
    assert!(matches!(
        start_tournament(&mut t),
        Err(TournamentError::InvalidState { .. })
    ));
    assert_eq!(t.status, TournamentStatus::Closed);
}

#[test]
fn advance_then_close_on_last_round() {
    let mut t = active(2);
    assert_eq!(advance_round(&mut t), Ok(RoundOutcome::Advanced { round: 2 }));
    assert_eq!(t.current_round, 2);
    assert_eq!(t.status, TournamentStatus::Active);

    assert_eq!(advance_round(&mut t), Ok(RoundOutcome::Completed));
    assert_eq!(t.current_round, 2);
    assert_eq!(t.status, TournamentStatus::Closed);

    assert!(matches!(
        advance_round(&mut t),
        Err(TournamentError::InvalidState { .. })
    ));
    assert_eq!(t.current_round, 2);
}

#[test]
fn advance_requires_active() {
    let mut t = tournament(3);
    assert!(matches!(
        advance_round(&mut t),
        Err(TournamentError::InvalidState { .. })
    ));
    assert_eq!(t.current_round, 1);
}

#[test]
fn inactive_tournament_rejects_scores() {
    let mut t = tournament(1);
    let err = submit_score(&mut t, &entry(1, 4, 5)).unwrap_err();
    assert!(matches!(err, TournamentError::InvalidState { .. }));
    assert!(t.holes.is_empty());
}

#[test]
fn ended_tournament_rejects_scores() {
    let mut t = active(1);
    end_tournament(&mut t).unwrap();
    assert!(matches!(
        submit_score(&mut t, &entry(1, 4, 5)),
        Err(TournamentError::InvalidState { .. })
    ));
    assert!(matches!(end_tournament(&mut t), Err(TournamentError::InvalidState { .. })));
}

#[test]
fn submit_returns_running_status() {
    let mut t = active(1);
    assert_eq!(
        submit_score(&mut t, &entry(1, 4, 5)).unwrap().to_string(),
        "Ana 1 Up"
    );
    assert_eq!(submit_score(&mut t, &entry(2, 5, 4)), Ok(MatchStatus::AllSquare));
}

#[test]
fn resubmitting_a_hole_replaces_it() {
    let mut t = active(1);
    submit_score(&mut t, &entry(1, 4, 5)).unwrap();
    submit_score(&mut t, &entry(2, 4, 5)).unwrap();
    submit_score(&mut t, &entry(3, 4, 5)).unwrap();
    let status = submit_score(&mut t, &entry(2, 6, 5)).unwrap();
    assert_eq!(status.to_string(), "Ana 1 Up");
    assert_eq!(scoreboard(&t).holes_played_count, 3);
    assert_eq!(t.holes[&2].strokes_a, 6);
}

#[test]
fn new_round_clears_holes_but_keeps_team_points() {
    let mut t = active(2);
    t.set_teams(Teams {
        team_one: Roster::new("Europe", vec!["Ana".into()]),
        team_two: Roster::new("USA", vec!["Ben".into()]),
    })
    .unwrap();
    submit_score(&mut t, &entry(1, 3, 4)).unwrap();
    advance_round(&mut t).unwrap();

    assert!(t.holes.is_empty());
    assert_eq!(t.team_points.team_one, 1.0);
    assert_eq!(t.team_points.team_two, 0.0);

    submit_score(&mut t, &entry(1, 4, 4)).unwrap();
    assert_eq!(advance_round(&mut t), Ok(RoundOutcome::Completed));
    assert_eq!(t.team_points.team_one, 1.5);
    assert_eq!(t.team_points.team_two, 0.5);
    // Final round's holes stay visible after closing.
    assert_eq!(t.holes.len(), 1);
}

#[test]
fn pairing_scores_go_to_their_match() {
    let mut t = active(1);
    t.set_pairings(vec![
        ("Ana".into(), "Ben".into()),
        ("Cal".into(), "Dee".into()),
    ])
    .unwrap();
    let match_id = t.pairings[1].id;
    let status = submit_score(
        &mut t,
        &ScoreEntry {
            match_id: Some(match_id),
            hole: 1,
            player_a: "Dee".into(),
            strokes_a: 3,
            player_b: "Cal".into(),
            strokes_b: 4,
        },
    )
    .unwrap();
    assert_eq!(status.to_string(), "Dee 1 Up");
    assert!(t.holes.is_empty());
    assert!(t.pairings[0].holes.is_empty());
    assert_eq!(t.pairings[1].holes.len(), 1);
}

#[test]
fn pairing_rejects_other_players() {
    let mut t = active(1);
    t.set_pairings(vec![("Cal".into(), "Dee".into())]).unwrap();
    let match_id = t.pairings[0].id;
    let err = submit_score(
        &mut t,
        &ScoreEntry {
            match_id: Some(match_id),
            ..entry(1, 3, 4)
        },
    )
    .unwrap_err();
    assert!(matches!(err, TournamentError::InvalidInput(_)));
    assert!(t.pairings[0].holes.is_empty());

    let unknown = uuid::Uuid::new_v4();
    assert_eq!(
        submit_score(
            &mut t,
            &ScoreEntry {
                match_id: Some(unknown),
                ..entry(1, 3, 4)
            }
        ),
        Err(TournamentError::MatchNotFound(unknown))
    );
}

#[test]
fn score_request_validation() {
    let ok = SubmitScoreRequest {
        match_id: None,
        hole: Some(3),
        player_a: Some(" Ana ".into()),
        strokes_a: Some(4),
        player_b: Some("Ben".into()),
        strokes_b: Some(0),
    };
    let entry = ok.validate().unwrap();
    assert_eq!(entry.player_a, "Ana");
    assert_eq!(entry.strokes_b, 0);

    let missing = SubmitScoreRequest {
        strokes_b: None,
        ..ok.clone()
    };
    assert!(matches!(missing.validate(), Err(TournamentError::InvalidInput(_))));

    let negative = SubmitScoreRequest {
        strokes_a: Some(-1),
        ..ok.clone()
    };
    assert!(matches!(negative.validate(), Err(TournamentError::InvalidInput(_))));

    let zero_hole = SubmitScoreRequest {
        hole: Some(0),
        ..ok.clone()
    };
    assert!(matches!(zero_hole.validate(), Err(TournamentError::InvalidInput(_))));

    let same_player = SubmitScoreRequest {
        player_b: Some("Ana".into()),
        ..ok
    };
    assert!(matches!(same_player.validate(), Err(TournamentError::InvalidInput(_))));
}

#[test]
fn organizer_changes_rejected_when_closed() {
    let mut t = tournament(1);
    end_tournament(&mut t).unwrap();
    assert!(matches!(
        t.set_pairings(vec![("Ana".into(), "Ben".into())]),
        Err(TournamentError::InvalidState { .. })
    ));
    assert!(matches!(
        t.set_novelty("longest_drive", vec!["Ana".into()]),
        Err(TournamentError::InvalidState { .. })
    ));
}

#[test]
fn teams_and_pairings_are_validated() {
    let mut t = tournament(1);
    let clash = Teams {
        team_one: Roster::new("Europe", vec!["Ana".into()]),
        team_two: Roster::new("USA", vec!["ana".into()]),
    };
    assert!(matches!(t.set_teams(clash), Err(TournamentError::InvalidInput(_))));
    assert_eq!(t.teams, Teams::default());

    assert!(matches!(
        t.set_pairings(vec![("Ana".into(), "Ana".into())]),
        Err(TournamentError::InvalidInput(_))
    ));
    assert!(matches!(
        t.set_pairings(vec![("Ana".into(), "Ben".into()), ("Ben".into(), "Cal".into())]),
        Err(TournamentError::InvalidInput(_))
    ));

    t.set_novelty(" closest_to_pin ", vec!["Ana".into(), " Ben".into()])
        .unwrap();
    assert_eq!(t.novelty["closest_to_pin"], vec!["Ana", "Ben"]);
}

#[test]
fn submit_status_agrees_with_scoreboard_for_mixed_names() {
    let mut t = active(1);
    let cal = ScoreEntry {
        player_b: "Cal".into(),
        ..entry(1, 3, 4)
    };
    submit_score(&mut t, &cal).unwrap();
    let status = submit_score(&mut t, &entry(2, 5, 4)).unwrap();
    assert_eq!(status, MatchStatus::NotEnoughData);
    assert_eq!(status.to_string(), scoreboard(&t).match_status);
}

#[test]
fn mixed_names_award_no_team_points() {
    let mut t = active(1);
    t.set_teams(Teams {
        team_one: Roster::new("Europe", vec!["Ana".into()]),
        team_two: Roster::new("USA", vec!["Ben".into(), "Cal".into()]),
    })
    .unwrap();
    let cal = ScoreEntry {
        player_b: "Cal".into(),
        ..entry(1, 3, 4)
    };
    submit_score(&mut t, &cal).unwrap();
    submit_score(&mut t, &entry(2, 3, 4)).unwrap();
    advance_round(&mut t).unwrap();
    assert_eq!(t.team_points.team_one, 0.0);
    assert_eq!(t.team_points.team_two, 0.0);
}

#[test]
fn halved_is_not_a_player_name() {
    let request = SubmitScoreRequest {
        match_id: None,
        hole: Some(1),
        player_a: Some("halved".into()),
        strokes_a: Some(3),
        player_b: Some("Ben".into()),
        strokes_b: Some(4),
    };
    assert!(matches!(request.validate(), Err(TournamentError::InvalidInput(_))));

    let mut t = tournament(1);
    assert!(matches!(
        t.set_pairings(vec![("Halved".into(), "Ben".into())]),
        Err(TournamentError::InvalidInput(_))
    ));
    let teams = Teams {
        team_one: Roster::new("Europe", vec!["Halved".into()]),
        team_two: Roster::new("USA", vec!["Ben".into()]),
    };
    assert!(matches!(t.set_teams(teams), Err(TournamentError::InvalidInput(_))));
    assert!(t.pairings.is_empty());
}
