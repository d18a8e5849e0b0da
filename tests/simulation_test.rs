//! Tests for automated two-client matches.

use quiz_four::{AppConfig, Phase, describe_violations, run_simulation};

fn config(toml: &str) -> AppConfig {
    AppConfig::from_toml(toml).unwrap()
}

#[tokio::test]
async fn test_seeded_match_finishes_with_valid_record() {
    let config = config("[simulation]\naccuracy = 0.8\nseed = 3\n");
    let report = run_simulation(&config).await.unwrap();

    assert!(report.is_finished());
    assert_eq!(report.final_state.phase(), Phase::GameOver);
    assert!(describe_violations(&report.final_state).is_ok());
    assert!(report.actions <= 500);
    if let Some(winner) = report.winner_id() {
        assert!(winner == "player-one" || winner == "player-two");
    }
}

#[tokio::test]
async fn test_perfect_players_on_small_board() {
    let config = config("board_rows = 4\nboard_cols = 4\n[simulation]\naccuracy = 1.0\nseed = 8\n");
    let report = run_simulation(&config).await.unwrap();
    assert!(report.is_finished());
    assert_eq!(report.final_state.board().rows(), 4);
    // Two writes per turn and at most 16 turns.
    assert!(report.actions <= 1 + 2 * 16);
}

#[tokio::test]
async fn test_hopeless_players_hit_the_action_cap() {
    let config = config("[simulation]\naccuracy = 0.0\nseed = 1\nmax_actions = 25\n");
    let report = run_simulation(&config).await.unwrap();

    assert!(!report.is_finished());
    assert_eq!(report.actions, 25);
    assert!(report.final_state.board().open_columns().len() == 7);
    assert!(describe_violations(&report.final_state).is_ok());
}
