// Integration tests for the draft engine.
//
// These drive a full session through the library's public API: config on
// disk, pool CSV loading, snake turns, undo and queue-driven picks.

use std::fs;
use std::path::{Path, PathBuf};

use snakedraft_core::config::{load_config_with, ConfigOverrides};
use snakedraft_core::draft::command::CommandError;
use snakedraft_core::draft::session::{DraftSession, Outcome, SessionError, SessionStatus};
use snakedraft_core::pool::{PoolError, PoolIndex};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture_pool() -> PoolIndex {
    PoolIndex::load(&Path::new(FIXTURES).join("pool.csv")).expect("fixture pool should load")
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn session(coaches: &[&str], budget: u32, team_size: usize) -> DraftSession {
    DraftSession::new(&names(coaches), budget, team_size, fixture_pool()).unwrap()
}

fn drafted_name(outcome: Outcome) -> String {
    match outcome {
        Outcome::Drafted(receipt) => receipt.item.name,
        Outcome::AutoDrafted { receipt, .. } => receipt.item.name,
        other => panic!("expected a pick, got: {other:?}"),
    }
}

/// Scratch project directory containing `defaults/league.toml` and a pool.
fn scratch_project(name: &str, league_toml: &str) -> PathBuf {
    let root = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(root.join("defaults")).unwrap();
    fs::create_dir_all(root.join("data")).unwrap();
    fs::write(root.join("defaults/league.toml"), league_toml).unwrap();
    fs::copy(
        Path::new(FIXTURES).join("pool.csv"),
        root.join("data/pool.csv"),
    )
    .unwrap();
    root
}

const LEAGUE: &str = r#"
[league]
name = "Integration League"
coaches = ["Ash", "Misty", "Brock"]
budget = 110
team_size = 2

[data_paths]
pool = "data/pool.csv"
"#;

// ===========================================================================
// Pool fixture
// ===========================================================================

#[test]
fn fixture_pool_loads_every_row() {
    let pool = fixture_pool();
    assert_eq!(pool.len(), 9);

    let delta = pool.lookup("delta").unwrap();
    assert_eq!(delta.types, "bug/steel");
    assert_eq!(delta.strength, 500);
    assert_eq!(delta.cost, 15);
    assert_eq!(delta.tier, 'B');
    assert_eq!(delta.dex, Some(4));
}

#[test]
fn missing_pool_file_is_io_error() {
    let err = PoolIndex::load(Path::new("tests/fixtures/does_not_exist.csv")).unwrap_err();
    match &err {
        PoolError::Io { path, .. } => assert!(path.ends_with("does_not_exist.csv")),
        other => panic!("expected Io, got: {other}"),
    }
}

// ===========================================================================
// Config on disk -> session
// ===========================================================================

#[test]
fn config_and_pool_from_disk_start_a_session() {
    let root = scratch_project("snakedraft_it_from_disk", LEAGUE);

    let config = load_config_with(&root, &ConfigOverrides::default()).unwrap();
    assert!(root.join("config/league.toml").exists());
    assert_eq!(config.total_turns(), 6);

    let pool = PoolIndex::load(&config.pool_path()).unwrap();
    let s = DraftSession::from_config(&config, pool).unwrap();
    assert_eq!(
        s.order(),
        &["Ash", "Misty", "Brock", "Brock", "Misty", "Ash"]
    );
    assert_eq!(s.current_coach().unwrap().remaining(), 110);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn overrides_reshape_the_session() {
    let root = scratch_project("snakedraft_it_overrides", LEAGUE);

    let overrides = ConfigOverrides {
        coaches: Some(names(&["Red", "Blue"])),
        budget: Some(60),
        team_size: Some(3),
        pool: None,
    };
    let config = load_config_with(&root, &overrides).unwrap();
    let pool = PoolIndex::load(&config.pool_path()).unwrap();
    let s = DraftSession::from_config(&config, pool).unwrap();

    assert_eq!(s.order(), &["Red", "Blue", "Blue", "Red", "Red", "Blue"]);
    assert_eq!(s.coach("Red").unwrap().budget, 60);

    let _ = fs::remove_dir_all(&root);
}

// ===========================================================================
// Full draft
// ===========================================================================

#[test]
fn full_three_coach_draft_reaches_completion() {
    let mut s = session(&["Ash", "Misty", "Brock"], 110, 2);

    let picks = ["Alpha", "Golf", "Bravo", "Charlie", "Delta", "Echo"];
    let mut made = Vec::new();
    for name in picks {
        made.push(drafted_name(s.apply(name).unwrap()));
    }
    assert_eq!(made, picks);
    assert_eq!(s.status(), SessionStatus::Complete);

    let summary = s.summary();
    let spent: Vec<(&str, u32)> = summary
        .iter()
        .map(|t| (t.name.as_str(), t.spent))
        .collect();
    // Ash: Alpha + Echo, Misty: Golf + Delta, Brock: Bravo + Charlie.
    assert_eq!(spent, vec![("Ash", 65), ("Misty", 65), ("Brock", 50)]);
    for team in &summary {
        assert_eq!(team.picks.len(), 2);
        assert_eq!(team.remaining, team.budget - team.spent);
    }

    // Every pool item drafted exactly once.
    let mut all: Vec<String> = summary
        .iter()
        .flat_map(|t| t.picks.iter().map(|p| p.name.clone()))
        .collect();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 6);
}

#[test]
fn completed_draft_still_answers_queries() {
    let mut s = session(&["A", "B"], 110, 1);
    s.apply("Hotel").unwrap();
    s.apply("Foxtrot").unwrap();
    assert!(s.is_complete());

    assert!(matches!(s.apply("budgets"), Ok(Outcome::Budgets(_))));
    assert!(matches!(s.apply("top 2"), Ok(Outcome::Listing(_))));
    assert_eq!(
        s.apply("Echo"),
        Err(SessionError::Command(CommandError::DraftComplete))
    );
    assert_eq!(
        s.apply("auto"),
        Err(SessionError::Command(CommandError::DraftComplete))
    );
}

#[test]
fn repeated_undo_unwinds_to_the_start() {
    let mut s = session(&["A", "B", "C"], 110, 2);
    for name in ["Alpha", "Bravo", "Charlie", "Delta"] {
        s.apply(name).unwrap();
    }

    for expected_turn in (1..=4).rev() {
        match s.apply("undo").unwrap() {
            Outcome::Undone { turn, .. } => assert_eq!(turn, expected_turn),
            other => panic!("expected Undone, got: {other:?}"),
        }
    }

    assert_eq!(s.cursor(), 0);
    assert_eq!(s.drafted_count(), 0);
    assert!(s.history().is_empty());
    for team in s.summary() {
        assert_eq!(team.spent, 0);
    }
    assert_eq!(
        s.apply("undo"),
        Err(SessionError::Command(CommandError::NothingToUndo))
    );
}

#[test]
fn budget_runs_out_mid_draft() {
    let mut s = session(&["A", "B"], 60, 2);
    s.apply("Alpha").unwrap(); // A: 10 left
    s.apply("Hotel").unwrap(); // B: 56 left
    s.apply("Golf").unwrap(); // B: 6 left

    // A's second turn: only Foxtrot (5) is affordable.
    assert_eq!(
        s.apply("Bravo"),
        Err(SessionError::Command(CommandError::InsufficientBudget {
            cost: 30,
            remaining: 10
        }))
    );
    assert_eq!(drafted_name(s.apply("foxtrot").unwrap()), "Foxtrot");
    assert!(s.is_complete());
}

#[test]
fn tier_listing_tracks_availability() {
    let mut s = session(&["A", "B"], 110, 2);

    let tier_s = |s: &mut DraftSession| match s.apply("list S").unwrap() {
        Outcome::Listing(items) => items.into_iter().map(|p| p.name).collect::<Vec<_>>(),
        other => panic!("expected Listing, got: {other:?}"),
    };

    // Golf and Alpha tie on cost; Golf has the higher strength.
    assert_eq!(tier_s(&mut s), vec!["Titan", "Golf", "Alpha", "Bravo"]);
    s.apply("golf").unwrap();
    assert_eq!(tier_s(&mut s), vec!["Titan", "Alpha", "Bravo"]);
    s.apply("undo").unwrap();
    assert_eq!(tier_s(&mut s), vec!["Titan", "Golf", "Alpha", "Bravo"]);
}

#[test]
fn queue_driven_draft() {
    let mut s = session(&["A", "B"], 110, 2);

    s.apply("queue add Titan").unwrap();
    s.apply("queue add Alpha").unwrap();
    s.apply("queue add Echo").unwrap();
    s.apply("Bravo").unwrap(); // A drafts by hand; queue is untouched.

    s.apply("queue add alpha").unwrap(); // B wants Alpha too
    match s.apply("auto").unwrap() {
        Outcome::AutoDrafted { receipt, skipped } => {
            assert_eq!(receipt.coach, "B");
            assert_eq!(receipt.item.name, "Alpha");
            assert!(skipped.is_empty());
        }
        other => panic!("expected AutoDrafted, got: {other:?}"),
    }
    s.apply("Delta").unwrap();

    // Back to A: Titan is unaffordable and Alpha is gone, so Echo is taken.
    match s.apply("auto").unwrap() {
        Outcome::AutoDrafted { receipt, skipped } => {
            assert_eq!(receipt.coach, "A");
            assert_eq!(receipt.item.name, "Echo");
            assert_eq!(skipped, names(&["titan", "alpha"]));
        }
        other => panic!("expected AutoDrafted, got: {other:?}"),
    }
    assert!(s.is_complete());
    assert!(s.queue("A").is_empty());
}
