//! Tests for the global strategy setting.
//!
//! Note: Tests are run serially to avoid global config race conditions.

use prioseq::commands::MergeCommand;
use prioseq::config;
use prioseq::parse_records;
use prioseq::sweep::Strategy;
use prioseq::Interval;
use serial_test::serial;

/// Reset config to default state before each test
fn reset_config() {
    config::set_default_strategy(Strategy::Incremental);
}

#[test]
#[serial]
fn test_default_is_incremental() {
    reset_config();

    assert_eq!(config::default_strategy(), Strategy::Incremental);
    assert_eq!(MergeCommand::new().strategy, Strategy::Incremental);
    assert_eq!(MergeCommand::default().strategy, Strategy::Incremental);
}

#[test]
#[serial]
fn test_new_commands_pick_up_default() {
    reset_config();

    let before = MergeCommand::new();
    config::set_default_strategy(Strategy::Scan);
    let after = MergeCommand::new();

    // Existing commands keep the strategy they were created with
    assert_eq!(before.strategy, Strategy::Incremental);
    assert_eq!(after.strategy, Strategy::Scan);

    reset_config();
}

#[test]
#[serial]
fn test_explicit_strategy_overrides_default() {
    reset_config();
    config::set_default_strategy(Strategy::Scan);

    let cmd = MergeCommand::new().with_strategy(Strategy::Incremental);
    assert_eq!(cmd.strategy, Strategy::Incremental);

    reset_config();
}

#[test]
#[serial]
fn test_top_level_merge_same_under_both_defaults() {
    let input = [
        Interval::new(5, 25, 3),
        Interval::new(10, 20, 2),
        Interval::new(13, 17, 1),
    ];

    config::set_default_strategy(Strategy::Scan);
    let scan = prioseq::merge(&input);
    config::set_default_strategy(Strategy::Incremental);
    let incremental = prioseq::merge(&input);

    assert_eq!(scan, incremental);
    assert_eq!(scan.len(), 5);

    reset_config();
}

#[test]
#[serial]
fn test_run_reader_reports_strategy() {
    config::set_default_strategy(Strategy::Scan);

    let mut out = Vec::new();
    let stats = MergeCommand::new()
        .run_reader("a\t0\t10\t1\na\t5\t8\t0\n".as_bytes(), &mut out)
        .unwrap();

    assert_eq!(stats.strategy, Strategy::Scan);
    assert!(stats.to_string().starts_with("Strategy: scan"));

    let merged = parse_records(std::str::from_utf8(&out).unwrap()).unwrap();
    assert_eq!(merged.len(), 3);

    reset_config();
}
