//! Runner integration tests
//!
//! These tests drive full comparisons through the library API, using
//! archives built on the fly in temporary directories.

mod common;

use chrono::{Local, TimeZone};
use f5_config_compare::error::{ArchiveError, CompareError};
use f5_config_compare::runner::{ReportStatus, RunOptions, Runner, SilentProgress};
use f5_config_compare::BlockMode;
use std::fs;
use tempfile::TempDir;

use common::{CONFIG_A, CONFIG_B, EXPECTED_A_VS_B, results_files, snapshot, write_archive};

fn options(dir: &TempDir) -> RunOptions {
    RunOptions::default()
        .with_output_dir(dir.path())
        .with_scratch_root(dir.path().join("scratch"))
}

#[test]
fn test_identical_archives_produce_no_results_file() {
    let dir = TempDir::new().unwrap();
    let first = snapshot(dir.path(), "first.ucs", CONFIG_A);
    let second = snapshot(dir.path(), "second.ucs", CONFIG_A);

    let outcome = Runner::new(options(&dir), &SilentProgress)
        .run(&first, &second)
        .unwrap();

    assert!(outcome.diff.is_empty());
    assert_eq!(outcome.diff.servers_compared, 2);
    assert_eq!(outcome.report, ReportStatus::Identical);
    assert!(results_files(dir.path()).is_empty());
}

#[test]
fn test_discrepancies_are_written_in_order() {
    let dir = TempDir::new().unwrap();
    let first = snapshot(dir.path(), "first.ucs", CONFIG_A);
    let second = snapshot(dir.path(), "second.ucs", CONFIG_B);
    let timestamp = Local.with_ymd_and_hms(2024, 5, 14, 9, 7, 0).single().unwrap();

    let outcome = Runner::new(options(&dir), &SilentProgress)
        .run_at(&first, &second, &timestamp)
        .unwrap();

    let expected_path = dir.path().join("results-2024-05-14-09:07.txt");
    assert_eq!(outcome.report, ReportStatus::Written(expected_path.clone()));
    assert_eq!(outcome.first_config.to_str(), Some("config/bigip.conf"));
    assert_eq!(fs::read_to_string(expected_path).unwrap(), EXPECTED_A_VS_B);
}

#[test]
fn test_same_minute_collision_keeps_first_results() {
    let dir = TempDir::new().unwrap();
    let first = snapshot(dir.path(), "first.ucs", CONFIG_A);
    let second = snapshot(dir.path(), "second.ucs", CONFIG_B);
    let timestamp = Local.with_ymd_and_hms(2024, 5, 14, 9, 7, 0).single().unwrap();
    let runner = Runner::new(options(&dir), &SilentProgress);

    let initial = runner.run_at(&first, &second, &timestamp).unwrap();
    let ReportStatus::Written(path) = initial.report else {
        panic!("expected a results file, got {:?}", initial.report);
    };

    // Reversed inputs so that a silent overwrite would be visible.
    let repeat = runner.run_at(&second, &first, &timestamp).unwrap();
    assert_eq!(repeat.report, ReportStatus::Collision(path.clone()));
    assert_eq!(repeat.diff.len(), 3);

    assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED_A_VS_B);
    assert_eq!(results_files(dir.path()), vec![path]);
}

#[test]
fn test_configs_without_virtual_servers() {
    let dir = TempDir::new().unwrap();
    let first = snapshot(dir.path(), "first.ucs", "sys global-settings {\n    hostname a\n}\n");
    let second = snapshot(dir.path(), "second.ucs", "sys global-settings {\n    hostname b\n}\n");

    let outcome = Runner::new(options(&dir), &SilentProgress)
        .run(&first, &second)
        .unwrap();

    assert!(outcome.diff.is_empty());
    assert_eq!(outcome.report, ReportStatus::Identical);
    assert!(results_files(dir.path()).is_empty());
}

#[test]
fn test_scratch_directories_are_removed() {
    let dir = TempDir::new().unwrap();
    let first = snapshot(dir.path(), "first.ucs", CONFIG_A);
    let second = snapshot(dir.path(), "second.ucs", CONFIG_B);

    Runner::new(options(&dir), &SilentProgress)
        .run(&first, &second)
        .unwrap();

    assert_eq!(fs::read_dir(dir.path().join("scratch")).unwrap().count(), 0);
}

#[test]
fn test_plain_text_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("bigip.conf");
    fs::write(&first, CONFIG_A).unwrap();
    let second = snapshot(dir.path(), "second.ucs", CONFIG_B);

    let err = Runner::new(options(&dir), &SilentProgress)
        .run(&first, &second)
        .unwrap_err();

    assert!(matches!(err, CompareError::Archive(ArchiveError::InvalidArchive { .. })));
    assert!(results_files(dir.path()).is_empty());
    assert_eq!(fs::read_dir(dir.path().join("scratch")).unwrap().count(), 0);
}

#[test]
fn test_archive_without_config_file() {
    let dir = TempDir::new().unwrap();
    let first = snapshot(dir.path(), "first.ucs", CONFIG_A);
    let second = dir.path().join("second.qkview");
    write_archive(&second, &[("config/bigip_base.conf", "net vlan /Common/internal { }\n")]);

    let err = Runner::new(options(&dir), &SilentProgress)
        .run(&first, &second)
        .unwrap_err();

    assert!(matches!(err, CompareError::Archive(ArchiveError::ConfigNotFound { .. })));
    assert!(err.to_string().contains("bigip.conf"));
    assert_eq!(fs::read_dir(dir.path().join("scratch")).unwrap().count(), 0);
}

#[test]
fn test_nested_mode_sees_attributes_after_sub_blocks() {
    let dir = TempDir::new().unwrap();
    let before = "ltm virtual vs1 {\n    profiles {\n        /Common/tcp { }\n    }\n    pool p1\n}\n";
    let after = "ltm virtual vs1 {\n    profiles {\n        /Common/tcp { }\n    }\n    pool p2\n}\n";
    let first = snapshot(dir.path(), "first.ucs", before);
    let second = snapshot(dir.path(), "second.ucs", after);

    let compat = Runner::new(options(&dir), &SilentProgress)
        .run(&first, &second)
        .unwrap();
    assert!(compat.diff.is_empty());

    let nested = Runner::new(options(&dir).with_block_mode(BlockMode::Nested), &SilentProgress)
        .run(&first, &second)
        .unwrap();
    let lines: Vec<String> = nested.diff.discrepancies.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec!["Attribute 'pool' in virtual server 'vs1' differs: 'p1' vs 'p2'."]
    );

    if let ReportStatus::Written(path) = nested.report {
        fs::remove_file(path).unwrap();
    }
}
