//! End-to-end properties of the normalize pipeline: plan with the
//! walker, apply with the renamer, accumulate into the report.

use std::fs;
use std::path::Path;

use casefold_core::{NormalizeConfig, RunReport};
use casefold_ops::{apply_plan, RenameOutcome};
use casefold_walk::Walker;
use tempfile::TempDir;

/// Plan and apply one forward pass, the way the binary does.
fn normalize(config: &NormalizeConfig) -> RunReport {
    let mut report = RunReport::new();
    let walker = Walker::new(config.clone());
    let plans: Vec<_> = walker.plan().unwrap().collect();
    for plan in plans {
        match apply_plan(&plan) {
            RenameOutcome::Applied { destination, .. }
            | RenameOutcome::Conflicted { destination, .. } => {
                report.record_renamed(plan.source, destination);
            }
            RenameOutcome::Failed { reason } => {
                report.record_skipped(plan.source, reason);
            }
        }
    }
    report
}

fn names(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}

#[test]
fn test_single_file_scenario() {
    // Root contains Math/BigInt.hpp (1024 bytes) and nothing else.
    let tmp = TempDir::new().unwrap();
    let math = tmp.path().join("Math");
    fs::create_dir(&math).unwrap();
    let payload = vec![0xA5u8; 1024];
    fs::write(math.join("BigInt.hpp"), &payload).unwrap();

    let report = normalize(&NormalizeConfig::new(tmp.path()));

    assert_eq!(report.renamed.len(), 1);
    assert_eq!(report.skipped.len(), 0);
    assert_eq!(report.reverted.len(), 0);
    assert_eq!(names(&math), vec!["bigint.hpp"]);
    assert_eq!(fs::read(math.join("bigint.hpp")).unwrap(), payload);
}

#[test]
fn test_identical_duplicate_scenario() {
    // Math/bigint.hpp and Math/BigInt.hpp, byte-identical.
    let tmp = TempDir::new().unwrap();
    let math = tmp.path().join("Math");
    fs::create_dir(&math).unwrap();
    fs::write(math.join("bigint.hpp"), b"one body").unwrap();
    fs::write(math.join("BigInt.hpp"), b"one body").unwrap();

    let report = normalize(&NormalizeConfig::new(tmp.path()));

    assert_eq!(report.renamed.len(), 1);
    assert_eq!(names(&math), vec!["bigint.hpp"]);
}

#[test]
fn test_diverging_duplicate_keeps_every_byte_sequence() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Foo.hpp"), b"body A").unwrap();
    fs::write(tmp.path().join("foo.hpp"), b"body B!").unwrap();

    normalize(&NormalizeConfig::new(tmp.path()));

    assert_eq!(names(tmp.path()), vec!["foo.hpp", "foo_alt.hpp"]);
    let mut bodies = vec![
        fs::read(tmp.path().join("foo.hpp")).unwrap(),
        fs::read(tmp.path().join("foo_alt.hpp")).unwrap(),
    ];
    bodies.sort();
    assert_eq!(bodies, vec![b"body A".to_vec(), b"body B!".to_vec()]);
}

#[test]
fn test_second_pass_is_a_no_op() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();
    fs::write(tmp.path().join("Alpha.hpp"), b"a").unwrap();
    fs::write(tmp.path().join("sub/Beta.cpp"), b"b").unwrap();
    fs::write(tmp.path().join("gamma.hpp"), b"g").unwrap();

    let config = NormalizeConfig::new(tmp.path());
    let first = normalize(&config);
    assert_eq!(first.renamed.len(), 2);
    assert!(first.skipped.is_empty());

    // Idempotence: the second scan produces zero plans, hence zero
    // mutations.
    let walker = Walker::new(config.clone());
    assert_eq!(walker.plan().unwrap().count(), 0);

    let second = normalize(&config);
    assert!(second.is_empty());
}

#[test]
fn test_excluded_subtree_is_untouched() {
    let tmp = TempDir::new().unwrap();
    let lib = tmp.path().join("lib");
    fs::create_dir(&lib).unwrap();
    fs::write(lib.join("Vendor.hpp"), b"v").unwrap();
    fs::write(tmp.path().join("Mine.hpp"), b"m").unwrap();

    let config = NormalizeConfig::builder()
        .root(tmp.path())
        .exclude(vec![lib.clone()])
        .build()
        .unwrap();
    let report = normalize(&config);

    assert_eq!(report.renamed.len(), 1);
    assert_eq!(names(&lib), vec!["Vendor.hpp"]);
    assert!(tmp.path().join("mine.hpp").is_file());
}

#[test]
fn test_reverted_files_survive_the_forward_pass() {
    let tmp = TempDir::new().unwrap();
    let restored = tmp.path().join("restored");
    fs::create_dir(&restored).unwrap();
    fs::write(restored.join("bigint.hpp"), b"payload").unwrap();
    fs::write(tmp.path().join("Other.hpp"), b"other").unwrap();

    let config = NormalizeConfig::builder()
        .root(tmp.path())
        .revert(vec![restored.clone()])
        .build()
        .unwrap();
    let walker = Walker::new(config.clone());

    // Revert pass first, the way the binary runs it.
    let mut report = RunReport::new();
    for entry in walker.revert_candidates(&restored) {
        match casefold_ops::revert_entry(&entry) {
            casefold_ops::RevertOutcome::Reverted { destination, .. } => {
                report.record_reverted(entry.path, destination);
            }
            casefold_ops::RevertOutcome::NoCandidate => {
                report.record_skipped(entry.path, "no reversal candidate");
            }
        }
    }
    assert_eq!(report.reverted.len(), 1);

    // The forward pass then leaves the revert directory alone.
    let plans: Vec<_> = walker.plan().unwrap().collect();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].source, tmp.path().join("Other.hpp"));
    for plan in &plans {
        assert!(matches!(
            apply_plan(plan),
            RenameOutcome::Applied { .. }
        ));
    }

    // The reverted file keeps its reconstructed capitalization.
    assert_eq!(names(&restored), vec!["Bigint.HPP"]);
    assert_eq!(fs::read(restored.join("Bigint.HPP")).unwrap(), b"payload");
}

#[test]
fn test_failures_do_not_abort_the_run() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("One.hpp"), b"1").unwrap();
    fs::write(tmp.path().join("Two.hpp"), b"2").unwrap();

    let walker = Walker::new(NormalizeConfig::new(tmp.path()));
    let plans: Vec<_> = walker.plan().unwrap().collect();
    assert_eq!(plans.len(), 2);

    let mut report = RunReport::new();
    for plan in &plans {
        // Sabotage: delete each source before applying its plan, then
        // recreate it for the next iteration to prove the loop carries
        // on after a failure.
        fs::remove_file(&plan.source).unwrap();
        match apply_plan(plan) {
            RenameOutcome::Failed { reason } => {
                report.record_skipped(plan.source.clone(), reason)
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.renamed.len(), 0);
}
