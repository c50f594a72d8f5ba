//! End-to-end tests: files on disk through scoring.

use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use super::*;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "test.cluster", "A: 1 2 3 4 5\nB: 1 2 4 5 6 7\nC: 7\n");

    let data = Clustering::load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(data.len(), 3);
    assert!(data.clusters()[0].label().is_some());
    assert!(data.clusters()[0].has_label());
    assert_eq!(data.items().len(), 7);
}

#[test]
fn test_load_clean() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "clean.cluster", ":A B C\n:D E F A\n");

    let data = Clustering::load(&path, &LoadOptions::clean()).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data.clusters()[1].len(), 3);
}

#[test]
fn test_load_without_clean_keeps_shared_items() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "shared.cluster", ":A B C\n:D E F A\n");

    let data = Clustering::load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data.clusters()[1].len(), 4);
    assert_eq!(data.items().len(), 6);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.cluster");

    let err = Clustering::load(&path, &LoadOptions::default()).unwrap_err();
    match err {
        ClustervalError::FileNotFound(p) => assert_eq!(p, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_score_files() {
    let dir = tempfile::tempdir().unwrap();
    let gold = write(&dir, "gold.cluster", ":1 2 3\n:4 5 6\n");
    let candidate = write(&dir, "candidate.cluster", ":1 2\n:3 5 6\n:4\n");

    let a = Clustering::load(&gold, &LoadOptions::default()).unwrap();
    let b = Clustering::load(&candidate, &LoadOptions::default()).unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 3);

    assert_eq!(score::f_score(&a, &b), b.f_score(&a));
    assert!((score::f_single(&a.clusters()[0], &b) - 4.0 / 5.0).abs() < 1e-12);
    assert!((score::f_single(&a.clusters()[1], &b) - 2.0 / 3.0).abs() < 1e-12);
    assert!((score::f_score(&a, &b) - 11.0 / 15.0).abs() < 1e-4);
}

#[test]
fn test_text_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let original = Clustering::from_text("A: 1 2 3 4 5\nB: 1 2 4 5 6 7\nC: 7", false);
    let path = dir.path().join("out.cluster");

    original.save(&path).unwrap();
    let loaded = Clustering::load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(loaded.len(), original.len());
    assert_eq!(loaded.items().len(), original.items().len());
    assert_eq!(loaded.to_text(), original.to_text());
}

#[test]
fn test_persisted_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut original = Clustering::from_text("A: x y z\n: p q", false);
    original.add(Cluster::new(["r"], None));

    for name in ["out.yaml", "out.yml", "out.json"] {
        let path = dir.path().join(name);
        original.save(&path).unwrap();
        let loaded = Clustering::load(&path, &LoadOptions::default()).unwrap();
        assert_eq!(loaded, original, "{name}");
    }
}

#[test]
fn test_format_override() {
    let dir = tempfile::tempdir().unwrap();
    let original = Clustering::from_text("A: 1 2\nB: 3", false);
    let path = dir.path().join("clusters.dat");
    original.save_as(&path, Format::Json).unwrap();

    let opts = LoadOptions::default().with_format(Format::Json);
    let loaded = Clustering::load(&path, &opts).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_load_yaml_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "gold.yaml", "animals: [cat, dog, cow]\nplants: [fern, oak]\n");

    let gold = Clustering::load(&path, &LoadOptions::default()).unwrap();
    assert_eq!(gold.len(), 2);
    assert_eq!(gold.items().len(), 5);

    let candidate = Clustering::from_text(":cat dog\n:cow fern oak", false);
    let eval = evaluate(&gold, &candidate);
    assert_eq!(eval.missing, 0);
    assert!(eval.f_score > 0.0 && eval.f_score < 1.0);
}

#[test]
fn test_load_bad_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "bad.yaml", "- just\n- a list\n");

    let err = Clustering::load(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, ClustervalError::Yaml(_)), "got {err:?}");
}

#[test]
fn test_reflexive_score() {
    let x = Clustering::from_text("a: 1 2 3\nb: 4 5\nc: 6 7 8 9\nd: 10", true);
    assert!((x.f_score(&x) - 1.0).abs() < 1e-6);

    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..10 {
        let t = x.randomize(None, &mut rng).unwrap();
        let s = score::f_score(&t, &t);
        assert!((s - 1.0).abs() < 1e-6, "got {s}");
    }
}

#[test]
fn test_candidate_not_mutated() {
    let gold = Clustering::from_text(":1 2 3\n:4 5 6", false);
    let candidate = Clustering::from_text(":1 2\n:3", false);
    let before = candidate.clone();

    let eval = evaluate(&gold, &candidate);
    assert_eq!(eval.missing, 3);
    assert_eq!(eval.reconciled.len(), 3);
    assert_eq!(
        eval.reconciled.clusters()[2].label(),
        Some(score::MISSING_LABEL)
    );
    assert_eq!(candidate, before);
}

#[test]
fn test_random_baseline_below_perfect() {
    let gold = Clustering::from_text("a: 1 2 3 4 5\nb: 6 7 8 9 10", false);
    let baseline = random_baseline(&gold, &gold, 20, &mut StdRng::seed_from_u64(5)).unwrap();
    assert!(baseline.mean < 1.0, "{baseline:?}");
    assert!(gold.f_score(&gold) > baseline.mean);
}
