//! End-to-end protocol tests over OBJ fixtures.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use nalgebra::{Point3, Vector3};
use part_graph::ProximityThreshold;
use part_mesh::{cuboid, save_obj, TriMesh};
use sim_stability::{evaluate_stability, StabilityConfig, StabilityOutcome};
use std::path::PathBuf;
use tempfile::TempDir;

/// Save a z-up scene as a y-up OBJ fixture.
fn save_fixture(dir: &TempDir, name: &str, scene: &TriMesh) -> PathBuf {
    let mut on_disk = scene.clone();
    on_disk.swap_yup_to_zup();
    let path = dir.path().join(name);
    save_obj(&on_disk, &path).unwrap();
    path
}

#[test]
fn unrooted_object_short_circuits_without_simulating() {
    // Two mutually disconnected parts, the second floating unreachable.
    let dir = TempDir::new().unwrap();
    let mut scene = cuboid(Point3::new(0.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0));
    scene.merge(&cuboid(Point3::new(4.0, 0.0, 3.0), Vector3::new(1.0, 1.0, 1.0)));
    let path = save_fixture(&dir, "floating.obj", &scene);

    let report = evaluate_stability(
        &path,
        ProximityThreshold::Absolute(1e-3),
        &StabilityConfig::default(),
    )
    .unwrap();

    assert!(!report.rooted);
    assert_eq!(report.outcome, StabilityOutcome::RootednessFailed);
    assert!(!report.is_stable());
}

#[test]
fn resting_cube_is_stable_without_perturbation() {
    let dir = TempDir::new().unwrap();
    let scene = cuboid(Point3::new(0.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0));
    let path = save_fixture(&dir, "cube.obj", &scene);

    // One simulated second at rest.
    let config = StabilityConfig::default().unperturbed().with_steps(240);
    let report = evaluate_stability(&path, ProximityThreshold::Absolute(1e-3), &config).unwrap();

    assert!(report.rooted);
    let StabilityOutcome::Evaluated { verdicts } = &report.outcome else {
        panic!("expected an evaluated outcome");
    };
    assert_eq!(verdicts.len(), 1);
    assert!(verdicts[0].stable, "displacement {}", verdicts[0].displacement);
    assert!(report.is_stable());
}

#[test]
fn rooted_object_can_still_fail_the_displacement_check() {
    // Rooted is necessary but not sufficient: measure while the
    // perturbation still has the cube airborne and the verdict must be
    // negative even though rootedness held.
    let dir = TempDir::new().unwrap();
    let scene = cuboid(Point3::new(0.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0));
    let path = save_fixture(&dir, "kicked.obj", &scene);

    let config = StabilityConfig::default().with_steps(60);
    let report = evaluate_stability(&path, ProximityThreshold::Absolute(1e-3), &config).unwrap();

    assert!(report.rooted);
    let StabilityOutcome::Evaluated { verdicts } = &report.outcome else {
        panic!("expected an evaluated outcome");
    };
    assert!(!verdicts[0].stable);
    assert!(!report.is_stable());
}

#[test]
fn assemblies_are_judged_independently() {
    // Two separate towers: two assemblies, two verdicts, one world.
    let dir = TempDir::new().unwrap();
    let mut scene = cuboid(Point3::new(0.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0));
    scene.merge(&cuboid(Point3::new(6.0, 0.0, 0.5), Vector3::new(1.0, 1.0, 1.0)));
    let path = save_fixture(&dir, "pair.obj", &scene);

    let config = StabilityConfig::default().unperturbed().with_steps(120);
    let report = evaluate_stability(&path, ProximityThreshold::Absolute(1e-3), &config).unwrap();

    assert!(report.rooted);
    let StabilityOutcome::Evaluated { verdicts } = &report.outcome else {
        panic!("expected an evaluated outcome");
    };
    assert_eq!(verdicts.len(), 2);
    assert!(verdicts.iter().all(|v| v.stable));
}

#[test]
fn empty_object_is_an_error_not_a_verdict() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.obj");
    save_obj(&TriMesh::new(), &path).unwrap();

    let err = evaluate_stability(
        &path,
        ProximityThreshold::Absolute(1e-3),
        &StabilityConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        sim_stability::StabilityError::Graph(part_graph::GraphError::EmptyDecomposition)
    ));
}
