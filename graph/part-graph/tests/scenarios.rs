//! End-to-end rootedness scenarios over OBJ fixtures.
//!
//! Fixtures are authored in the z-up pipeline frame and converted to the
//! y-up on-disk convention before saving (the axis swap is its own
//! inverse), exactly what `check_rooted` expects to undo on load.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use nalgebra::{Point3, Vector3};
use part_graph::{
    build_adjacency, build_rooted_adjacency, check_rooted, connected_components, is_rooted,
    split_into_parts, Hierarchy, ProximityThreshold, GROUND,
};
use part_mesh::{cuboid, save_obj, TriMesh};
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

fn unit_cube_at(x: f64, z: f64) -> TriMesh {
    cuboid(Point3::new(x, 0.0, z), Vector3::new(1.0, 1.0, 1.0))
}

#[test]
fn stacked_cuboids_are_rooted() {
    // Scenario: two cuboids stacked with zero gap.
    let dir = TempDir::new().unwrap();
    let mut scene = unit_cube_at(0.0, 0.5);
    scene.merge(&unit_cube_at(0.0, 1.5));
    let path = save_fixture(&dir, "stacked.obj", &scene);

    assert!(check_rooted(&path, ProximityThreshold::Absolute(1e-3)).unwrap());
}

#[test]
fn gapped_cuboids_are_not_rooted() {
    // Scenario: a 1.0-unit gap between the two cuboids.
    let dir = TempDir::new().unwrap();
    let mut scene = unit_cube_at(0.0, 0.5);
    scene.merge(&unit_cube_at(0.0, 2.5));
    let path = save_fixture(&dir, "gapped.obj", &scene);

    assert!(!check_rooted(&path, ProximityThreshold::Absolute(1e-3)).unwrap());
}

#[test]
fn gapped_cuboids_have_no_cross_edge() {
    let mut scene = unit_cube_at(0.0, 0.5);
    scene.merge(&unit_cube_at(0.0, 2.5));
    let parts = split_into_parts(&scene);

    let graph = build_rooted_adjacency(&parts, ProximityThreshold::Absolute(1e-3)).unwrap();
    // Ground reaches the bottom cube; the floating cube has no edges.
    assert!(graph.contains_edge(GROUND, 1));
    assert!(!graph.contains_edge(1, 2));
    assert!(!graph.contains_edge(GROUND, 2));
    assert!(!is_rooted(&graph));
}

#[test]
fn three_part_tower_is_rooted_with_path_hierarchy() {
    // Scenario: three-part tower, each part touching the next.
    let dir = TempDir::new().unwrap();
    let mut scene = unit_cube_at(0.0, 0.5);
    scene.merge(&unit_cube_at(0.0, 1.5));
    scene.merge(&unit_cube_at(0.0, 2.5));
    let path = save_fixture(&dir, "tower.obj", &scene);

    assert!(check_rooted(&path, ProximityThreshold::Absolute(1e-3)).unwrap());

    let parts = split_into_parts(&scene);
    let graph = build_adjacency(&parts, ProximityThreshold::Absolute(1e-3)).unwrap();
    let components = connected_components(&graph);
    assert_eq!(components, vec![vec![0, 1, 2]]);

    let tree = Hierarchy::span(&components[0], &graph, None).unwrap();
    assert_eq!(tree.root(), 0);
    assert_eq!(tree.edges(), &[(0, 1), (1, 2)]);
}

#[test]
fn disconnected_floating_parts_are_not_rooted() {
    // Scenario: two mutually disconnected parts; only the structure's
    // lowest surface defines the ground plane, and the second part
    // floats unreachable above it.
    let dir = TempDir::new().unwrap();
    let mut scene = unit_cube_at(0.0, 0.5);
    scene.merge(&unit_cube_at(4.0, 3.0));
    let path = save_fixture(&dir, "floating.obj", &scene);

    assert!(!check_rooted(&path, ProximityThreshold::Absolute(1e-3)).unwrap());
}

#[test]
fn rootedness_is_monotone_in_threshold() {
    // Tower with 0.05-unit gaps: tight thresholds fail, loose ones pass,
    // and a pass at eps1 implies a pass at every eps2 > eps1.
    let dir = TempDir::new().unwrap();
    let mut scene = unit_cube_at(0.0, 0.5);
    scene.merge(&unit_cube_at(0.0, 1.55));
    scene.merge(&unit_cube_at(0.0, 2.6));
    let path = save_fixture(&dir, "gaps.obj", &scene);

    let thresholds = [1e-3, 0.02, 0.06, 0.2];
    let verdicts: Vec<bool> = thresholds
        .iter()
        .map(|&eps| check_rooted(&path, ProximityThreshold::Absolute(eps)).unwrap())
        .collect();

    assert_eq!(verdicts, vec![false, false, true, true]);
    for window in verdicts.windows(2) {
        // rooted(eps1) implies rooted(eps2) for eps1 < eps2.
        assert!(!window[0] || window[1]);
    }
}

#[test]
fn empty_mesh_fails_closed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.obj");
    save_obj(&TriMesh::new(), &path).unwrap();

    let err = check_rooted(&path, ProximityThreshold::Absolute(1e-3)).unwrap_err();
    assert!(matches!(err, part_graph::GraphError::EmptyDecomposition));
}

#[test]
fn missing_file_propagates_instead_of_defaulting_false() {
    let err = check_rooted("no/such/file.obj", ProximityThreshold::Absolute(1e-3)).unwrap_err();
    assert!(matches!(err, part_graph::GraphError::Mesh(_)));
}
