//! The stability evaluation protocol.

use std::path::Path;

use part_graph::{build_adjacency, check_rooted, split_into_parts, ProximityThreshold};
use tempfile::TempDir;
use urdf_export::{build_assemblies, write_assembly_files};

use crate::config::StabilityConfig;
use crate::error::StabilityResult;
use crate::world::StabilityWorld;

/// Verdict for one assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyVerdict {
    /// Assembly index within the decomposition.
    pub assembly: usize,
    /// Measured vertical displacement of the root body.
    pub displacement: f64,
    /// Allowed displacement (tolerance fraction × assembly scale).
    pub allowed: f64,
    /// Whether the displacement stayed within the allowance.
    pub stable: bool,
}

/// How a stability check concluded.
///
/// `RootednessFailed` is terminal: the verdict is false and no
/// simulation was run. Otherwise the world was stepped and per-assembly
/// verdicts were measured.
#[derive(Debug, Clone, PartialEq)]
pub enum StabilityOutcome {
    /// The object is not rooted; simulation was skipped.
    RootednessFailed,
    /// Simulation ran to completion.
    Evaluated {
        /// One verdict per assembly.
        verdicts: Vec<AssemblyVerdict>,
    },
}

/// Full result of a stability check.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityReport {
    /// Whether every part was reachable from the ground.
    pub rooted: bool,
    /// How the check concluded.
    pub outcome: StabilityOutcome,
}

impl StabilityReport {
    /// Aggregate verdict: rootedness and every assembly within
    /// tolerance.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        match &self.outcome {
            StabilityOutcome::RootednessFailed => false,
            StabilityOutcome::Evaluated { verdicts } => {
                self.rooted && verdicts.iter().all(|v| v.stable)
            }
        }
    }
}

/// Evaluate the stability of the object in an OBJ file.
///
/// Protocol: rootedness first (an unrooted object short-circuits without
/// constructing a physics world), then decomposition, document emission
/// into a scoped temporary directory, world loading, a one-step
/// perturbation per assembly, a fixed-step run, and displacement
/// verdicts. The temporary directory and the physics world are released
/// on every exit path.
///
/// # Errors
///
/// Mesh/graph/emission failures, geometry the simulator rejects, and
/// invalid configurations. Rootedness failure is a *verdict*, not an
/// error.
pub fn evaluate_stability<P: AsRef<Path>>(
    path: P,
    threshold: ProximityThreshold,
    config: &StabilityConfig,
) -> StabilityResult<StabilityReport> {
    config.validate()?;

    // An object that is not rooted cannot be stable; don't simulate.
    if !check_rooted(path.as_ref(), threshold)? {
        tracing::info!(
            path = %path.as_ref().display(),
            "not rooted; skipping simulation"
        );
        return Ok(StabilityReport {
            rooted: false,
            outcome: StabilityOutcome::RootednessFailed,
        });
    }

    let (mut world, loaded, _scratch) = prepare_world(path.as_ref(), threshold, config)?;

    // Perturb every assembly, let the forces act for exactly one step,
    // then run the remainder unforced.
    for assembly in &loaded {
        world.apply_perturbation(assembly, config);
    }
    world.step();
    for assembly in &loaded {
        world.clear_forces(assembly);
    }
    for _ in 1..config.steps {
        world.step();
    }

    let verdicts: Vec<AssemblyVerdict> = loaded
        .iter()
        .map(|assembly| {
            let displacement = world.vertical_displacement(assembly);
            let allowed = config.displacement_tolerance * assembly.scale.abs();
            AssemblyVerdict {
                assembly: assembly.index,
                displacement,
                allowed,
                stable: displacement <= allowed,
            }
        })
        .collect();

    for verdict in &verdicts {
        tracing::debug!(
            assembly = verdict.assembly,
            displacement = verdict.displacement,
            allowed = verdict.allowed,
            stable = verdict.stable,
            "assembly verdict"
        );
    }

    Ok(StabilityReport {
        rooted: true,
        outcome: StabilityOutcome::Evaluated { verdicts },
    })
}

/// Boolean form of [`evaluate_stability`].
///
/// # Errors
///
/// Same failure modes as [`evaluate_stability`].
pub fn check_stability<P: AsRef<Path>>(
    path: P,
    threshold: ProximityThreshold,
    config: &StabilityConfig,
) -> StabilityResult<bool> {
    Ok(evaluate_stability(path, threshold, config)?.is_stable())
}

/// Step the perturbed world indefinitely for visual inspection.
///
/// Logs each assembly's displacement once per simulated second and never
/// produces a verdict. Rootedness is still checked first so the run is
/// meaningful.
///
/// # Errors
///
/// Setup failures, as in [`evaluate_stability`]. Does not return under
/// normal operation; interrupt the process to stop it.
pub fn run_interactive<P: AsRef<Path>>(
    path: P,
    threshold: ProximityThreshold,
    config: &StabilityConfig,
) -> StabilityResult<()> {
    config.validate()?;

    if !check_rooted(path.as_ref(), threshold)? {
        tracing::warn!("object is not rooted; stepping anyway for inspection");
    }

    let (mut world, loaded, _scratch) = prepare_world(path.as_ref(), threshold, config)?;

    for assembly in &loaded {
        world.apply_perturbation(assembly, config);
    }
    world.step();
    for assembly in &loaded {
        world.clear_forces(assembly);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps_per_second = (1.0 / config.timestep).max(1.0) as u64;
    let mut step_count: u64 = 1;
    loop {
        world.step();
        step_count += 1;
        if step_count % steps_per_second == 0 {
            for assembly in &loaded {
                tracing::info!(
                    assembly = assembly.index,
                    displacement = world.vertical_displacement(assembly),
                    t = step_count,
                    "interactive step"
                );
            }
        }
    }
}

/// Shared setup: decompose, emit documents into scoped scratch space,
/// and load every assembly into a fresh world.
///
/// The returned [`TempDir`] owns the emitted files; dropping it deletes
/// them, so callers keep it alive for the duration of the run.
fn prepare_world(
    path: &Path,
    threshold: ProximityThreshold,
    config: &StabilityConfig,
) -> StabilityResult<(StabilityWorld, Vec<crate::world::LoadedAssembly>, TempDir)> {
    let mut mesh = part_mesh::load_obj(path).map_err(part_graph::GraphError::from)?;
    mesh.swap_yup_to_zup();

    let mut parts = split_into_parts(&mesh);
    if parts.is_empty() {
        return Err(part_graph::GraphError::EmptyDecomposition.into());
    }

    let graph = build_adjacency(&parts, threshold)?;
    let assemblies = build_assemblies(&mut parts, &graph)?;

    // Emit the documents the way an external consumer would see them;
    // the scratch directory disappears on drop, success or error.
    let scratch = TempDir::new()?;
    write_assembly_files(scratch.path(), &assemblies, &parts, config.density)?;

    let mut world = StabilityWorld::new(config);
    let mut loaded = Vec::with_capacity(assemblies.len());
    for assembly in &assemblies {
        loaded.push(world.load_assembly(assembly, &parts, config)?);
    }

    Ok((world, loaded, scratch))
}
