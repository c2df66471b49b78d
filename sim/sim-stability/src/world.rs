//! Scoped rapier world for stability checks.
//!
//! The world is a plain owned value: construct it at the start of one
//! check, drop it on any exit path, and no simulator state survives into
//! the next invocation.

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use rapier3d_f64::prelude::{
    ActiveHooks, CCDSolver, ColliderBuilder, ColliderSet, DefaultBroadPhase, FixedJointBuilder,
    ImpulseJointSet, IntegrationParameters, IslandManager, MassProperties, MultibodyJointSet,
    NarrowPhase, PairFilterContext, PhysicsHooks, PhysicsPipeline, RigidBodyBuilder,
    RigidBodyHandle, RigidBodySet, SolverFlags,
};
use urdf_export::Assembly;

use part_graph::Part;

use crate::config::StabilityConfig;
use crate::error::{StabilityError, StabilityResult};

/// `user_data` marker distinguishing the ground collider from parts.
const GROUND_MARKER: u128 = u128::MAX;

/// Half-extent of the fixed ground slab. Far larger than any object this
/// pipeline sees.
const GROUND_HALF_EXTENT: f64 = 500.0;

/// Contact filter admitting only part-versus-ground pairs.
///
/// Assemblies must be judged independently of incidental contact with
/// others co-located in the same world, and links welded into one
/// assembly must not fight their own joints, so every part-part contact
/// is rejected. Each part collider still records its assembly index in
/// `user_data` for diagnostics.
struct GroundOnlyContacts;

impl PhysicsHooks for GroundOnlyContacts {
    fn filter_contact_pair(&self, context: &PairFilterContext<'_>) -> Option<SolverFlags> {
        let a = context.colliders[context.collider1].user_data;
        let b = context.colliders[context.collider2].user_data;
        if (a == GROUND_MARKER) != (b == GROUND_MARKER) {
            Some(SolverFlags::COMPUTE_IMPULSES)
        } else {
            None
        }
    }
}

/// Handle to one assembly loaded into a [`StabilityWorld`].
#[derive(Debug, Clone, Copy)]
pub struct LoadedAssembly {
    /// Assembly index within the decomposition.
    pub index: usize,
    /// Scale scalar (assembly volume) that sizes forces and thresholds.
    pub scale: f64,
    root: RigidBodyHandle,
    start_z: f64,
}

/// One physics world scoped to a single stability check.
pub struct StabilityWorld {
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    gravity: Vector3<f64>,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    hooks: GroundOnlyContacts,
}

impl StabilityWorld {
    /// Create a world with gravity and the fixed ground slab.
    #[must_use]
    pub fn new(config: &StabilityConfig) -> Self {
        let mut colliders = ColliderSet::new();
        colliders.insert(
            ColliderBuilder::cuboid(GROUND_HALF_EXTENT, GROUND_HALF_EXTENT, 0.5)
                .translation(Vector3::new(0.0, 0.0, -0.5))
                .user_data(GROUND_MARKER)
                .active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS),
        );

        let params = IntegrationParameters {
            dt: config.timestep,
            ..Default::default()
        };

        Self {
            pipeline: PhysicsPipeline::new(),
            params,
            gravity: Vector3::new(0.0, 0.0, config.gravity),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            hooks: GroundOnlyContacts,
        }
    }

    /// Load one assembly at its start position.
    ///
    /// Every part becomes a dynamic rigid body carrying its surface mesh
    /// as a collider and explicit mass properties: mass = volume ×
    /// density with the placeholder unit principal inertia the emitted
    /// documents declare. Hierarchy edges become fixed multibody joints,
    /// welding the assembly into one rigid structure.
    ///
    /// # Errors
    ///
    /// - [`StabilityError::CollisionShape`] when the engine rejects a
    ///   part mesh (surfaced before any step runs).
    /// - [`StabilityError::JointInsertion`] when a hierarchy edge cannot
    ///   become a joint.
    pub fn load_assembly(
        &mut self,
        assembly: &Assembly,
        parts: &[Part],
        config: &StabilityConfig,
    ) -> StabilityResult<LoadedAssembly> {
        let start = Vector3::new(
            assembly.start_pos()[0],
            assembly.start_pos()[1],
            assembly.start_pos()[2],
        );

        let mut handles: HashMap<usize, RigidBodyHandle> =
            HashMap::with_capacity(assembly.part_ids().len());

        for &id in assembly.part_ids() {
            let part = &parts[id];
            let mass = part.volume() * config.density;

            let body = self.bodies.insert(
                RigidBodyBuilder::dynamic()
                    .translation(start)
                    .additional_mass_properties(MassProperties::new(
                        Point3::origin(),
                        mass,
                        Vector3::new(1.0, 1.0, 1.0),
                    )),
            );

            let shape = ColliderBuilder::trimesh(
                part.mesh().vertices.clone(),
                part.mesh().faces.clone(),
            );

            self.colliders.insert_with_parent(
                shape
                    .density(0.0)
                    .user_data(assembly.index() as u128)
                    .active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS),
                body,
                &mut self.bodies,
            );

            handles.insert(id, body);
        }

        for &(parent, child) in assembly.hierarchy().edges() {
            let (Some(&parent_handle), Some(&child_handle)) =
                (handles.get(&parent), handles.get(&child))
            else {
                return Err(StabilityError::JointInsertion { parent, child });
            };
            self.multibody_joints
                .insert(parent_handle, child_handle, FixedJointBuilder::new(), true)
                .ok_or(StabilityError::JointInsertion { parent, child })?;
        }

        let root = handles
            .get(&assembly.hierarchy().root())
            .copied()
            .ok_or_else(|| StabilityError::JointInsertion {
                parent: assembly.hierarchy().root(),
                child: assembly.hierarchy().root(),
            })?;

        tracing::debug!(
            assembly = assembly.index(),
            bodies = assembly.part_ids().len(),
            joints = assembly.hierarchy().edges().len(),
            "loaded assembly into world"
        );

        Ok(LoadedAssembly {
            index: assembly.index(),
            scale: assembly.scale(),
            root,
            start_z: assembly.start_pos()[2],
        })
    }

    /// Apply the standard perturbation to an assembly's root body.
    ///
    /// An upward force plus torques about all three axes, each scaled by
    /// the assembly's volume. Forces persist until
    /// [`clear_forces`](Self::clear_forces); the protocol applies them
    /// for exactly one step.
    pub fn apply_perturbation(&mut self, loaded: &LoadedAssembly, config: &StabilityConfig) {
        let s = loaded.scale;
        let body = &mut self.bodies[loaded.root];
        body.add_force(Vector3::new(0.0, 0.0, config.force_per_volume * s), true);
        body.add_torque(Vector3::new(config.tilt_torque_per_volume * s, 0.0, 0.0), true);
        body.add_torque(Vector3::new(0.0, config.tilt_torque_per_volume * s, 0.0), true);
        body.add_torque(Vector3::new(0.0, 0.0, config.spin_torque_per_volume * s), true);
    }

    /// Clear accumulated perturbation forces on an assembly.
    pub fn clear_forces(&mut self, loaded: &LoadedAssembly) {
        let body = &mut self.bodies[loaded.root];
        body.reset_forces(true);
        body.reset_torques(true);
    }

    /// Advance the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &self.hooks,
            &(),
        );
    }

    /// Vertical displacement of an assembly's root body from its start
    /// position.
    #[must_use]
    pub fn vertical_displacement(&self, loaded: &LoadedAssembly) -> f64 {
        (self.bodies[loaded.root].translation().z - loaded.start_z).abs()
    }
}
