//! Stability evaluation of decomposed part assemblies.
//!
//! Drives an external rigid-body engine (rapier) through a fixed
//! protocol and interprets the result:
//!
//! 1. Check rootedness; an unrooted object short-circuits to unstable
//!    without ever constructing a physics world.
//! 2. Decompose the object into assemblies and emit their documents into
//!    a scoped temporary directory (deleted on every exit path).
//! 3. Load each assembly into one shared world at its start position —
//!    one rigid body per part, fixed joints along the hierarchy, the
//!    placeholder unit inertia per link.
//! 4. Restrict collisions to part-versus-ground pairs, so each
//!    assembly's verdict is independent of incidental contact with
//!    others sharing the world.
//! 5. Perturb each assembly (upward force plus torques about all three
//!    axes, scaled by its volume) for exactly one step.
//! 6. Step a fixed number of times at a fixed timestep, then compare
//!    each assembly's vertical displacement against 5% of its scale.
//!
//! Simulation is deterministic for fixed initial conditions, so a
//! negative verdict is a structural fact; nothing is retried.
//!
//! # Example
//!
//! ```no_run
//! use part_graph::ProximityThreshold;
//! use sim_stability::{check_stability, StabilityConfig};
//!
//! let stable = check_stability(
//!     "tower.obj",
//!     ProximityThreshold::RelativeToScale(0.02),
//!     &StabilityConfig::default(),
//! ).unwrap();
//! println!("stable: {stable}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod error;
mod evaluator;
mod world;

pub use config::StabilityConfig;
pub use error::{StabilityError, StabilityResult};
pub use evaluator::{
    check_stability, evaluate_stability, run_interactive, AssemblyVerdict, StabilityOutcome,
    StabilityReport,
};
pub use world::{LoadedAssembly, StabilityWorld};
