//! Rootedness and stability checks for multi-part mesh objects.
//!
//! # Commands
//!
//! - `stack-check rooted` - Is every part connected to the ground?
//! - `stack-check stability` - Does the object survive a standard
//!   perturbation in a rigid-body simulation?
//! - `stack-check export` - Decompose an OBJ into URDF assemblies.
//! - `stack-check rooted-stats` - Batch rootedness over a directory.
//! - `stack-check stability-stats` - Batch stability over a directory.
//!
//! The proximity threshold is mandatory everywhere: pass either
//! `--threshold <units>` (absolute) or `--threshold-scale <fraction>`
//! (relative to each object's bounding-box diagonal).

mod batch;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use part_graph::ProximityThreshold;
use sim_stability::StabilityConfig;
use urdf_export::{ExportOptions, ExportMode};

/// Structural soundness checks for part-graph objects.
#[derive(Parser)]
#[command(name = "stack-check")]
#[command(about = "Rootedness and stability checks for multi-part mesh objects", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Mandatory proximity threshold: exactly one form.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct ThresholdArgs {
    /// Absolute proximity threshold in mesh units
    #[arg(long)]
    threshold: Option<f64>,

    /// Proximity threshold as a fraction of the object's overall scale
    #[arg(long)]
    threshold_scale: Option<f64>,
}

impl ThresholdArgs {
    fn resolve(&self) -> Result<ProximityThreshold> {
        match (self.threshold, self.threshold_scale) {
            (Some(value), None) => Ok(ProximityThreshold::Absolute(value)),
            (None, Some(factor)) => Ok(ProximityThreshold::RelativeToScale(factor)),
            _ => bail!("pass exactly one of --threshold or --threshold-scale"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether every part is connected to the ground
    Rooted {
        /// Path to the input OBJ file
        #[arg(long)]
        input_file: PathBuf,

        #[command(flatten)]
        threshold: ThresholdArgs,
    },

    /// Check physical stability under a standard perturbation
    Stability {
        /// Path to the input OBJ file
        #[arg(long)]
        input_file: PathBuf,

        #[command(flatten)]
        threshold: ThresholdArgs,

        /// Material density (link mass = volume x density)
        #[arg(long, default_value_t = 1.0)]
        density: f64,

        /// Step indefinitely, logging displacements, without a verdict
        #[arg(long)]
        interactive: bool,
    },

    /// Decompose an OBJ into URDF assemblies on disk
    Export {
        /// Path to the input OBJ file
        #[arg(long)]
        input_file: PathBuf,

        /// Directory for the URDF/metadata/mesh files
        #[arg(long)]
        output_dir: PathBuf,

        #[command(flatten)]
        threshold: ThresholdArgs,

        /// Material density (link mass = volume x density)
        #[arg(long, default_value_t = 1.0)]
        density: f64,

        /// Emit one combined document instead of one per component
        #[arg(long)]
        legacy: bool,
    },

    /// Batch rootedness over every OBJ file in a directory
    RootedStats {
        /// Directory of OBJ files
        #[arg(long)]
        input_dir: PathBuf,

        /// Output CSV path
        #[arg(long, default_value = "rooted_stats.csv")]
        output_file: PathBuf,

        #[command(flatten)]
        threshold: ThresholdArgs,
    },

    /// Batch stability over every OBJ file in a directory
    StabilityStats {
        /// Directory of OBJ files
        #[arg(long)]
        input_dir: PathBuf,

        /// Output CSV path
        #[arg(long, default_value = "stability_stats.csv")]
        output_file: PathBuf,

        #[command(flatten)]
        threshold: ThresholdArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Rooted {
            input_file,
            threshold,
        } => {
            let rooted = part_graph::check_rooted(&input_file, threshold.resolve()?)?;
            println!("{rooted}");
        }

        Commands::Stability {
            input_file,
            threshold,
            density,
            interactive,
        } => {
            let config = StabilityConfig::default().with_density(density);
            let threshold = threshold.resolve()?;
            if interactive {
                sim_stability::run_interactive(&input_file, threshold, &config)?;
            } else {
                let stable = sim_stability::check_stability(&input_file, threshold, &config)?;
                println!("{stable}");
            }
        }

        Commands::Export {
            input_file,
            output_dir,
            threshold,
            density,
            legacy,
        } => {
            let mut options = ExportOptions::new(threshold.resolve()?).density(density);
            if legacy {
                options.mode = ExportMode::SingleLegacy;
            }
            let assemblies = urdf_export::export_obj_to_urdf(&input_file, &output_dir, &options)?;
            println!(
                "exported {} assemblies to {}",
                assemblies.len(),
                output_dir.display()
            );
        }

        Commands::RootedStats {
            input_dir,
            output_file,
            threshold,
        } => {
            let eps = threshold.resolve()?;
            println!("Checking rooted-ness of objects in {}", input_dir.display());
            let rows = batch::run_batch(&input_dir, "rootedness", |path| {
                Ok(part_graph::check_rooted(path, eps)?)
            })?;
            batch::write_report(&rows, "Is Rooted", &output_file)?;
            batch::print_summary(&rows);
        }

        Commands::StabilityStats {
            input_dir,
            output_file,
            threshold,
        } => {
            let eps = threshold.resolve()?;
            let config = StabilityConfig::default();
            println!("Checking stability of objects in {}", input_dir.display());
            let rows = batch::run_batch(&input_dir, "stability", |path| {
                Ok(sim_stability::check_stability(path, eps, &config)?)
            })?;
            batch::write_report(&rows, "Is Stable", &output_file)?;
            batch::print_summary(&rows);
        }
    }

    Ok(())
}
