//! Discrete particle swarm for the travelling salesman problem.
//!
//! Particles move through tour space with velocities made of transpositions
//! (see [`permutation`]). Each particle is pulled towards its own best tour
//! and the best tour of its ring neighborhood, using constriction-factor
//! weights.
//!
//! # References
//! Clerc, M. (2004) "Discrete Particle Swarm Optimization, illustrated by the
//! Traveling Salesman Problem"

use anyhow::Result;
use serde_json::{Map, Value};

pub mod history;
pub mod objective;
pub mod params;
pub mod particle;
pub mod permutation;
pub mod solver;
pub mod swarm;

pub use history::{ConvergenceHistory, Sample};
pub use objective::Objective;
pub use params::{CoefficientPreset, Params, TopologyKind};
pub use particle::Particle;
pub use permutation::SwapSequence;
pub use solver::{Outcome, Solver};
pub use swarm::{Coefficients, Swarm, Topology};

use pso_challenges::travelling_salesman::*;

pub fn solve_challenge(
    challenge: &Challenge,
    save_solution: &dyn Fn(&Solution) -> Result<()>,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<()> {
    Solver::solve_challenge_instance(challenge, hyperparameters, Some(save_solution))?;
    Ok(())
}

pub fn help() {
    println!("Swap Swarm: discrete PSO whose velocities are sequences of transpositions");
    println!();
    println!("HYPERPARAMETERS (all optional):");
    println!("  coefficients       \"constriction\" (default) or \"usual\"");
    println!("  ksi, c1, c2        override the preset weights");
    println!("  swarm_size         default 10 + 2 * ceil(sqrt(nb_nodes))");
    println!("  num_iterations     default 1000 * nb_nodes, at least 1");
    println!("  topology           \"ring\" (default) or \"global\"");
    println!("  neighbors          ring neighborhood size below swarm_size, default 3");
    println!("  sampling_interval  iterations between history samples, default 10");
    println!();
    println!("Example: {{\"coefficients\": \"usual\", \"num_iterations\": 5000}}");
}
