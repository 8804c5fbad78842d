use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use pso_challenges::travelling_salesman::{Challenge, Solution};

use super::history::ConvergenceHistory;
use super::objective::Objective;
use super::params::Params;
use super::swarm::Swarm;

/// Best tour of a run together with its convergence curve.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Outcome {
    pub solution: Solution,
    pub distance: f64,
    pub history: ConvergenceHistory,
}

pub struct Solver;

impl Solver {
    pub fn solve_challenge_instance(
        challenge: &Challenge,
        hyperparameters: &Option<Map<String, Value>>,
        save_solution: Option<&dyn Fn(&Solution) -> Result<()>>,
    ) -> Result<Outcome> {
        let params = Params::initialize(hyperparameters, challenge.num_nodes())?;
        let mut rng = SmallRng::from_seed(challenge.seed);
        Self::run(challenge, &params, &mut rng, save_solution)
    }

    /// Runs the swarm for `params.num_iterations` generations on any objective.
    pub fn run<O: Objective + ?Sized, R: Rng + ?Sized>(
        objective: &O,
        params: &Params,
        rng: &mut R,
        save_solution: Option<&dyn Fn(&Solution) -> Result<()>>,
    ) -> Result<Outcome> {
        let num_nodes = objective.num_nodes();
        let mut history = ConvergenceHistory::new(params.sampling_interval);

        if num_nodes <= 1 {
            let route: Vec<usize> = (0..num_nodes).collect();
            let distance = objective.cost(&route);
            history.record(0, distance);
            let solution = Solution { route };
            if let Some(save) = save_solution {
                save(&solution)?;
            }
            return Ok(Outcome {
                solution,
                distance,
                history,
            });
        }

        let topology = params.topology();
        let coefficients = params.coefficients();
        info!(
            num_nodes,
            swarm_size = params.swarm_size,
            num_iterations = params.num_iterations,
            ?topology,
            "starting swarm"
        );

        let mut swarm = Swarm::initialize(params.swarm_size, objective, rng);
        let mut best_route = swarm.best().position.clone();
        let mut best_distance = swarm.best().fitness;
        if let Some(save) = save_solution {
            save(&Solution {
                route: best_route.clone(),
            })?;
        }

        for iteration in 0..params.num_iterations {
            swarm = swarm.step(objective, topology, coefficients, rng);

            let leader = swarm.best();
            if leader.fitness < best_distance {
                best_distance = leader.fitness;
                best_route = leader.position.clone();
                debug!(iteration, best_distance, "improved best tour");
                if let Some(save) = save_solution {
                    save(&Solution {
                        route: best_route.clone(),
                    })?;
                }
            }

            history.record(iteration, best_distance);
        }

        info!(best_distance, "swarm finished");
        Ok(Outcome {
            solution: Solution { route: best_route },
            distance: best_distance,
            history,
        })
    }
}
