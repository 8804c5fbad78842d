use std::collections::HashSet;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ChallengeError, Result};

const GRID_SIZE: i32 = 1000;

#[derive(Serialize, Deserialize, Debug, Copy, Clone)]
pub struct Difficulty {
    pub num_nodes: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Solution {
    pub route: Vec<usize>,
}

impl Solution {
    pub fn new() -> Self {
        Self { route: Vec::new() }
    }
}

impl TryFrom<Map<String, Value>> for Solution {
    type Error = ChallengeError;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(map))
            .map_err(|e| ChallengeError::invalid(format!("Cannot read solution: {}", e)))
    }
}

/// How a submitted route compares to the nearest-neighbour tour of the same instance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SolutionQuality {
    pub distance: f64,
    pub baseline_distance: f64,
    /// Percentage by which `distance` undercuts the baseline; negative when worse.
    pub better_than_baseline: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Challenge {
    pub seed: [u8; 32],
    pub node_positions: Vec<(f64, f64)>,
    pub distance_matrix: Vec<Vec<f64>>,
}

impl Challenge {
    /// Places `num_nodes` distinct integer points on a 1000x1000 grid.
    pub fn generate_instance(seed: &[u8; 32], difficulty: &Difficulty) -> Result<Self> {
        let num_nodes = difficulty.num_nodes;
        let capacity = ((GRID_SIZE + 1) * (GRID_SIZE + 1)) as usize;
        if num_nodes > capacity {
            return Err(ChallengeError::invalid(format!(
                "Cannot place {} distinct nodes on a {}x{} grid",
                num_nodes, GRID_SIZE, GRID_SIZE
            )));
        }
        let mut rng = SmallRng::from_seed(*seed);

        let mut node_positions: Vec<(f64, f64)> = Vec::with_capacity(num_nodes);
        let mut node_positions_set: HashSet<(i32, i32)> = HashSet::with_capacity(num_nodes);
        while node_positions.len() < num_nodes {
            let pos = (rng.gen_range(0..=GRID_SIZE), rng.gen_range(0..=GRID_SIZE));
            if node_positions_set.insert(pos) {
                node_positions.push((pos.0 as f64, pos.1 as f64));
            }
        }

        Self::from_node_positions(seed, node_positions)
    }

    pub fn from_node_positions(seed: &[u8; 32], node_positions: Vec<(f64, f64)>) -> Result<Self> {
        if let Some(node) = node_positions
            .iter()
            .position(|&(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ChallengeError::invalid(format!(
                "Node {} has a non-finite coordinate {:?}",
                node, node_positions[node]
            )));
        }

        let distance_matrix: Vec<Vec<f64>> = node_positions
            .iter()
            .map(|&from| {
                node_positions
                    .iter()
                    .map(|&to| {
                        let dx = from.0 - to.0;
                        let dy = from.1 - to.1;
                        dx.hypot(dy)
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            seed: *seed,
            node_positions,
            distance_matrix,
        })
    }

    /// Parses one city per line as `<id> <x> <y>`. The id column is ignored,
    /// cities are indexed in file order.
    pub fn from_cities_str(seed: &[u8; 32], text: &str) -> Result<Self> {
        let mut node_positions = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                return Err(ChallengeError::invalid(format!(
                    "Line {}: expected '<id> <x> <y>', got '{}'",
                    line_no + 1,
                    line
                )));
            }
            let parse = |field: &str| {
                field.parse::<f64>().map_err(|_| {
                    ChallengeError::invalid(format!(
                        "Line {}: '{}' is not a number",
                        line_no + 1,
                        field
                    ))
                })
            };
            node_positions.push((parse(fields[1])?, parse(fields[2])?));
        }
        Self::from_node_positions(seed, node_positions)
    }

    /// Inverse of `from_cities_str`, ids start at 1.
    pub fn to_cities_string(&self) -> String {
        self.node_positions
            .iter()
            .enumerate()
            .map(|(i, (x, y))| format!("{} {} {}\n", i + 1, x, y))
            .collect()
    }

    pub fn num_nodes(&self) -> usize {
        self.node_positions.len()
    }

    pub fn calc_total_distance(&self, solution: &Solution) -> Result<f64> {
        calc_total_distance(&self.distance_matrix, &solution.route)
    }

    /// Tour length of a route assumed to be a permutation of the node range.
    /// Panics on out-of-range nodes; use `calc_total_distance` for untrusted input.
    pub fn route_distance(&self, route: &[usize]) -> f64 {
        route_distance(&self.distance_matrix, route)
    }

    pub fn compute_greedy_baseline(&self) -> Solution {
        let num_nodes = self.num_nodes();
        let mut route = Vec::with_capacity(num_nodes);
        if num_nodes == 0 {
            return Solution { route };
        }
        let mut visited = vec![false; num_nodes];
        let mut current_node = 0;
        visited[current_node] = true;
        route.push(current_node);
        while route.len() < num_nodes {
            let row = &self.distance_matrix[current_node];
            let mut next_node = None;
            for node in (0..num_nodes).filter(|&n| !visited[n]) {
                match next_node {
                    Some(best) if row[best] <= row[node] => {}
                    _ => next_node = Some(node),
                }
            }
            // unvisited nodes remain while the route is short
            let Some(next_node) = next_node else { break };
            visited[next_node] = true;
            route.push(next_node);
            current_node = next_node;
        }
        Solution { route }
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<SolutionQuality> {
        let distance = self.calc_total_distance(solution)?;
        let baseline_distance = self.route_distance(&self.compute_greedy_baseline().route);
        let better_than_baseline = if baseline_distance > 0.0 {
            (1.0 - distance / baseline_distance) * 100.0
        } else {
            0.0
        };
        Ok(SolutionQuality {
            distance,
            baseline_distance,
            better_than_baseline,
        })
    }
}

pub fn is_permutation(route: &[usize], num_nodes: usize) -> bool {
    if route.len() != num_nodes {
        return false;
    }
    let mut seen = vec![false; num_nodes];
    for &node in route {
        if node >= num_nodes || seen[node] {
            return false;
        }
        seen[node] = true;
    }
    true
}

fn calc_total_distance(distance_matrix: &[Vec<f64>], route: &[usize]) -> Result<f64> {
    if route.len() != distance_matrix.len() {
        return Err(ChallengeError::invalid(format!(
            "Route length ({}) does not match number of nodes ({})",
            route.len(),
            distance_matrix.len()
        )));
    }
    if route.iter().any(|&node| node >= distance_matrix.len()) {
        return Err(ChallengeError::invalid("Route contains invalid nodes"));
    }
    if !is_permutation(route, distance_matrix.len()) {
        return Err(ChallengeError::invalid("Route contains duplicate nodes"));
    }
    Ok(route_distance(distance_matrix, route))
}

fn route_distance(distance_matrix: &[Vec<f64>], route: &[usize]) -> f64 {
    match route {
        [] | [_] => 0.0,
        [first, .., last] => {
            route
                .windows(2)
                .map(|w| distance_matrix[w[0]][w[1]])
                .sum::<f64>()
                + distance_matrix[*last][*first]
        }
    }
}
