use pso_challenges::travelling_salesman::Challenge;

/// Cost of a tour. Routes handed to `cost` are always permutations of
/// `0..num_nodes()`.
pub trait Objective {
    fn num_nodes(&self) -> usize;

    fn cost(&self, route: &[usize]) -> f64;
}

impl Objective for Challenge {
    fn num_nodes(&self) -> usize {
        Challenge::num_nodes(self)
    }

    fn cost(&self, route: &[usize]) -> f64 {
        self.route_distance(route)
    }
}
