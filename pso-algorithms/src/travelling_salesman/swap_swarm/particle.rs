use rand::{seq::SliceRandom, Rng};

use super::objective::Objective;
use super::permutation::SwapSequence;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec<usize>,
    pub velocity: SwapSequence,
    pub fitness: f64,
    pub best_position: Vec<usize>,
    /// Lowest fitness this particle has seen, the cost of `best_position`.
    pub best_fitness: f64,
    pub neighbor_best: Vec<usize>,
}

impl Particle {
    /// A particle on a uniformly random tour with no velocity.
    pub fn new<O: Objective + ?Sized, R: Rng + ?Sized>(objective: &O, rng: &mut R) -> Self {
        let mut position: Vec<usize> = (0..objective.num_nodes()).collect();
        position.shuffle(rng);
        Self::at(objective, position)
    }

    pub fn at<O: Objective + ?Sized>(objective: &O, position: Vec<usize>) -> Self {
        let fitness = objective.cost(&position);
        Self {
            velocity: SwapSequence::new(),
            fitness,
            best_position: position.clone(),
            best_fitness: fitness,
            neighbor_best: position.clone(),
            position,
        }
    }

    /// Adopts the current position as personal best if strictly better.
    pub fn update_personal_best(&mut self) {
        if self.fitness < self.best_fitness {
            self.best_position = self.position.clone();
            self.best_fitness = self.fitness;
        }
    }
}
