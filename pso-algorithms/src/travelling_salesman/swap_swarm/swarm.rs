use rand::Rng;
use serde::{Deserialize, Serialize};

use super::objective::Objective;
use super::particle::Particle;
use super::permutation::SwapSequence;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Particle `i` listens to particles `i+1 ..= i+k` modulo the swarm size.
    Ring { neighbors: usize },
    /// Every particle listens to the whole swarm.
    Global,
}

/// Constriction-factor weights of the velocity update.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub ksi: f64,
    pub c1: f64,
    pub c2: f64,
}

impl Coefficients {
    pub const CONSTRICTION: Coefficients = Coefficients {
        ksi: 0.7298844,
        c1: 2.05,
        c2: 2.05,
    };

    pub const USUAL: Coefficients = Coefficients {
        ksi: 0.7,
        c1: 1.47,
        c2: 1.47,
    };
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::CONSTRICTION
    }
}

/// One immutable generation of particles. `step` builds the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Swarm {
    particles: Vec<Particle>,
}

impl Swarm {
    /// Panics on an empty particle list.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        assert!(!particles.is_empty(), "a swarm needs at least one particle");
        Self { particles }
    }

    pub fn initialize<O: Objective + ?Sized, R: Rng + ?Sized>(
        size: usize,
        objective: &O,
        rng: &mut R,
    ) -> Self {
        Self::from_particles((0..size).map(|_| Particle::new(objective, rng)).collect())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particle with the lowest current fitness, the first one on ties.
    pub fn best(&self) -> &Particle {
        fittest(self.particles.iter())
    }

    /// Panics on a ring with zero neighbors.
    pub fn neighbor_best(&self, index: usize, topology: Topology) -> &Particle {
        match topology {
            Topology::Global => self.best(),
            Topology::Ring { neighbors } => {
                let size = self.particles.len();
                fittest((1..=neighbors).map(|offset| &self.particles[(index + offset) % size]))
            }
        }
    }

    /// Moves every particle once, reading only from `self`.
    pub fn step<O: Objective + ?Sized, R: Rng + ?Sized>(
        &self,
        objective: &O,
        topology: Topology,
        coefficients: Coefficients,
        rng: &mut R,
    ) -> Swarm {
        let particles = (0..self.particles.len())
            .map(|i| {
                let neighbor = self.neighbor_best(i, topology);
                let r1: f64 = rng.gen();
                let r2: f64 = rng.gen();
                move_particle(
                    &self.particles[i],
                    &neighbor.best_position,
                    objective,
                    coefficients,
                    (r1, r2),
                )
            })
            .collect();
        Swarm { particles }
    }
}

/// Next state of `particle` given its neighborhood's best tour and the two
/// uniform draws weighting the cognitive and social pulls.
pub fn move_particle<O: Objective + ?Sized>(
    particle: &Particle,
    neighbor_best: &[usize],
    objective: &O,
    coefficients: Coefficients,
    (r1, r2): (f64, f64),
) -> Particle {
    let mut next = particle.clone();
    next.update_personal_best();

    // Differences are taken from the attractor towards the current tour.
    let cognitive = SwapSequence::between(&next.best_position, &next.position);
    let social = SwapSequence::between(neighbor_best, &next.position);
    let velocity = coefficients.ksi * &next.velocity
        + (coefficients.c1 * r1 * &cognitive + coefficients.c2 * r2 * &social);

    velocity.apply_in_place(&mut next.position);
    next.fitness = objective.cost(&next.position);
    next.velocity = velocity;
    next.neighbor_best = neighbor_best.to_vec();
    next
}

fn fittest<'a>(mut particles: impl Iterator<Item = &'a Particle>) -> &'a Particle {
    let first = particles.next().expect("neighborhoods are never empty");
    particles.fold(first, |best, p| if p.fitness < best.fitness { p } else { best })
}
