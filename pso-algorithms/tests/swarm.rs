use pso_algorithms::travelling_salesman::swap_swarm::*;
use pso_algorithms::travelling_salesman::swap_swarm::swarm::move_particle;
use pso_challenges::travelling_salesman::{is_permutation, Challenge, Difficulty};
use rand::{rngs::SmallRng, SeedableRng};

/// Number of cities out of place, zero for the identity tour.
struct Displacement(usize);

impl Objective for Displacement {
    fn num_nodes(&self) -> usize {
        self.0
    }

    fn cost(&self, route: &[usize]) -> f64 {
        route.iter().enumerate().filter(|(i, c)| *i != **c).count() as f64
    }
}

fn particle_with_fitness(position: Vec<usize>, fitness: f64) -> Particle {
    let mut particle = Particle::at(&Displacement(position.len()), position);
    particle.fitness = fitness;
    particle.best_fitness = fitness;
    particle
}

#[test]
fn test_new_particle_starts_at_its_personal_best() {
    let mut rng = SmallRng::seed_from_u64(0);
    let objective = Displacement(12);
    let particle = Particle::new(&objective, &mut rng);
    assert!(is_permutation(&particle.position, 12));
    assert!(particle.velocity.is_empty());
    assert_eq!(particle.fitness, objective.cost(&particle.position));
    assert_eq!(particle.best_position, particle.position);
    assert_eq!(particle.best_fitness, particle.fitness);
}

#[test]
fn test_personal_best_needs_strict_improvement() {
    let mut particle = particle_with_fitness(vec![0, 1, 2], 5.0);
    particle.position = vec![2, 1, 0];
    particle.fitness = 5.0;
    particle.update_personal_best();
    assert_eq!(particle.best_position, vec![0, 1, 2]);

    particle.fitness = 4.0;
    particle.update_personal_best();
    assert_eq!(particle.best_position, vec![2, 1, 0]);
    assert_eq!(particle.best_fitness, 4.0);

    particle.position = vec![1, 0, 2];
    particle.fitness = 9.0;
    particle.update_personal_best();
    assert_eq!(particle.best_position, vec![2, 1, 0]);
    assert_eq!(particle.best_fitness, 4.0);
}

#[test]
fn test_ring_neighbors_wrap_around() {
    let swarm = Swarm::from_particles(vec![
        particle_with_fitness(vec![0, 1, 2], 1.0),
        particle_with_fitness(vec![0, 2, 1], 7.0),
        particle_with_fitness(vec![1, 0, 2], 3.0),
        particle_with_fitness(vec![1, 2, 0], 3.0),
        particle_with_fitness(vec![2, 0, 1], 8.0),
    ]);
    let ring = Topology::Ring { neighbors: 2 };

    // 4 listens to 0 and 1
    assert_eq!(swarm.neighbor_best(4, ring).fitness, 1.0);
    // 1 listens to 2 and 3, which tie; the first in ring order wins
    assert_eq!(swarm.neighbor_best(1, ring).position, vec![1, 0, 2]);
    // 0 listens to 1 and 2, never to itself
    assert_eq!(swarm.neighbor_best(0, ring).position, vec![1, 0, 2]);

    assert_eq!(swarm.neighbor_best(3, Topology::Global).position, vec![0, 1, 2]);
    assert_eq!(swarm.best().fitness, 1.0);
}

#[test]
fn test_zero_velocity_keeps_position() {
    let objective = Displacement(4);
    let particle = Particle::at(&objective, vec![3, 2, 1, 0]);
    let moved = move_particle(
        &particle,
        &[0, 1, 2, 3],
        &objective,
        Coefficients::CONSTRICTION,
        (0.0, 0.0),
    );
    assert_eq!(moved.position, particle.position);
    assert!(moved.velocity.is_empty());
    assert_eq!(moved.neighbor_best, vec![0, 1, 2, 3]);
}

#[test]
fn test_velocity_update_follows_the_formula() {
    let objective = Displacement(4);
    let mut particle = Particle::at(&objective, vec![0, 1, 2, 3]);
    particle.velocity = SwapSequence::from_swaps(vec![(0, 1), (2, 3)]);
    particle.fitness = 1.0;
    particle.best_position = vec![1, 0, 2, 3];
    particle.best_fitness = 0.5;
    let neighbor_best = vec![3, 1, 2, 0];
    let coefficients = Coefficients {
        ksi: 0.5,
        c1: 1.0,
        c2: 1.0,
    };

    let moved = move_particle(&particle, &neighbor_best, &objective, coefficients, (1.0, 1.0));

    let expected = SwapSequence::from_swaps(vec![(0, 1)])
        + SwapSequence::between(&[1, 0, 2, 3], &[0, 1, 2, 3])
        + SwapSequence::between(&neighbor_best, &[0, 1, 2, 3]);
    assert_eq!(moved.velocity, expected);
    assert_eq!(moved.position, expected.apply(&[0, 1, 2, 3]));
    assert_eq!(moved.fitness, objective.cost(&moved.position));
    // 1.0 does not beat 0.5, the recorded best stays
    assert_eq!(moved.best_position, vec![1, 0, 2, 3]);
    assert_eq!(moved.best_fitness, 0.5);
}

#[test]
fn test_step_reads_the_old_snapshot_only() {
    let challenge =
        Challenge::generate_instance(&[3; 32], &Difficulty { num_nodes: 15 }).unwrap();
    let mut rng = SmallRng::seed_from_u64(11);
    let swarm = Swarm::initialize(8, &challenge, &mut rng);
    let before = swarm.clone();
    let ring = Topology::Ring { neighbors: 3 };
    let next = swarm.step(&challenge, ring, Coefficients::default(), &mut rng);

    assert_eq!(swarm, before);
    assert_eq!(next.len(), 8);
    for (i, particle) in next.particles().iter().enumerate() {
        assert!(is_permutation(&particle.position, 15));
        assert_eq!(particle.fitness, challenge.route_distance(&particle.position));
        let neighbor = before.neighbor_best(i, Topology::Ring { neighbors: 3 });
        assert_eq!(particle.neighbor_best, neighbor.best_position);
    }
}

#[test]
fn test_personal_best_is_the_running_minimum() {
    let challenge =
        Challenge::generate_instance(&[5; 32], &Difficulty { num_nodes: 20 }).unwrap();
    let mut rng = SmallRng::seed_from_u64(99);
    let mut swarm = Swarm::initialize(10, &challenge, &mut rng);
    let mut observed_min: Vec<f64> = swarm.particles().iter().map(|p| p.fitness).collect();

    for _ in 0..200 {
        let previous = swarm.clone();
        swarm = swarm.step(&challenge, Topology::Global, Coefficients::USUAL, &mut rng);
        for (i, (old, new)) in previous.particles().iter().zip(swarm.particles()).enumerate() {
            assert!(new.best_fitness <= old.best_fitness);
            assert_eq!(new.best_fitness, observed_min[i]);
            assert_eq!(challenge.route_distance(&new.best_position), new.best_fitness);
            observed_min[i] = observed_min[i].min(new.fitness);
        }
    }
}

#[test]
fn test_step_is_deterministic_for_a_seed() {
    let challenge =
        Challenge::generate_instance(&[9; 32], &Difficulty { num_nodes: 12 }).unwrap();
    let run = |seed: u64| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut swarm = Swarm::initialize(6, &challenge, &mut rng);
        for _ in 0..50 {
            let ring = Topology::Ring { neighbors: 2 };
            swarm = swarm.step(&challenge, ring, Coefficients::default(), &mut rng);
        }
        swarm
    };
    assert_eq!(run(1), run(1));
}
