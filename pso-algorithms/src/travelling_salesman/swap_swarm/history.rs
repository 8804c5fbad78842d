use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub iteration: usize,
    pub best_distance: f64,
}

/// Best-so-far distance sampled every `sampling_interval` iterations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConvergenceHistory {
    sampling_interval: usize,
    samples: Vec<Sample>,
}

impl ConvergenceHistory {
    pub fn new(sampling_interval: usize) -> Self {
        Self {
            sampling_interval: sampling_interval.max(1),
            samples: Vec::new(),
        }
    }

    pub fn record(&mut self, iteration: usize, best_distance: f64) {
        if iteration % self.sampling_interval == 0 {
            self.samples.push(Sample {
                iteration,
                best_distance,
            });
        }
    }

    pub fn sampling_interval(&self) -> usize {
        self.sampling_interval
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iterations(&self) -> impl Iterator<Item = usize> + '_ {
        self.samples.iter().map(|s| s.iteration)
    }

    pub fn best_distances(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.best_distance)
    }
}
