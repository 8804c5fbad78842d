use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::swarm::{Coefficients, Topology};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientPreset {
    /// ksi = 0.7298844, c1 = c2 = 2.05
    Constriction,
    /// ksi = 0.7, c1 = c2 = 1.47
    Usual,
}

impl CoefficientPreset {
    pub fn coefficients(self) -> Coefficients {
        match self {
            CoefficientPreset::Constriction => Coefficients::CONSTRICTION,
            CoefficientPreset::Usual => Coefficients::USUAL,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TopologyKind {
    Ring,
    Global,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Params {
    /// Which coefficient set `ksi`, `c1` and `c2` default to
    pub coefficients: CoefficientPreset,

    /// Damping applied to the previous velocity
    pub ksi: f64,

    /// Pull towards the particle's own best tour
    pub c1: f64,

    /// Pull towards the neighborhood's best tour
    pub c2: f64,

    /// Number of particles, fixed for the whole run
    /// Defaults to 10 + 2 * ceil(sqrt(nb_nodes))
    pub swarm_size: usize,

    /// Termination criterion: total number of iterations
    /// Defaults to 1000 * max(nb_nodes, 1)
    pub num_iterations: usize,

    /// Ring neighborhoods or a single global one
    pub topology: TopologyKind,

    /// Ring neighborhood size, ignored by the global topology
    pub neighbors: usize,

    /// Number of iterations between convergence samples
    /// Only impacts the recorded history, not the search
    pub sampling_interval: usize,
}

impl Params {
    pub fn defaults(nb_nodes: usize) -> Self {
        Self::preset(CoefficientPreset::Constriction, nb_nodes)
    }

    fn preset(coefficients: CoefficientPreset, nb_nodes: usize) -> Self {
        let Coefficients { ksi, c1, c2 } = coefficients.coefficients();
        Self {
            coefficients,
            ksi,
            c1,
            c2,
            swarm_size: 10 + 2 * (nb_nodes as f64).sqrt().ceil() as usize,
            num_iterations: 1000 * nb_nodes.max(1),
            topology: TopologyKind::Ring,
            neighbors: 3,
            sampling_interval: 10,
        }
    }

    /// Start from the defaults for `nb_nodes`.
    /// If `coefficients` is provided, load that preset's ksi, c1 and c2
    /// Then update any remaining user key and validate the result
    pub fn initialize(
        hyperparameters: &Option<Map<String, Value>>,
        nb_nodes: usize,
    ) -> Result<Self> {
        let mut base_params = Self::defaults(nb_nodes);

        if let Some(v) = hyperparameters.as_ref().and_then(|m| m.get("coefficients")) {
            let preset: CoefficientPreset = serde_json::from_value(v.clone())
                .map_err(|e| anyhow!("Invalid hyperparameter 'coefficients': {}", e))?;
            base_params = Self::preset(preset, nb_nodes);
        }

        let mut merged_params = serde_json::to_value(base_params)?;
        if let (Value::Object(ref mut obj), Some(map)) = (&mut merged_params, hyperparameters) {
            for (k, v) in map {
                obj.insert(k.clone(), v.clone());
            }
        }

        let params: Params = serde_json::from_value(merged_params)
            .map_err(|e| anyhow!("Invalid hyperparameters: {}", e))?;
        params.validate()?;

        tracing::debug!(?params, "swarm parameters");
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("ksi", self.ksi), ("c1", self.c1), ("c2", self.c2)] {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!(
                    "Hyperparameter '{}' must be a finite non-negative number, got {}",
                    name,
                    value
                ));
            }
        }
        if self.swarm_size == 0 {
            return Err(anyhow!("Hyperparameter 'swarm_size' must be at least 1"));
        }
        if self.num_iterations == 0 {
            return Err(anyhow!("Hyperparameter 'num_iterations' must be at least 1"));
        }
        if self.topology == TopologyKind::Ring && self.neighbors == 0 {
            return Err(anyhow!(
                "Hyperparameter 'neighbors' must be at least 1 for the ring topology"
            ));
        }
        if self.topology == TopologyKind::Ring && self.neighbors >= self.swarm_size {
            return Err(anyhow!(
                "Hyperparameter 'neighbors' must be below 'swarm_size' ({}) on a ring, got {}",
                self.swarm_size,
                self.neighbors
            ));
        }
        if self.sampling_interval == 0 {
            return Err(anyhow!("Hyperparameter 'sampling_interval' must be at least 1"));
        }
        Ok(())
    }

    pub fn topology(&self) -> Topology {
        match self.topology {
            TopologyKind::Ring => Topology::Ring {
                neighbors: self.neighbors,
            },
            TopologyKind::Global => Topology::Global,
        }
    }

    pub fn coefficients(&self) -> Coefficients {
        Coefficients {
            ksi: self.ksi,
            c1: self.c1,
            c2: self.c2,
        }
    }
}
