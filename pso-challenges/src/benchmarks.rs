//! Closed-form test functions for continuous optimizers.
//!
//! Formulas and usual search domains follow the Virtual Library of Simulation
//! Experiments (https://www.sfu.ca/~ssurjano/optimization.html). Every
//! function is evaluated as given, points outside the usual domain included.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{ChallengeError, Result};

/// Levy. Global minimum f(1, ..., 1) = 0 on [-10, 10]^D.
#[must_use]
pub fn levy(x: &[f64]) -> f64 {
    let w: Vec<f64> = x.iter().map(|xi| 1.0 + (xi - 1.0) / 4.0).collect();
    let Some((last, init)) = w.split_last() else {
        return 0.0;
    };
    let head = (PI * w[0]).sin().powi(2);
    let body: f64 = init
        .iter()
        .map(|wi| (wi - 1.0).powi(2) * (1.0 + 10.0 * (PI * wi + 1.0).sin().powi(2)))
        .sum();
    let tail = (last - 1.0).powi(2) * (1.0 + (2.0 * PI * last).sin().powi(2));
    head + body + tail
}

/// Sphere. Global minimum f(0, ..., 0) = 0 on [-5.12, 5.12]^D.
#[must_use]
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Griewank. Global minimum f(0, ..., 0) = 0 on [-600, 600]^D.
#[must_use]
pub fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi * xi).sum::<f64>() / 4000.0;
    let prod: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    1.0 + sum - prod
}

/// Dixon-Price. Global minimum 0 at x_i = 2^(-(2^i - 2) / 2^i) on [-10, 10]^D.
#[must_use]
pub fn dixon_price(x: &[f64]) -> f64 {
    let Some(first) = x.first() else {
        return 0.0;
    };
    let rest: f64 = x
        .windows(2)
        .enumerate()
        .map(|(i, w)| (i + 2) as f64 * (2.0 * w[1] * w[1] - w[0]).powi(2))
        .sum();
    (first - 1.0).powi(2) + rest
}

/// Rosenbrock. Global minimum f(1, ..., 1) = 0 on [-5, 10]^D.
#[must_use]
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}

/// Rastrigin. Global minimum f(0, ..., 0) = 0 on [-5.12, 5.12]^D.
#[must_use]
pub fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Schwefel. Global minimum f(420.9687, ..., 420.9687) ~ 0 on [-500, 500]^D.
#[must_use]
pub fn schwefel(x: &[f64]) -> f64 {
    418.9829 * x.len() as f64 - x.iter().map(|xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
}

/// Zakharov. Global minimum f(0, ..., 0) = 0 on [-5, 10]^D.
#[must_use]
pub fn zakharov(x: &[f64]) -> f64 {
    let squares: f64 = x.iter().map(|xi| xi * xi).sum();
    let weighted: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| 0.5 * (i + 1) as f64 * xi)
        .sum();
    squares + weighted.powi(2) + weighted.powi(4)
}

/// Booth. Global minimum f(1, 3) = 0 on [-10, 10]^2.
#[must_use]
pub fn booth(x: &[f64]) -> f64 {
    (x[0] + 2.0 * x[1] - 7.0).powi(2) + (2.0 * x[0] + x[1] - 5.0).powi(2)
}

/// Three-hump camel. Global minimum f(0, 0) = 0 on [-5, 5]^2.
#[must_use]
pub fn three_hump_camel(x: &[f64]) -> f64 {
    2.0 * x[0].powi(2) - 1.05 * x[0].powi(4) + x[0].powi(6) / 6.0 + x[0] * x[1] + x[1].powi(2)
}

/// Beale. Global minimum f(3, 0.5) = 0 on [-4.5, 4.5]^2.
#[must_use]
pub fn beale(x: &[f64]) -> f64 {
    (1.5 - x[0] + x[0] * x[1]).powi(2)
        + (2.25 - x[0] + x[0] * x[1].powi(2)).powi(2)
        + (2.625 - x[0] + x[0] * x[1].powi(3)).powi(2)
}

/// Matyas. Global minimum f(0, 0) = 0 on [-10, 10]^2.
#[must_use]
pub fn matyas(x: &[f64]) -> f64 {
    0.26 * (x[0].powi(2) + x[1].powi(2)) - 0.48 * x[0] * x[1]
}

/// McCormick. Global minimum f(-0.54719, -1.54719) = -1.9133.
#[must_use]
pub fn mccormick(x: &[f64]) -> f64 {
    (x[0] + x[1]).sin() + (x[0] - x[1]).powi(2) - 1.5 * x[0] + 2.5 * x[1] + 1.0
}

/// Goldstein-Price. Global minimum f(0, -1) = 3 on [-2, 2]^2.
#[must_use]
pub fn goldstein_price(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    let left = 1.0
        + (a + b + 1.0).powi(2)
            * (19.0 - 14.0 * a + 3.0 * a * a - 14.0 * b + 6.0 * a * b + 3.0 * b * b);
    let right = 30.0
        + (2.0 * a - 3.0 * b).powi(2)
            * (18.0 - 32.0 * a + 12.0 * a * a + 48.0 * b - 36.0 * a * b + 27.0 * b * b);
    left * right
}

/// Eggholder. Global minimum f(512, 404.2319) = -959.6407 on [-512, 512]^2.
#[must_use]
pub fn eggholder(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    -(b + 47.0) * (b + a / 2.0 + 47.0).abs().sqrt().sin() - a * (a - (b + 47.0)).abs().sqrt().sin()
}

/// Cross-in-tray. Four global minima f(+-1.34941, +-1.34941) = -2.06261.
#[must_use]
pub fn cross_in_tray(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    let exponent = (100.0 - (a * a + b * b).sqrt() / PI).abs();
    -0.0001 * ((a.sin() * b.sin() * exponent.exp()).abs() + 1.0).powf(0.1)
}

/// Drop-wave. Global minimum f(0, 0) = -1 on [-5.12, 5.12]^2.
#[must_use]
pub fn drop_wave(x: &[f64]) -> f64 {
    let r2 = x[0] * x[0] + x[1] * x[1];
    -(1.0 + (12.0 * r2.sqrt()).cos()) / (0.5 * r2 + 2.0)
}

/// Shubert. 18 global minima at -186.7309 on [-10, 10]^2.
#[must_use]
pub fn shubert(x: &[f64]) -> f64 {
    let axis = |xi: f64| -> f64 {
        (1..=5)
            .map(|i| {
                let i = i as f64;
                i * ((i + 1.0) * xi + i).cos()
            })
            .sum()
    };
    axis(x[0]) * axis(x[1])
}

/// Six-hump camel back. Global minima f(0.0898, -0.7126) = f(-0.0898, 0.7126) = -1.0316.
#[must_use]
pub fn six_hump_camel_back(x: &[f64]) -> f64 {
    let (a, b) = (x[0], x[1]);
    (4.0 - 2.1 * a * a + a.powi(4) / 3.0) * a * a + a * b + (-4.0 + 4.0 * b * b) * b * b
}

/// Branin with the recommended constants. Three global minima at 0.397887,
/// e.g. f(-pi, 12.275).
#[must_use]
pub fn branin(x: &[f64]) -> f64 {
    let a = 1.0;
    let b = 5.1 / (4.0 * PI * PI);
    let c = 5.0 / PI;
    let r = 6.0;
    let s = 10.0;
    let t = 1.0 / (8.0 * PI);
    a * (x[1] - b * x[0] * x[0] + c * x[0] - r).powi(2) + s * (1.0 - t) * x[0].cos() + s
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimensions {
    Any,
    Fixed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bounds {
    Uniform(f64, f64),
    PerAxis(&'static [(f64, f64)]),
}

/// Box constraints of a benchmark function, one entry per coordinate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Domain {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Domain {
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.lower.len()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(xi, (lo, hi))| (*lo..=*hi).contains(xi))
    }
}

#[derive(Clone, Copy)]
pub struct Benchmark {
    pub name: &'static str,
    pub dimensions: Dimensions,
    function: fn(&[f64]) -> f64,
    bounds: Bounds,
}

impl Benchmark {
    /// Panics if `x` is shorter than a fixed-dimension function expects.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        (self.function)(x)
    }

    /// Like `evaluate`, but rejects a point whose dimension the function does
    /// not support.
    pub fn try_evaluate(&self, x: &[f64]) -> Result<f64> {
        self.check_dimension(x.len())?;
        Ok((self.function)(x))
    }

    pub fn function(&self) -> fn(&[f64]) -> f64 {
        self.function
    }

    pub fn domain(&self, dim: usize) -> Result<Domain> {
        self.check_dimension(dim)?;
        let (lower, upper) = match self.bounds {
            Bounds::Uniform(lo, hi) => (vec![lo; dim], vec![hi; dim]),
            Bounds::PerAxis(axes) => axes.iter().copied().unzip(),
        };
        Ok(Domain { lower, upper })
    }

    fn check_dimension(&self, dim: usize) -> Result<()> {
        if dim == 0 {
            return Err(ChallengeError::invalid(format!(
                "{} needs at least one dimension",
                self.name
            )));
        }
        if let Dimensions::Fixed(expected) = self.dimensions {
            if dim != expected {
                return Err(ChallengeError::invalid(format!(
                    "{} is defined for {} dimensions, not {}",
                    self.name, expected, dim
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .field("dimensions", &self.dimensions)
            .field("bounds", &self.bounds)
            .finish()
    }
}

macro_rules! registry {
    ($( $name:ident : $dims:expr, $bounds:expr; )+) => {
        const REGISTRY: &[Benchmark] = &[
            $(
                Benchmark {
                    name: stringify!($name),
                    dimensions: $dims,
                    function: $name,
                    bounds: $bounds,
                },
            )+
        ];
    };
}

registry! {
    levy: Dimensions::Any, Bounds::Uniform(-10.0, 10.0);
    sphere: Dimensions::Any, Bounds::Uniform(-5.12, 5.12);
    griewank: Dimensions::Any, Bounds::Uniform(-600.0, 600.0);
    dixon_price: Dimensions::Any, Bounds::Uniform(-10.0, 10.0);
    rosenbrock: Dimensions::Any, Bounds::Uniform(-5.0, 10.0);
    rastrigin: Dimensions::Any, Bounds::Uniform(-5.12, 5.12);
    schwefel: Dimensions::Any, Bounds::Uniform(-500.0, 500.0);
    zakharov: Dimensions::Any, Bounds::Uniform(-5.0, 10.0);
    booth: Dimensions::Fixed(2), Bounds::Uniform(-10.0, 10.0);
    three_hump_camel: Dimensions::Fixed(2), Bounds::Uniform(-5.0, 5.0);
    beale: Dimensions::Fixed(2), Bounds::Uniform(-4.5, 4.5);
    matyas: Dimensions::Fixed(2), Bounds::Uniform(-10.0, 10.0);
    mccormick: Dimensions::Fixed(2), Bounds::Uniform(-1.5, 4.0);
    goldstein_price: Dimensions::Fixed(2), Bounds::Uniform(-2.0, 2.0);
    eggholder: Dimensions::Fixed(2), Bounds::Uniform(-512.0, 512.0);
    cross_in_tray: Dimensions::Fixed(2), Bounds::Uniform(-10.0, 10.0);
    drop_wave: Dimensions::Fixed(2), Bounds::Uniform(-5.12, 5.12);
    shubert: Dimensions::Fixed(2), Bounds::Uniform(-10.0, 10.0);
    six_hump_camel_back: Dimensions::Fixed(2), Bounds::Uniform(-3.0, 3.0);
    branin: Dimensions::Fixed(2), Bounds::PerAxis(&[(-5.0, 10.0), (0.0, 15.0)]);
}

/// Finds a benchmark by name, ignoring case.
pub fn lookup(name: &str) -> Result<&'static Benchmark> {
    REGISTRY
        .iter()
        .find(|b| b.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ChallengeError::UnknownFunction(name.to_string()))
}

pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|b| b.name)
}
