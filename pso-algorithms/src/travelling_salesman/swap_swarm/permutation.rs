//! Arithmetic on tours that stands in for vector arithmetic in continuous PSO.
//!
//! A velocity is an ordered list of transpositions. The difference of two tours
//! is the list of swaps turning one into the other, velocities add by
//! concatenation, scaling keeps a prefix, and moving a tour applies the swaps.

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

const UNSET: usize = usize::MAX;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapSequence(Vec<(usize, usize)>);

impl SwapSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_swaps(swaps: Vec<(usize, usize)>) -> Self {
        Self(swaps)
    }

    pub fn swaps(&self) -> &[(usize, usize)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The swaps that, applied to `from`, give `to`.
    ///
    /// Scans positions left to right; whenever the working copy disagrees with
    /// `to`, the wanted city is swapped in from wherever it currently sits. The
    /// result has at most `len - 1` swaps and is not necessarily minimal.
    ///
    /// Panics if `from` and `to` are not permutations of the same range.
    pub fn between(from: &[usize], to: &[usize]) -> Self {
        assert_eq!(
            from.len(),
            to.len(),
            "tours of different lengths cannot be subtracted"
        );
        let mut current = from.to_vec();
        let mut index_of = vec![UNSET; from.len()];
        for (i, &city) in from.iter().enumerate() {
            index_of[city] = i;
        }

        let mut swaps = Vec::new();
        for (i, &wanted) in to.iter().enumerate() {
            if current[i] == wanted {
                continue;
            }
            let j = index_of[wanted];
            assert!(j != UNSET, "city {} is missing from the tour", wanted);
            swaps.push((i, j));
            let displaced = current[i];
            current.swap(i, j);
            index_of[displaced] = j;
            index_of[wanted] = i;
        }
        Self(swaps)
    }

    /// Keeps the first `round(k * len)` swaps, halves rounding to even.
    /// Factors above one keep the whole sequence, negative or NaN factors
    /// keep nothing.
    pub fn scale(&self, k: f64) -> Self {
        let keep = (k * self.0.len() as f64).round_ties_even();
        let keep = if keep.is_nan() || keep <= 0.0 {
            0
        } else {
            (keep as usize).min(self.0.len())
        };
        Self(self.0[..keep].to_vec())
    }

    /// Concatenation, `self` first.
    pub fn then(mut self, other: SwapSequence) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn apply(&self, position: &[usize]) -> Vec<usize> {
        let mut moved = position.to_vec();
        self.apply_in_place(&mut moved);
        moved
    }

    pub fn apply_in_place(&self, position: &mut [usize]) {
        for &(i, j) in &self.0 {
            position.swap(i, j);
        }
    }
}

impl Add for SwapSequence {
    type Output = SwapSequence;

    fn add(self, rhs: SwapSequence) -> SwapSequence {
        self.then(rhs)
    }
}

impl Mul<&SwapSequence> for f64 {
    type Output = SwapSequence;

    fn mul(self, rhs: &SwapSequence) -> SwapSequence {
        rhs.scale(self)
    }
}
