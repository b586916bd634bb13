//! optimization::sieve — single fixed-threshold acceptance engine.
//!
//! A [`Sieve`] holds one threshold guess `v` for the optimum and accepts a
//! candidate whenever its marginal gain clears the size-adjusted bar
//! `(v/2 − fval) / (K − |S|)`. Sieves are driven element by element by
//! [`SieveStreaming`](crate::optimization::sieve_streaming::SieveStreaming);
//! batch fitting a bare sieve is refused.
use ndarray::{ArrayView1, ArrayView2};

use crate::{
    objective::{Element, SubmodularFunction},
    optimization::{
        errors::{SsmError, SsmResult},
        optimizer::SubmodularOptimizer,
        state::OptimizerState,
    },
};

/// Fixed-threshold acceptance engine.
///
/// Constructed via `Sieve::new(k, objective, threshold)`; the objective is
/// cloned so every sieve owns independent state.
#[derive(Debug)]
pub struct Sieve {
    state: OptimizerState,
    threshold: f64,
}

impl Sieve {
    /// # Errors
    /// - [`SsmError::InvalidCardinality`] if `k == 0`.
    pub fn new(k: usize, objective: &dyn SubmodularFunction, threshold: f64) -> SsmResult<Self> {
        Ok(Self { state: OptimizerState::new(k, objective)?, threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Accepted elements, available before the fitted flag is set.
    pub(crate) fn accepted(&self) -> &[Element] {
        self.state.accepted()
    }
}

impl SubmodularOptimizer for Sieve {
    fn next(&mut self, x: ArrayView1<'_, f64>) {
        self.state.offer(self.threshold, x);
        self.state.mark_fitted();
    }

    fn fit(&mut self, _data: ArrayView2<'_, f64>) -> SsmResult<()> {
        Err(SsmError::UnsupportedOperation {
            operation: "fit",
            reason: "Sieves are only meant to be driven element-wise through SieveStreaming.",
        })
    }

    fn solution(&self) -> SsmResult<&[Element]> {
        self.state.solution()
    }

    fn fval(&self) -> f64 {
        self.state.fval()
    }

    fn k(&self) -> usize {
        self.state.k()
    }

    fn is_fitted(&self) -> bool {
        self.state.is_fitted()
    }
}
