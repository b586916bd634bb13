//! optimization::three_sieves — adaptive single-threshold streaming optimizer.
//!
//! Purpose
//! -------
//! Replace the whole ladder of sieves by one threshold that starts at the
//! optimistic guess `K·m` and is lowered whenever `T` consecutive elements
//! in a row were rejected. Memory and per-element cost stay those of a
//! single sieve.
//!
//! Key behaviors
//! -------------
//! - Per element, while the solution is not full:
//!   1. if the stall counter `t` reached the patience `T`, decay the
//!      threshold and reset `t`;
//!   2. run the sieve acceptance test against the current threshold;
//!   3. reset `t` on acceptance, increment it on rejection.
//! - The fitted flag is set after every element, including when the
//!   solution is already full.
//!
//! Invariants & assumptions
//! ------------------------
//! - `T ≥ 1`; the threshold only changes at the start of a step.
//! - With geometric decay the threshold moves strictly down the
//!   `(1 + ε)` ladder; with linear decay it drops to `ε` and stays there.
//!
//! Conventions
//! -----------
//! - The decay strategy is fixed at construction as a [`ThresholdDecay`]
//!   value carrying `ε`.
//!
//! Testing notes
//! -------------
//! - Unit tests replay the patience scenario (K = 1, m = 4, ε = 0.5, T = 2,
//!   linear decay), step geometric decay through a rejecting stream, and
//!   check construction errors.
use ndarray::ArrayView1;

use crate::{
    objective::{Element, SubmodularFunction},
    optimization::{
        errors::SsmResult,
        optimizer::SubmodularOptimizer,
        options::{ThresholdOptions, ThresholdStrategy},
        state::OptimizerState,
        threshold::ThresholdDecay,
        validation::validate_patience,
    },
};

/// ThreeSieves — single threshold with patience-triggered decay.
///
/// Parameters
/// ----------
/// - `k`: cardinality bound, `≥ 1`.
/// - `objective`: cloned on construction.
/// - `opts`: validated `(m, ε)`; initial threshold is `k·m`.
/// - `strategy`: decay strategy; build from a name with
///   `ThresholdStrategy::from("sieve")`.
/// - `patience`: number of consecutive rejections `T` tolerated before
///   the threshold decays, `≥ 1`.
#[derive(Debug)]
pub struct ThreeSieves {
    state: OptimizerState,
    threshold: f64,
    decay: ThresholdDecay,
    patience: usize,
    stall: usize,
}

impl ThreeSieves {
    /// # Errors
    /// - [`SsmError::InvalidCardinality`](crate::optimization::errors::SsmError::InvalidCardinality)
    ///   if `k == 0`.
    /// - [`SsmError::InvalidPatience`](crate::optimization::errors::SsmError::InvalidPatience)
    ///   if `patience == 0`.
    /// - [`SsmError::InvalidLowerBound`](crate::optimization::errors::SsmError::InvalidLowerBound)
    ///   or [`SsmError::InvalidEpsilon`](crate::optimization::errors::SsmError::InvalidEpsilon)
    ///   if `opts` fails [`ThresholdOptions::validate`].
    pub fn new(
        k: usize, objective: &dyn SubmodularFunction, opts: ThresholdOptions,
        strategy: ThresholdStrategy, patience: usize,
    ) -> SsmResult<Self> {
        validate_patience(patience)?;
        opts.validate()?;
        let state = OptimizerState::new(k, objective)?;
        let threshold = opts.upper(k);
        tracing::debug!(k, threshold, ?strategy, patience, "ThreeSieves ready");
        Ok(Self {
            state,
            threshold,
            decay: ThresholdDecay::new(strategy, opts.epsilon()),
            patience,
            stall: 0,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn strategy(&self) -> ThresholdStrategy {
        self.decay.strategy()
    }

    pub fn patience(&self) -> usize {
        self.patience
    }

    /// Consecutive rejections since the last acceptance or decay.
    pub fn stall_count(&self) -> usize {
        self.stall
    }
}

impl SubmodularOptimizer for ThreeSieves {
    fn next(&mut self, x: ArrayView1<'_, f64>) {
        if !self.state.is_full() {
            if self.stall >= self.patience {
                let previous = self.threshold;
                self.threshold = self.decay.apply(previous);
                self.stall = 0;
                tracing::debug!(from = previous, to = self.threshold, "threshold decayed");
            }
            if self.state.offer(self.threshold, x) {
                self.stall = 0;
            } else {
                self.stall += 1;
            }
        }
        self.state.mark_fitted();
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
