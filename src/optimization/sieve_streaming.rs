//! optimization::sieve_streaming — ensemble of sieves over a threshold ladder.
//!
//! Purpose
//! -------
//! Run one [`Sieve`] per rung of a geometric threshold ladder spanning the
//! caller's lower/upper estimate of the optimum, feed every element to all
//! of them, and publish the best sieve's solution as the ensemble result.
//!
//! Key behaviors
//! -------------
//! - Construction builds the ladder over `[m, K·m]` with ratio `1 + ε`
//!   (see [`threshold_ladder`]) and one sieve per rung, each with its own
//!   objective copy.
//! - `next(x)` feeds `x` to the sieves in ladder order. Right after each
//!   sieve processes `x`, a strictly larger value makes that sieve the
//!   champion; ties keep the previous champion.
//! - The published solution is the champion's solution as it stood when
//!   it last improved the ensemble value.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every sieve enforces `|S| ≤ K` itself; the ensemble never truncates.
//! - Sieve solutions are append-only, so the published solution is stored
//!   as `(champion index, prefix length)` and sliced on read instead of
//!   copied on every improvement.
//! - The ensemble is marked fitted after every `next`, even if no sieve
//!   accepted the element.
//!
//! Conventions
//! -----------
//! - Sieves are independent of each other; nothing here reads one sieve's
//!   state while another is processing.
//!
//! Testing notes
//! -------------
//! - Unit tests check ladder wiring, champion tracking against the owning
//!   sieve after every step, tie handling, and objective independence.
use ndarray::ArrayView1;

use crate::{
    objective::{Element, SubmodularFunction},
    optimization::{
        errors::{SsmError, SsmResult},
        optimizer::SubmodularOptimizer,
        options::ThresholdOptions,
        sieve::Sieve,
        threshold::threshold_ladder,
        validation::validate_cardinality,
    },
};

/// Champion bookkeeping: which sieve, and how many of its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Champion {
    index: usize,
    len: usize,
}

/// SieveStreaming — multi-threshold streaming optimizer.
///
/// Constructed via `SieveStreaming::new(k, objective, opts)`:
/// - `k`: cardinality bound, `≥ 1`.
/// - `objective`: cloned once per sieve.
/// - `opts`: validated `(m, ε)`; the ladder spans `[m, k·m]`.
#[derive(Debug)]
pub struct SieveStreaming {
    k: usize,
    sieves: Vec<Sieve>,
    champion: Option<Champion>,
    fval: f64,
    is_fitted: bool,
}

impl SieveStreaming {
    /// # Errors
    /// - [`SsmError::InvalidCardinality`] if `k == 0`.
    /// - [`SsmError::InvalidLowerBound`] / [`SsmError::InvalidEpsilon`] if
    ///   `opts` fails [`ThresholdOptions::validate`].
    /// - [`SsmError::ThresholdLadderTooLarge`] if the window holds too many rungs.
    /// - [`SsmError::EmptyThresholdLadder`] if `[m, k·m]` holds no rung.
    pub fn new(
        k: usize, objective: &dyn SubmodularFunction, opts: ThresholdOptions,
    ) -> SsmResult<Self> {
        validate_cardinality(k)?;
        opts.validate()?;
        let thresholds = threshold_ladder(opts.m(), opts.upper(k), opts.epsilon())?;
        let sieves = thresholds
            .into_iter()
            .map(|threshold| Sieve::new(k, objective, threshold))
            .collect::<SsmResult<Vec<_>>>()?;
        tracing::debug!(
            k,
            m = opts.m(),
            epsilon = opts.epsilon(),
            sieves = sieves.len(),
            "SieveStreaming ready"
        );
        Ok(Self { k, sieves, champion: None, fval: 0.0, is_fitted: false })
    }

    pub fn sieves(&self) -> &[Sieve] {
        &self.sieves
    }

    pub fn thresholds(&self) -> Vec<f64> {
        self.sieves.iter().map(Sieve::threshold).collect()
    }

    /// Index of the sieve currently backing the published solution.
    pub fn champion(&self) -> Option<usize> {
        self.champion.map(|c| c.index)
    }

    fn published(&self) -> &[Element] {
        match self.champion {
            Some(Champion { index, len }) => &self.sieves[index].accepted()[..len],
            None => &[],
        }
    }
}

impl SubmodularOptimizer for SieveStreaming {
    fn next(&mut self, x: ArrayView1<'_, f64>) {
        for (index, sieve) in self.sieves.iter_mut().enumerate() {
            sieve.next(x);
            if sieve.fval() > self.fval {
                self.fval = sieve.fval();
                self.champion = Some(Champion { index, len: sieve.accepted().len() });
            }
        }
        self.is_fitted = true;
    }

    fn solution(&self) -> SsmResult<&[Element]> {
        if !self.is_fitted {
            return Err(SsmError::NotFitted);
        }
        Ok(self.published())
    }

    fn fval(&self) -> f64 {
        self.fval
    }

    fn k(&self) -> usize {
        self.k
    }

    fn is_fitted(&self) -> bool {
        self.is_fitted
    }
}
