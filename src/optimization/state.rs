//! optimization::state — solution/value bookkeeping shared by single-threshold optimizers.
//!
//! Purpose
//! -------
//! Own everything a single acceptance engine needs between stream steps:
//! the cardinality bound, its private objective copy, the accepted
//! solution, its running value, and whether it has seen any element yet.
//!
//! Key behaviors
//! -------------
//! - [`OptimizerState::new`] validates `K ≥ 1` and clones the objective so
//!   the state never aliases a caller's stateful objective.
//! - [`OptimizerState::offer`] runs the size-adjusted threshold test
//!   `Δ ≥ (threshold/2 − fval) / (K − |S|)` and commits on success.
//!
//! Invariants & assumptions
//! ------------------------
//! - `solution.len() ≤ k` at all times; `offer` is a no-op on a full
//!   solution.
//! - `solution` is append-only and `fval` only changes by the accepted
//!   gain, so rejections leave the state untouched.
//! - `update` is called on the objective exactly once per accepted
//!   element, before the element is appended.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the acceptance boundary (`Δ == τ` accepts), the full
//!   solution no-op, and objective-copy independence.
use ndarray::ArrayView1;

use crate::{
    objective::{Element, Solution, SubmodularFunction},
    optimization::{
        errors::{SsmError, SsmResult},
        validation::validate_cardinality,
    },
};

/// Mutable state of one acceptance engine.
pub struct OptimizerState {
    k: usize,
    objective: Box<dyn SubmodularFunction>,
    solution: Solution,
    fval: f64,
    is_fitted: bool,
}

impl OptimizerState {
    /// Build an empty state owning a fresh copy of `objective`.
    ///
    /// # Errors
    /// - [`SsmError::InvalidCardinality`] if `k == 0`.
    pub fn new(k: usize, objective: &dyn SubmodularFunction) -> SsmResult<Self> {
        validate_cardinality(k)?;
        Ok(Self {
            k,
            objective: objective.clone_box(),
            solution: Vec::with_capacity(k),
            fval: 0.0,
            is_fitted: false,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn fval(&self) -> f64 {
        self.fval
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    pub fn is_full(&self) -> bool {
        self.solution.len() >= self.k
    }

    pub fn mark_fitted(&mut self) {
        self.is_fitted = true;
    }

    /// Accepted elements so far, regardless of the fitted flag.
    pub fn accepted(&self) -> &[Element] {
        &self.solution
    }

    /// Accepted elements, or [`SsmError::NotFitted`] before the first step.
    pub fn solution(&self) -> SsmResult<&[Element]> {
        if !self.is_fitted {
            return Err(SsmError::NotFitted);
        }
        Ok(&self.solution)
    }

    /// Offer `x` against `threshold`; returns `true` if it was accepted.
    ///
    /// Computes the gain `Δ = peek(S, x) − fval` and the bar
    /// `τ = (threshold/2 − fval) / (K − |S|)`. On `Δ ≥ τ` the objective is
    /// updated, `x` is appended and `fval` grows by `Δ`.
    pub fn offer(&mut self, threshold: f64, x: ArrayView1<'_, f64>) -> bool {
        let current = self.solution.len();
        if current >= self.k {
            return false;
        }
        let gain = self.objective.peek(&self.solution, x) - self.fval;
        let tau = (threshold / 2.0 - self.fval) / (self.k - current) as f64;
        if gain >= tau {
            self.objective.update(&self.solution, x);
            self.solution.push(x.to_owned());
            self.fval += gain;
            tracing::trace!(threshold, gain, tau, size = self.solution.len(), "accepted element");
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for OptimizerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimizerState")
            .field("k", &self.k)
            .field("size", &self.solution.len())
            .field("fval", &self.fval)
            .field("is_fitted", &self.is_fitted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::test_support::{modular, Coverage};
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // A zero cardinality bound is rejected at construction.
    fn new_rejects_zero_cardinality() {
        let f = modular();
        assert!(matches!(
            OptimizerState::new(0, &f),
            Err(SsmError::InvalidCardinality { k: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Fresh state has value 0 and refuses to hand out its solution.
    fn fresh_state_is_unfitted_with_zero_value() {
        // Arrange
        let f = modular();

        // Act
        let state = OptimizerState::new(3, &f).unwrap();

        // Assert
        assert_relative_eq!(state.fval(), 0.0);
        assert!(!state.is_fitted());
        assert_eq!(state.solution(), Err(SsmError::NotFitted));
        assert!(state.accepted().is_empty());
    }

    #[test]
    // Purpose
    // -------
    // The bar is inclusive: a gain equal to τ is accepted.
    //
    // Given
    // -----
    // - K = 2, threshold = 8, empty solution ⇒ τ = (4 − 0)/2 = 2.
    // - A candidate with gain exactly 2.
    //
    // Expect
    // ------
    // - Accepted, fval = 2, size 1.
    fn offer_accepts_gain_equal_to_bar() {
        // Arrange
        let f = modular();
        let mut state = OptimizerState::new(2, &f).unwrap();

        // Act
        let accepted = state.offer(8.0, array![2.0].view());

        // Assert
        assert!(accepted);
        assert_relative_eq!(state.fval(), 2.0);
        assert_eq!(state.accepted().len(), 1);
    }

    #[test]
    // Purpose
    // -------
    // Rejections leave solution and value untouched; a full solution
    // ignores every further candidate.
    //
    // Given
    // -----
    // - K = 1, threshold = 10 ⇒ τ = 5.
    // - Candidates with gains 4 (reject), 6 (accept), 100 (full).
    //
    // Expect
    // ------
    // - fval = 6 with exactly one element [6].
    fn offer_rejects_below_bar_and_ignores_when_full() {
        // Arrange
        let f = modular();
        let mut state = OptimizerState::new(1, &f).unwrap();

        // Act
        let first = state.offer(10.0, array![4.0].view());
        let value_after_reject = state.fval();
        let second = state.offer(10.0, array![6.0].view());
        let third = state.offer(10.0, array![100.0].view());

        // Assert
        assert!(!first);
        assert_relative_eq!(value_after_reject, 0.0);
        assert!(second);
        assert!(!third);
        assert!(state.is_full());
        assert_relative_eq!(state.fval(), 6.0);
        assert_eq!(state.accepted(), &[array![6.0]]);
    }

    #[test]
    // Purpose
    // -------
    // The state owns an independent copy of a stateful objective.
    //
    // Given
    // -----
    // - A `Coverage` objective held by the caller and a state built from it.
    //
    // Expect
    // ------
    // - Accepting through the state does not touch the caller's objective.
    fn state_clones_stateful_objective() {
        // Arrange
        let caller = Coverage::default();
        let mut state = OptimizerState::new(2, &caller).unwrap();

        // Act
        let accepted = state.offer(0.0, array![1.0, 1.0, 0.0].view());

        // Assert
        assert!(accepted);
        assert_relative_eq!(state.fval(), 2.0);
        assert_eq!(caller.updates, 0);
        assert!(caller.covered.is_empty());
    }
}
