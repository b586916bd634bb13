//! optimization::threshold — geometric threshold ladder and decay schedules.
//!
//! Purpose
//! -------
//! Hold the numeric core shared by the two streaming algorithms: the
//! `(1 + ε)`-spaced ladder of threshold guesses used by `SieveStreaming`
//! and the decay rules used by `ThreeSieves` when its patience runs out.
//!
//! Key behaviors
//! -------------
//! - [`threshold_ladder`] returns `(1 + ε)^i` for every integer
//!   `i ∈ [i_low, i_high)`, with `i_low = ⌈log(lower)/log(1 + ε)⌉` and
//!   `i_high` the largest rung strictly below `upper`.
//! - [`ThresholdDecay`] carries the decay strategy together with its
//!   `ε` and maps a current threshold to the next one.
//!
//! Invariants & assumptions
//! ------------------------
//! - `lower` and `upper` are positive; callers validate them through
//!   `ThresholdOptions`.
//! - When `log(upper)/log(1 + ε)` is a whole number the boundary rung is
//!   excluded. The same exclusion forces geometric decay to take a strict
//!   step down from a threshold that already sits on a rung.
//! - "Whole" means within a relative `1e-9` of an integer: rungs computed
//!   as `(1 + ε)^i` rarely give back exactly `i` through the logarithm.
//! - A ladder holds at most [`MAX_LADDER_RUNGS`] rungs.
//!
//! Conventions
//! -----------
//! - Logarithms are natural; only their ratio matters.
//! - Rung indices are `i64`, matching the reported ladder bounds in
//!   [`SsmError::EmptyThresholdLadder`].
//!
//! Testing notes
//! -------------
//! - Unit tests pin ladders for hand-checked `(lower, upper, ε)` triples,
//!   including the exact-boundary case, the degenerate-window error, and
//!   the decay sequences of both strategies.
use crate::optimization::{
    errors::{SsmError, SsmResult},
    options::ThresholdStrategy,
    validation::validate_epsilon,
};

/// Largest number of rungs a ladder may hold.
pub const MAX_LADDER_RUNGS: i64 = 1 << 20;

/// Relative distance under which a log-quotient counts as a whole rung index.
const RUNG_TOLERANCE: f64 = 1e-9;

/// Build the geometric ladder of threshold guesses over `[lower, upper]`.
///
/// # Returns
/// A strictly increasing vector of length `i_high − i_low`.
///
/// # Errors
/// - [`SsmError::InvalidEpsilon`] if `epsilon` is non-finite, ≤ 0, or too
///   small for `1 + ε` to differ from `1`.
/// - [`SsmError::EmptyThresholdLadder`] if `i_low ≥ i_high`, i.e. the
///   window is too narrow to contain a rung for this `epsilon`.
/// - [`SsmError::ThresholdLadderTooLarge`] if `i_high − i_low` exceeds
///   [`MAX_LADDER_RUNGS`].
pub fn threshold_ladder(lower: f64, upper: f64, epsilon: f64) -> SsmResult<Vec<f64>> {
    validate_epsilon(epsilon)?;
    let ratio = 1.0 + epsilon;
    let log_ratio = ratio.ln();

    let lower_index = rung_at_or_above(lower, log_ratio);
    let upper_index = rung_strictly_below(upper, log_ratio);

    if lower_index >= upper_index {
        return Err(SsmError::EmptyThresholdLadder { lower_index, upper_index, epsilon });
    }
    let rungs = upper_index.saturating_sub(lower_index);
    if rungs > MAX_LADDER_RUNGS {
        return Err(SsmError::ThresholdLadderTooLarge { rungs, limit: MAX_LADDER_RUNGS, epsilon });
    }

    let ladder: Vec<f64> = (lower_index..upper_index).map(|i| rung(ratio, i)).collect();
    tracing::debug!(
        lower,
        upper,
        epsilon,
        lower_index,
        upper_index,
        rungs = ladder.len(),
        "built threshold ladder"
    );
    Ok(ladder)
}

/// `ratio^index`.
fn rung(ratio: f64, index: i64) -> f64 {
    ratio.powf(index as f64)
}

/// Log-quotient of `value`, and its nearest integer when the quotient lies
/// within [`RUNG_TOLERANCE`] of it.
fn rung_quotient(value: f64, log_ratio: f64) -> (f64, Option<f64>) {
    let quotient = value.ln() / log_ratio;
    let nearest = quotient.round();
    let on_rung = (quotient - nearest).abs() <= RUNG_TOLERANCE * quotient.abs().max(1.0);
    (quotient, on_rung.then_some(nearest))
}

/// Index of the lowest ladder rung at or above `value`.
fn rung_at_or_above(value: f64, log_ratio: f64) -> i64 {
    match rung_quotient(value, log_ratio) {
        (_, Some(index)) => index as i64,
        (quotient, None) => quotient.ceil() as i64,
    }
}

/// Index of the highest ladder rung strictly below `value`.
///
/// `⌊log(value)/log_ratio⌋`, minus one when the quotient is a whole index.
fn rung_strictly_below(value: f64, log_ratio: f64) -> i64 {
    match rung_quotient(value, log_ratio) {
        (_, Some(index)) => index as i64 - 1,
        (quotient, None) => quotient.floor() as i64,
    }
}

/// Decay rule applied by the adaptive optimizer once its patience is exhausted.
///
/// Variants mirror [`ThresholdStrategy`] and carry the `epsilon` they need:
/// - `Geometric`: move to the next `(1 + ε)` rung strictly below the
///   current threshold.
/// - `Linear`: evaluate `threshold − (threshold − ε)`, which lands on `ε`
///   whatever the current threshold is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdDecay {
    Geometric { epsilon: f64 },
    Linear { epsilon: f64 },
}

impl ThresholdDecay {
    /// Bind a strategy tag to its decay parameter. `epsilon` is expected to
    /// be validated already.
    pub fn new(strategy: ThresholdStrategy, epsilon: f64) -> Self {
        match strategy {
            ThresholdStrategy::GeometricDecay => ThresholdDecay::Geometric { epsilon },
            ThresholdStrategy::LinearDecay => ThresholdDecay::Linear { epsilon },
        }
    }

    pub fn strategy(&self) -> ThresholdStrategy {
        match self {
            ThresholdDecay::Geometric { .. } => ThresholdStrategy::GeometricDecay,
            ThresholdDecay::Linear { .. } => ThresholdStrategy::LinearDecay,
        }
    }

    pub fn epsilon(&self) -> f64 {
        match *self {
            ThresholdDecay::Geometric { epsilon } | ThresholdDecay::Linear { epsilon } => epsilon,
        }
    }

    /// Next threshold after `current`.
    pub fn apply(&self, current: f64) -> f64 {
        match *self {
            ThresholdDecay::Geometric { epsilon } => {
                let ratio = 1.0 + epsilon;
                rung(ratio, rung_strictly_below(current, ratio.ln()))
            }
            // Literal form; collapses to `epsilon`.
            ThresholdDecay::Linear { epsilon } => current - (current - epsilon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Ladder contents, ordering and length for hand-checked windows.
    // - Exclusion of an upper boundary that falls exactly on a rung.
    // - Error reporting for invalid epsilon and empty windows.
    // - Both decay strategies.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A window that does not end on a rung keeps every rung below it.
    //
    // Given
    // -----
    // - lower = 1, upper = 10, ε = 1 (ratio 2).
    //
    // Expect
    // ------
    // - i_low = 0, i_high = ⌊log₂ 10⌋ = 3, ladder [1, 2, 4].
    fn ladder_lists_powers_of_ratio_inside_window() {
        // Act
        let ladder = threshold_ladder(1.0, 10.0, 1.0).unwrap();

        // Assert
        assert_eq!(ladder.len(), 3);
        for (got, want) in ladder.iter().zip([1.0, 2.0, 4.0]) {
            assert_relative_eq!(*got, want, max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // An upper boundary sitting exactly on a rung is excluded together
    // with the rung right below it.
    //
    // Given
    // -----
    // - lower = 1, upper = 4, ε = 1: log₂ 4 = 2 exactly.
    //
    // Expect
    // ------
    // - i_high = 2 − 1 = 1, ladder [1].
    fn ladder_excludes_exact_upper_boundary() {
        // Act
        let ladder = threshold_ladder(1.0, 4.0, 1.0).unwrap();

        // Assert
        assert_eq!(ladder.len(), 1);
        assert_relative_eq!(ladder[0], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Ladders are strictly increasing, consecutive powers of (1 + ε), with
    // length i_high − i_low.
    //
    // Given
    // -----
    // - lower = 0.5, upper = 50, ε = 0.1.
    //
    // Expect
    // ------
    // - Each rung divided by its predecessor equals 1.1.
    // - The first rung is ≥ lower and the last rung is < upper.
    fn ladder_is_strictly_increasing_with_constant_ratio() {
        // Act
        let ladder = threshold_ladder(0.5, 50.0, 0.1).unwrap();

        // Assert
        let log_ratio = 1.1_f64.ln();
        let i_low = (0.5_f64.ln() / log_ratio).ceil() as i64;
        let i_high = (50.0_f64.ln() / log_ratio).floor() as i64;
        assert_eq!(ladder.len(), (i_high - i_low) as usize);
        assert!(ladder[0] >= 0.5 * (1.0 - 1e-12));
        assert!(*ladder.last().unwrap() < 50.0);
        for pair in ladder.windows(2) {
            assert!(pair[1] > pair[0]);
            assert_relative_eq!(pair[1] / pair[0], 1.1, max_relative = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // A non-positive epsilon is a configuration error.
    fn ladder_rejects_non_positive_epsilon() {
        for eps in [0.0, -0.25] {
            assert!(matches!(
                threshold_ladder(1.0, 10.0, eps),
                Err(SsmError::InvalidEpsilon { .. })
            ));
        }
    }

    #[test]
    // Purpose
    // -------
    // A window too narrow to hold a rung is reported with its indices.
    //
    // Given
    // -----
    // - lower = 1, upper = 2, ε = 1: i_low = 0 and log₂ 2 = 1 exactly, so
    //   i_high = 0.
    //
    // Expect
    // ------
    // - `EmptyThresholdLadder { lower_index: 0, upper_index: 0, .. }`.
    fn ladder_rejects_degenerate_window() {
        // Act
        let err = threshold_ladder(1.0, 2.0, 1.0).unwrap_err();

        // Assert
        assert_eq!(
            err,
            SsmError::EmptyThresholdLadder { lower_index: 0, upper_index: 0, epsilon: 1.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Geometric decay takes strict steps down the ratio-2 ladder, even
    // from thresholds that sit exactly on a rung.
    //
    // Given
    // -----
    // - ε = 1, starting threshold 4.
    //
    // Expect
    // ------
    // - 4 → 2 → 1 → 0.5.
    fn geometric_decay_steps_to_next_lower_rung() {
        // Arrange
        let decay = ThresholdDecay::new(ThresholdStrategy::GeometricDecay, 1.0);
        let mut threshold = 4.0;

        // Act / Assert
        for want in [2.0, 1.0, 0.5] {
            threshold = decay.apply(threshold);
            assert_relative_eq!(threshold, want, max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // From a threshold between rungs, geometric decay lands on the rung
    // directly below it.
    fn geometric_decay_from_between_rungs_lands_on_floor_rung() {
        let decay = ThresholdDecay::new(ThresholdStrategy::GeometricDecay, 1.0);
        assert_relative_eq!(decay.apply(5.0), 4.0, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Linear decay collapses to epsilon regardless of the current value.
    //
    // Given
    // -----
    // - ε = 0.5 and current thresholds 4, 100 and 0.1.
    //
    // Expect
    // ------
    // - Every decayed threshold equals 0.5.
    fn linear_decay_assigns_epsilon() {
        // Arrange
        let decay = ThresholdDecay::new(ThresholdStrategy::LinearDecay, 0.5);

        // Act / Assert
        for current in [4.0, 100.0, 0.1] {
            assert_relative_eq!(decay.apply(current), 0.5, max_relative = 1e-12);
        }
        assert_eq!(decay.strategy(), ThresholdStrategy::LinearDecay);
        assert_relative_eq!(decay.epsilon(), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Geometric decay keeps stepping down for ratios whose powers are not
    // exact in floating point.
    //
    // Given
    // -----
    // - ε ∈ {0.1, 0.01, 0.05}, starting thresholds 1.5 and 7.3.
    // - 40 consecutive decays.
    //
    // Expect
    // ------
    // - Every decay lowers the threshold.
    // - From the second decay on, consecutive thresholds differ by exactly
    //   one rung, i.e. their ratio is 1 + ε.
    fn geometric_decay_never_stalls_on_inexact_rungs() {
        for epsilon in [0.1, 0.01, 0.05] {
            let decay = ThresholdDecay::new(ThresholdStrategy::GeometricDecay, epsilon);
            for start in [1.5, 7.3] {
                // Arrange
                let mut threshold = decay.apply(start);
                assert!(threshold < start);

                // Act / Assert
                for _ in 0..40 {
                    let next = decay.apply(threshold);
                    assert!(next < threshold, "stalled at {threshold} for epsilon = {epsilon}");
                    assert_relative_eq!(threshold / next, 1.0 + epsilon, max_relative = 1e-9);
                    threshold = next;
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // A lower bound sitting on an inexact rung keeps that rung.
    //
    // Given
    // -----
    // - ε = 0.1, lower = 1.1^5 computed in floating point, upper = 1.1^8.
    //
    // Expect
    // ------
    // - i_low = 5 and i_high = 8 − 1 = 7: both boundaries are treated as
    //   whole rung indices, ladder [1.1^5, 1.1^6].
    fn ladder_treats_inexact_rungs_as_boundaries() {
        // Act
        let ladder = threshold_ladder(1.1_f64.powi(5), 1.1_f64.powi(8), 0.1).unwrap();

        // Assert
        assert_eq!(ladder.len(), 2);
        for (got, power) in ladder.iter().zip(5..7) {
            assert_relative_eq!(*got, 1.1_f64.powi(power), max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // An absurdly wide window is refused instead of allocated.
    //
    // Given
    // -----
    // - lower = 1e-300, upper = 1e300, ε = 1e-9.
    //
    // Expect
    // ------
    // - `ThresholdLadderTooLarge` with the rung count above the limit.
    fn ladder_rejects_oversized_window() {
        // Act
        let err = threshold_ladder(1e-300, 1e300, 1e-9).unwrap_err();

        // Assert
        match err {
            SsmError::ThresholdLadderTooLarge { rungs, limit, .. } => {
                assert_eq!(limit, MAX_LADDER_RUNGS);
                assert!(rungs > limit);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
