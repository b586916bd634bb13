//! Validation helpers for optimizer construction.
//!
//! This module centralizes the parameter checks shared by every optimizer
//! constructor:
//!
//! - **Cardinality**: [`validate_cardinality`] enforces `K ≥ 1`.
//! - **Epsilon**: [`validate_epsilon`] enforces a finite, strictly positive
//!   ladder spacing / decay parameter.
//! - **Lower estimate**: [`validate_lower_bound`] enforces a finite,
//!   strictly positive `m`.
//! - **Patience**: [`validate_patience`] enforces `T ≥ 1`.
//!
//! All helpers return the domain-specific [`SsmError`] variant for the
//! offending parameter so that constructors can simply chain them with `?`.
use crate::optimization::errors::{SsmError, SsmResult};

/// Validate the cardinality bound.
///
/// # Errors
/// Returns [`SsmError::InvalidCardinality`] if `k == 0`.
pub fn validate_cardinality(k: usize) -> SsmResult<()> {
    if k == 0 {
        return Err(SsmError::InvalidCardinality {
            k,
            reason: "K must be at least 1 so the solution can hold an element.",
        });
    }
    Ok(())
}

/// Validate `epsilon`, used both as ladder ratio `1 + ε` and as decay parameter.
///
/// # Errors
/// Returns [`SsmError::InvalidEpsilon`] if the value is non-finite, ≤ 0.0,
/// or so small that `1 + ε` rounds to `1`.
pub fn validate_epsilon(epsilon: f64) -> SsmResult<()> {
    if !epsilon.is_finite() {
        return Err(SsmError::InvalidEpsilon { epsilon, reason: "Epsilon must be finite." });
    }
    if epsilon <= 0.0 {
        return Err(SsmError::InvalidEpsilon {
            epsilon,
            reason: "Epsilon must be a positive real number.",
        });
    }
    if 1.0 + epsilon == 1.0 {
        return Err(SsmError::InvalidEpsilon {
            epsilon,
            reason: "Epsilon is too small to separate 1 + epsilon from 1.",
        });
    }
    Ok(())
}

/// Validate the lower estimate `m` of the per-element value.
///
/// # Errors
/// Returns [`SsmError::InvalidLowerBound`] if the value is non-finite or ≤ 0.0.
pub fn validate_lower_bound(m: f64) -> SsmResult<()> {
    if !m.is_finite() {
        return Err(SsmError::InvalidLowerBound { m, reason: "m must be finite." });
    }
    if m <= 0.0 {
        return Err(SsmError::InvalidLowerBound {
            m,
            reason: "m must be positive, its logarithm anchors the threshold ladder.",
        });
    }
    Ok(())
}

/// Validate the patience window of the adaptive optimizer.
///
/// # Errors
/// Returns [`SsmError::InvalidPatience`] if `patience == 0`.
pub fn validate_patience(patience: usize) -> SsmResult<()> {
    if patience == 0 {
        return Err(SsmError::InvalidPatience {
            patience,
            reason: "T must be at least 1 step.",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Reject a zero cardinality bound and accept any positive one.
    fn cardinality_must_be_positive() {
        assert!(matches!(validate_cardinality(0), Err(SsmError::InvalidCardinality { k: 0, .. })));
        assert!(validate_cardinality(1).is_ok());
        assert!(validate_cardinality(250).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Epsilon must be finite and strictly positive.
    //
    // Given
    // -----
    // - 0.0, -0.1, NaN, +∞ and 1e-17 (1 + ε rounds to 1) as invalid
    //   inputs; 1e-3 as valid input.
    //
    // Expect
    // ------
    // - `InvalidEpsilon` for every invalid input, `Ok` otherwise.
    fn epsilon_rejects_non_positive_and_non_finite() {
        for bad in [0.0, -0.1, f64::NAN, f64::INFINITY, 1e-17] {
            assert!(
                matches!(validate_epsilon(bad), Err(SsmError::InvalidEpsilon { .. })),
                "epsilon = {bad} should be rejected"
            );
        }
        assert!(validate_epsilon(1e-3).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `m` must be finite and strictly positive.
    fn lower_bound_rejects_non_positive_and_non_finite() {
        for bad in [0.0, -2.0, f64::NAN, f64::NEG_INFINITY] {
            assert!(
                matches!(validate_lower_bound(bad), Err(SsmError::InvalidLowerBound { .. })),
                "m = {bad} should be rejected"
            );
        }
        assert!(validate_lower_bound(0.5).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Patience must allow at least one rejected step.
    fn patience_must_be_positive() {
        assert!(matches!(
            validate_patience(0),
            Err(SsmError::InvalidPatience { patience: 0, .. })
        ));
        assert!(validate_patience(1).is_ok());
    }
}
