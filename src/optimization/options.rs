//! optimization::options — threshold configuration for the streaming optimizers.
//!
//! Purpose
//! -------
//! Collect the knobs that decide how acceptance thresholds are guessed and
//! revised: the lower value estimate `m`, the spacing/decay parameter `ε`,
//! and the decay strategy of the adaptive optimizer.
//!
//! Key behaviors
//! -------------
//! - [`ThresholdOptions`]: validated `(m, ε)` pair shared by
//!   `SieveStreaming` (ladder over `[m, K·m]` with ratio `1 + ε`) and
//!   `ThreeSieves` (initial threshold `K·m`, decay driven by `ε`).
//! - [`ThresholdStrategy`]: decay strategy tag, parsable from the
//!   case-insensitive names accepted by the Python surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed [`ThresholdOptions`] always has finite `m > 0` and
//!   finite `ε > 0`.
//! - Strategy parsing never fails: `"sieve"` (any case) selects
//!   geometric decay, every other name selects linear decay.
//!
//! Testing notes
//! -------------
//! - Unit tests check validation of `(m, ε)` and the name → strategy
//!   mapping, including case-insensitivity and the fallback.
use std::{convert::Infallible, str::FromStr};

use crate::optimization::{
    errors::SsmResult,
    validation::{validate_epsilon, validate_lower_bound},
};

/// Validated threshold parameters.
///
/// Fields (read through [`m`](Self::m) and [`epsilon`](Self::epsilon)):
/// - `m`: lower estimate of the value a single element can contribute.
/// - `epsilon`: ladder ratio is `1 + epsilon`; also the decay parameter.
///
/// Constructor:
/// - `new(m, epsilon) -> SsmResult<Self>`; both values must be finite and
///   strictly positive. Optimizer constructors re-run [`validate`](Self::validate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdOptions {
    m: f64,
    epsilon: f64,
}

impl ThresholdOptions {
    /// Construct validated threshold options.
    ///
    /// # Errors
    /// - [`SsmError::InvalidLowerBound`](crate::optimization::errors::SsmError::InvalidLowerBound)
    ///   for non-finite or non-positive `m`.
    /// - [`SsmError::InvalidEpsilon`](crate::optimization::errors::SsmError::InvalidEpsilon)
    ///   for non-finite or non-positive `epsilon`.
    pub fn new(m: f64, epsilon: f64) -> SsmResult<Self> {
        let opts = Self { m, epsilon };
        opts.validate()?;
        Ok(opts)
    }

    /// Check `m` before `ε`, with the same errors as [`new`](Self::new).
    pub fn validate(&self) -> SsmResult<()> {
        validate_lower_bound(self.m)?;
        validate_epsilon(self.epsilon)
    }

    pub fn m(&self) -> f64 {
        self.m
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Upper estimate of the optimum for cardinality `k`, i.e. `k·m`.
    pub fn upper(&self, k: usize) -> f64 {
        k as f64 * self.m
    }
}

/// Threshold decay strategy of the adaptive optimizer.
///
/// Variants:
/// - `GeometricDecay`: step down to the next rung of the `(1 + ε)` ladder.
/// - `LinearDecay`: drop the threshold to `ε`.
///
/// Parsing:
/// `From<&str>` / `FromStr` accept any name; `"sieve"` in any case maps to
/// `GeometricDecay`, everything else to `LinearDecay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdStrategy {
    GeometricDecay,
    LinearDecay,
}

impl From<&str> for ThresholdStrategy {
    fn from(name: &str) -> Self {
        if name.to_lowercase() == "sieve" {
            ThresholdStrategy::GeometricDecay
        } else {
            ThresholdStrategy::LinearDecay
        }
    }
}

impl FromStr for ThresholdStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ThresholdStrategy::from(s))
    }
}
