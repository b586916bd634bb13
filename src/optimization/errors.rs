//! optimization::errors — configuration and usage errors for streaming optimizers.
//!
//! Purpose
//! -------
//! Provide the single error enum and result alias shared by every
//! optimizer in the crate, together with a conversion layer to Python
//! exceptions for the PyO3 bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`SsmError`] and [`SsmResult`] as the canonical error and result
//!   types for construction-time validation and misuse of the optimizer
//!   API.
//! - Attach human-readable `Display` messages that embed the offending
//!   value, so callers can report failures without extra context.
//! - Map configuration errors to `ValueError` and usage errors to
//!   `RuntimeError` at the Python boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every variant is raised at the point of violation and never recovered
//!   locally; there are no transient failures and therefore no retries.
//! - Element-level rejection inside `next` is a normal outcome and never
//!   produces an error.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages carry their payloads.
//! - The PyO3 conversion is exercised from Python, not here.

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyRuntimeError, PyValueError},
    PyErr,
};

/// Crate-wide result alias for optimizer operations.
pub type SsmResult<T> = Result<T, SsmError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SsmError {
    // ---- Configuration ----
    /// Cardinality bound must be at least one.
    InvalidCardinality {
        k: usize,
        reason: &'static str,
    },

    /// Ladder spacing / decay parameter must be finite and strictly positive.
    InvalidEpsilon {
        epsilon: f64,
        reason: &'static str,
    },

    /// Lower estimate of the per-element value must be finite and strictly positive.
    InvalidLowerBound {
        m: f64,
        reason: &'static str,
    },

    /// `[m, K·m]` is too narrow to hold a single ladder rung for this epsilon.
    EmptyThresholdLadder {
        lower_index: i64,
        upper_index: i64,
        epsilon: f64,
    },

    /// `[m, K·m]` spans more rungs than a ladder may hold.
    ThresholdLadderTooLarge {
        rungs: i64,
        limit: i64,
        epsilon: f64,
    },

    /// Patience window must be at least one step.
    InvalidPatience {
        patience: usize,
        reason: &'static str,
    },

    // ---- Usage ----
    /// Solution requested before any `next` / `fit` call.
    NotFitted,

    /// Operation not offered by this optimizer.
    UnsupportedOperation {
        operation: &'static str,
        reason: &'static str,
    },
}

impl SsmError {
    /// `true` for errors raised while validating construction parameters.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, SsmError::NotFitted | SsmError::UnsupportedOperation { .. })
    }
}

impl std::error::Error for SsmError {}

impl std::fmt::Display for SsmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            SsmError::InvalidCardinality { k, reason } => {
                write!(f, "Invalid cardinality bound K = {k}: {reason}")
            }
            SsmError::InvalidEpsilon { epsilon, reason } => {
                write!(f, "Invalid epsilon {epsilon}: {reason}")
            }
            SsmError::InvalidLowerBound { m, reason } => {
                write!(f, "Invalid lower value estimate m = {m}: {reason}")
            }
            SsmError::EmptyThresholdLadder { lower_index, upper_index, epsilon } => {
                write!(
                    f,
                    "Lower threshold boundary ({lower_index}) is higher than or equal to the \
                     upper boundary ({upper_index}), epsilon = {epsilon}"
                )
            }
            SsmError::ThresholdLadderTooLarge { rungs, limit, epsilon } => {
                write!(
                    f,
                    "Threshold ladder would hold {rungs} rungs, more than the limit of {limit}; \
                     increase epsilon = {epsilon} or narrow [m, K*m]"
                )
            }
            SsmError::InvalidPatience { patience, reason } => {
                write!(f, "Invalid patience T = {patience}: {reason}")
            }

            // ---- Usage ----
            SsmError::NotFitted => {
                write!(
                    f,
                    "Optimizer was not fitted yet! Call fit() or next() before requesting the solution"
                )
            }
            SsmError::UnsupportedOperation { operation, reason } => {
                write!(f, "Unsupported operation '{operation}': {reason}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SsmError> for PyErr {
    fn from(err: SsmError) -> PyErr {
        if err.is_configuration() {
            PyValueError::new_err(format!("SsmError: {err}"))
        } else {
            PyRuntimeError::new_err(format!("SsmError: {err}"))
        }
    }
}
