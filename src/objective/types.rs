//! objective::types — shared element and solution aliases.
//!
//! Centralizes the numeric shapes that flow between objectives and
//! optimizers so the rest of the crate never spells out `ndarray`
//! generics directly.
use ndarray::Array1;

/// One candidate from the data stream.
///
/// Alias for `ndarray::Array1<f64>`; every element of a stream is expected
/// to share the same length, but nothing in the optimizers depends on it.
pub type Element = Array1<f64>;

/// Ordered sequence of accepted elements.
///
/// Optimizers only ever append to a solution during a run, so a prefix of
/// a solution is itself a valid earlier solution.
pub type Solution = Vec<Element>;
