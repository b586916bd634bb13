//! optimization — streaming optimizers, threshold machinery, and error surface.
//!
//! Purpose
//! -------
//! Provide single-pass optimizers that select at most `K` elements from a
//! stream so as to maximize a monotone submodular objective, under bounded
//! memory and without revisiting earlier elements.
//!
//! Key behaviors
//! -------------
//! - [`SubmodularOptimizer`] (`optimizer`): the shared `next` / `fit` /
//!   `solution` / `fval` surface.
//! - [`Sieve`] (`sieve`): fixed-threshold acceptance engine, driven only by
//!   the ensemble.
//! - [`SieveStreaming`] (`sieve_streaming`): one sieve per rung of a
//!   `(1 + ε)` threshold ladder over `[m, K·m]`; publishes the best sieve.
//! - [`ThreeSieves`] (`three_sieves`): a single threshold starting at `K·m`
//!   that decays after `T` consecutive rejections.
//! - Shared machinery: acceptance bookkeeping (`state`), ladder and decay
//!   rules (`threshold`), validated configuration (`options`,
//!   `validation`), and the [`SsmError`] / [`SsmResult`] surface
//!   (`errors`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Every optimizer enforces `|S| ≤ K`; solutions are append-only within a
//!   run and `fval` only changes by accepted gains.
//! - Elements are processed strictly in arrival order; the decision on
//!   element `i` depends only on elements `1..i−1`.
//! - Construction validates all parameters; after that, `next` cannot fail.
//!
//! Conventions
//! -----------
//! - Acceptance test shared by every engine: gain
//!   `Δ = f(S ∪ {x}) − f(S)` is accepted iff
//!   `Δ ≥ (v/2 − f(S)) / (K − |S|)` for the engine's threshold `v`.
//! - Execution is synchronous and single-threaded; no internal locking.
//! - Optimizers emit `tracing` events (`debug!` for construction and
//!   threshold decay, `trace!` per accepted element); installing a
//!   subscriber is up to the caller.
//!
//! Downstream usage
//! ----------------
//! - Build [`ThresholdOptions`] once, pick an optimizer, then call `next`
//!   per element or `fit` on a batch (rows are elements), and read
//!   `solution()` / `fval()`.
//! - `use rust_ssm::optimization::prelude::*;` brings in the whole surface.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its local behavior.
//! - `tests/integration_streaming_pipeline.rs` drives the optimizers end to
//!   end with a stateful coverage objective and a closure objective.

pub mod errors;
pub mod optimizer;
pub mod options;
pub mod sieve;
pub mod sieve_streaming;
pub mod state;
pub mod three_sieves;
pub mod threshold;
pub mod validation;

pub use self::errors::{SsmError, SsmResult};
pub use self::optimizer::SubmodularOptimizer;
pub use self::options::{ThresholdOptions, ThresholdStrategy};
pub use self::sieve::Sieve;
pub use self::sieve_streaming::SieveStreaming;
pub use self::three_sieves::ThreeSieves;
pub use self::threshold::{threshold_ladder, ThresholdDecay};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_ssm::optimization::prelude::*;
//
// to import the optimizer surface in a single line.

pub mod prelude {
    pub use super::errors::{SsmError, SsmResult};
    pub use super::optimizer::SubmodularOptimizer;
    pub use super::options::{ThresholdOptions, ThresholdStrategy};
    pub use super::sieve_streaming::SieveStreaming;
    pub use super::three_sieves::ThreeSieves;
    pub use crate::objective::prelude::*;
}
