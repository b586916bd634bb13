//! objective — the set-function capability optimized by every algorithm.
//!
//! Purpose
//! -------
//! Define the minimal interface a submodular objective has to expose so the
//! streaming optimizers can drive it: marginal-value evaluation, commit,
//! and independent copies. Concrete scoring logic (coverage, facility
//! location, log-determinants, ...) lives with the caller.
//!
//! Key behaviors
//! -------------
//! - [`SubmodularFunction`]: stateful objective trait (`peek`, `update`,
//!   `clone_box`).
//! - [`FunctionWrapper`]: adapter turning a pure `Fn(&[Element]) -> f64`
//!   into a [`SubmodularFunction`] whose clones share one function.
//! - [`Element`] / [`Solution`]: `ndarray`-backed aliases for candidates
//!   and accepted sets.
//! - [`PendingError`]: slot through which objectives backed by fallible
//!   foreign code hand their first failure to the owner.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives are monotone and submodular; nothing here checks this.
//! - An optimizer always owns its objective. Stateful objectives are cloned
//!   on construction; wrappers around pure functions share the function
//!   through an `Arc` because there is no state to diverge.
//!
//! Conventions
//! -----------
//! - `peek` returns a set value, not a delta. Optimizers compute the gain
//!   as `peek(solution, x) − fval`.
//! - This module performs no logging; optimizers report their own events.
//!
//! Downstream usage
//! ----------------
//! - Implement [`SubmodularFunction`] for a custom objective and pass
//!   `&objective` to `Sieve::new`, `SieveStreaming::new` or
//!   `ThreeSieves::new`.
//! - Or wrap a closure with [`FunctionWrapper::new`] and pass the wrapper.
//!
//! Testing notes
//! -------------
//! - `wrapper` carries unit tests for the adapter semantics; `pending`
//!   tests failure hand-off through a running optimizer.
//! - `test_support` (test builds only) provides a modular objective and a
//!   stateful coverage objective shared by the optimizer unit tests.

pub mod pending;
pub mod traits;
pub mod types;
pub mod wrapper;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::pending::PendingError;
pub use self::traits::SubmodularFunction;
pub use self::types::{Element, Solution};
pub use self::wrapper::{FunctionWrapper, ScoreFn};

pub mod prelude {
    pub use super::traits::SubmodularFunction;
    pub use super::types::{Element, Solution};
    pub use super::wrapper::{FunctionWrapper, ScoreFn};
}
