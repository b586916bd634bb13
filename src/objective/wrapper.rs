//! objective::wrapper — adapt a pure scoring function to [`SubmodularFunction`].
//!
//! Purpose
//! -------
//! Let callers hand a plain `Fn(&[Element]) -> f64` to any optimizer
//! instead of implementing the full objective trait. The function scores a
//! whole candidate set; the wrapper evaluates `solution ++ [x]` on every
//! `peek`.
//!
//! Key behaviors
//! -------------
//! - `peek` materializes the candidate set `solution ++ [x]` and scores it.
//! - `update` is a no-op: a pure function carries no running state.
//! - `clone_box` shares the underlying `Arc`, so every optimizer built from
//!   the same wrapper evaluates the same function object.
//!
//! Invariants & assumptions
//! ------------------------
//! - The wrapped function is side-effect free. Sharing it between
//!   optimizers is only sound because there is no divergent state to
//!   clone.
//!
//! Testing notes
//! -------------
//! - Unit tests check that `peek` scores the extended set, that `update`
//!   leaves scoring unchanged, and that clones alias one function.
use std::{fmt, sync::Arc};

use ndarray::ArrayView1;

use crate::objective::{traits::SubmodularFunction, types::Element};

/// Shared handle to a pure set-scoring function.
pub type ScoreFn = Arc<dyn Fn(&[Element]) -> f64 + Send + Sync>;

/// FunctionWrapper — stateless objective backed by a shared scoring function.
///
/// Constructed via:
/// - `FunctionWrapper::new(f)` from any closure or function item.
/// - `FunctionWrapper::from_arc(f)` when the caller already holds a
///   [`ScoreFn`] and wants to keep sharing it.
#[derive(Clone)]
pub struct FunctionWrapper {
    f: ScoreFn,
}

impl FunctionWrapper {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Element]) -> f64 + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    pub fn from_arc(f: ScoreFn) -> Self {
        Self { f }
    }

    /// Score an arbitrary set directly.
    pub fn evaluate(&self, set: &[Element]) -> f64 {
        (self.f)(set)
    }

    /// `true` if both wrappers evaluate the very same function object.
    pub fn shares_function_with(&self, other: &FunctionWrapper) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for FunctionWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionWrapper").field("handles", &Arc::strong_count(&self.f)).finish()
    }
}

impl SubmodularFunction for FunctionWrapper {
    fn peek(&mut self, solution: &[Element], x: ArrayView1<'_, f64>) -> f64 {
        let mut candidate = Vec::with_capacity(solution.len() + 1);
        candidate.extend_from_slice(solution);
        candidate.push(x.to_owned());
        (self.f)(&candidate)
    }

    fn update(&mut self, _solution: &[Element], _x: ArrayView1<'_, f64>) {}

    fn clone_box(&self) -> Box<dyn SubmodularFunction> {
        Box::new(self.clone())
    }
}
