//! Objective capability consumed by every streaming optimizer.
//!
//! - [`SubmodularFunction`]: trait users implement for their objective.
//!
//! Convention: `peek` and `update` both receive the *current* solution and
//! the candidate `x`; `peek` returns the value of `solution ∪ {x}` (not the
//! marginal gain). Optimizers derive the gain by subtracting their own
//! running value.
use ndarray::ArrayView1;

use crate::objective::types::Element;

/// User-implemented submodular objective.
///
/// Required:
/// - `peek(&[Element], x) -> f64`: value of the current solution extended
///   by `x`. May touch internal scratch state (e.g. a cached kernel
///   matrix) but must not commit `x`.
/// - `update(&[Element], x)`: commit `x` to the internal running state.
///   Called exactly once for every accepted element, right before the
///   optimizer appends `x` to its solution.
/// - `clone_box() -> Box<dyn SubmodularFunction>`: produce an independent
///   copy. Every optimizer owns its own copy, so stateful objectives must
///   copy everything that `peek`/`update` mutate.
///
/// Objectives are `Send` so an optimizer can be moved to another thread;
/// calls on one optimizer are always serialized through `&mut self`.
pub trait SubmodularFunction: Send {
    fn peek(&mut self, solution: &[Element], x: ArrayView1<'_, f64>) -> f64;
    fn update(&mut self, solution: &[Element], x: ArrayView1<'_, f64>);
    fn clone_box(&self) -> Box<dyn SubmodularFunction>;
}

impl Clone for Box<dyn SubmodularFunction> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
