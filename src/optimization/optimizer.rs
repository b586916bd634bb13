//! Public optimizer surface shared by every streaming algorithm.
//!
//! - [`SubmodularOptimizer`]: streaming (`next`) and batch (`fit`) entry
//!   points plus read-only accessors.
//!
//! Convention: `next` never fails; rejecting an element is a normal
//! outcome. Only `fit` (for optimizers that refuse batch use) and
//! `solution` (before any element was seen) can return an error.
use ndarray::{ArrayView1, ArrayView2};

use crate::{objective::Element, optimization::errors::SsmResult};

/// Common interface of the streaming optimizers.
///
/// Required:
/// - `next(x)`: consume one element from the stream. Marks the optimizer
///   as fitted.
/// - `solution()`: accepted elements in arrival order; fails with
///   `SsmError::NotFitted` before the first `next` / `fit`.
/// - `fval()`: value of the current solution, `0.0` before fitting.
/// - `k()`, `is_fitted()`: cardinality bound and fitted flag.
///
/// Provided:
/// - `fit(data)`: feed every row of `data` to `next`, in order. An empty
///   batch leaves the optimizer unfitted.
pub trait SubmodularOptimizer {
    fn next(&mut self, x: ArrayView1<'_, f64>);
    fn solution(&self) -> SsmResult<&[Element]>;
    fn fval(&self) -> f64;
    fn k(&self) -> usize;
    fn is_fitted(&self) -> bool;

    fn fit(&mut self, data: ArrayView2<'_, f64>) -> SsmResult<()> {
        for x in data.rows() {
            self.next(x);
        }
        Ok(())
    }
}
