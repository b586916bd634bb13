//! Objectives used by the optimizer unit tests.
//!
//! - [`modular`]: pure function summing the first coordinate of every
//!   element, so an element `[g]` has marginal gain exactly `g`.
//! - [`Coverage`]: stateful max-coverage objective over 0/1 indicator
//!   vectors. It ignores the `solution` argument and relies entirely on its
//!   own running state, which makes missing clones observable.
use ndarray::ArrayView1;

use crate::objective::{traits::SubmodularFunction, types::Element, wrapper::FunctionWrapper};

pub(crate) fn modular() -> FunctionWrapper {
    FunctionWrapper::new(|set: &[Element]| set.iter().map(|e| e[0]).sum())
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Coverage {
    pub(crate) covered: Vec<bool>,
    pub(crate) updates: usize,
}

impl Coverage {
    fn covered_with(&self, x: ArrayView1<'_, f64>) -> usize {
        let n = self.covered.len().max(x.len());
        (0..n)
            .filter(|&i| {
                self.covered.get(i).copied().unwrap_or(false) || x.get(i).is_some_and(|&v| v > 0.0)
            })
            .count()
    }
}

impl SubmodularFunction for Coverage {
    fn peek(&mut self, _solution: &[Element], x: ArrayView1<'_, f64>) -> f64 {
        self.covered_with(x) as f64
    }

    fn update(&mut self, _solution: &[Element], x: ArrayView1<'_, f64>) {
        if self.covered.len() < x.len() {
            self.covered.resize(x.len(), false);
        }
        for (i, &v) in x.iter().enumerate() {
            if v > 0.0 {
                self.covered[i] = true;
            }
        }
        self.updates += 1;
    }

    fn clone_box(&self) -> Box<dyn SubmodularFunction> {
        Box::new(self.clone())
    }
}
