//! rust_ssm — streaming submodular maximization with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the streaming optimizers to Python via the `_rust_ssm` extension
//! module. When the `python-bindings` feature is enabled, this module
//! defines the Python-facing classes and the module initializer.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`objective` and `optimization`) as
//!   the public crate surface.
//! - Define `#[pyclass]` wrappers for `SieveStreaming` and `ThreeSieves`
//!   and the `#[pymodule]` initializer for `_rust_ssm`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All selection logic lives in the inner Rust modules; this file only
//!   performs FFI glue, input conversion, and error mapping.
//! - Python-visible classes keep the `fit` / `next` / `get_solution` /
//!   `get_fval` names of the streaming API they wrap.
//!
//! Conventions
//! -----------
//! - Elements cross the boundary as 1-D float sequences, batches as 2-D
//!   arrays or lists of rows, solutions come back as lists of rows.
//! - Configuration errors surface as `ValueError`, usage errors
//!   (`get_solution` before fitting) as `RuntimeError`.
//! - Exceptions raised by the Python objective are re-raised unchanged.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on `optimization` and `objective`
//!   directly and can ignore the items guarded by `python-bindings`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_streaming_pipeline.rs`.
//! - The PyO3 classes are exercised from Python.

pub mod objective;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::{
        SieveStreaming, SubmodularOptimizer, ThreeSieves, ThresholdOptions, ThresholdStrategy,
    },
    utils::{
        build_objective, extract_f64_matrix, extract_f64_vector, raise_pending, solution_to_rows,
        PendingPyErr,
    },
};

/// SieveStreaming — Python-facing wrapper for the multi-threshold optimizer.
///
/// Constructed from Python via `SieveStreaming(K, f, m, epsilon)`.
/// Exceptions raised by `f` propagate out of the constructor, `fit` and
/// `next`.
///
/// - `K`: cardinality bound, `≥ 1`.
/// - `f`: callable scoring a list of rows, or an object exposing
///   `peek(rows, x)`, `update(rows, x)` and `clone()`.
/// - `m`: lower estimate of a single element's value, `> 0`.
/// - `epsilon`: ladder spacing, `> 0`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "SieveStreaming", module = "rust_ssm", unsendable)]
pub struct PySieveStreaming {
    inner: SieveStreaming,
    pending: PendingPyErr,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PySieveStreaming {
    #[new]
    #[allow(non_snake_case)]
    #[pyo3(signature = (K, f, m, epsilon))]
    pub fn new(K: usize, f: &Bound<'_, PyAny>, m: f64, epsilon: f64) -> PyResult<Self> {
        let pending = PendingPyErr::new();
        let objective = build_objective(f, &pending)?;
        let opts = ThresholdOptions::new(m, epsilon)?;
        let inner = SieveStreaming::new(K, objective.as_ref(), opts)?;
        raise_pending(&pending)?;
        Ok(Self { inner, pending })
    }

    /// Consume the rows of `data` in order, stopping at the first row whose
    /// objective call raised.
    pub fn fit(&mut self, data: &Bound<'_, PyAny>) -> PyResult<()> {
        let batch = extract_f64_matrix(data)?;
        for row in batch.rows() {
            self.inner.next(row);
            raise_pending(&self.pending)?;
        }
        Ok(())
    }

    pub fn next(&mut self, x: &Bound<'_, PyAny>) -> PyResult<()> {
        let element = extract_f64_vector(x)?;
        self.inner.next(element.view());
        raise_pending(&self.pending)
    }

    pub fn get_solution(&self) -> PyResult<Vec<Vec<f64>>> {
        Ok(solution_to_rows(self.inner.solution()?))
    }

    pub fn get_fval(&self) -> f64 {
        self.inner.fval()
    }

    /// Thresholds of the sieves, in ladder order.
    pub fn thresholds(&self) -> Vec<f64> {
        self.inner.thresholds()
    }
}

/// ThreeSieves — Python-facing wrapper for the adaptive optimizer.
///
/// Constructed from Python via `ThreeSieves(K, f, m, epsilon, strategy, T)`:
/// - `strategy`: `"sieve"` (any case) for geometric decay, any other name
///   for linear decay.
/// - `T`: patience window, `≥ 1`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "ThreeSieves", module = "rust_ssm", unsendable)]
pub struct PyThreeSieves {
    inner: ThreeSieves,
    pending: PendingPyErr,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyThreeSieves {
    #[new]
    #[allow(non_snake_case)]
    #[pyo3(signature = (K, f, m, epsilon, strategy, T))]
    pub fn new(
        K: usize, f: &Bound<'_, PyAny>, m: f64, epsilon: f64, strategy: &str, T: usize,
    ) -> PyResult<Self> {
        let pending = PendingPyErr::new();
        let objective = build_objective(f, &pending)?;
        let opts = ThresholdOptions::new(m, epsilon)?;
        let inner =
            ThreeSieves::new(K, objective.as_ref(), opts, ThresholdStrategy::from(strategy), T)?;
        raise_pending(&pending)?;
        Ok(Self { inner, pending })
    }

    /// Consume the rows of `data` in order, stopping at the first row whose
    /// objective call raised.
    pub fn fit(&mut self, data: &Bound<'_, PyAny>) -> PyResult<()> {
        let batch = extract_f64_matrix(data)?;
        for row in batch.rows() {
            self.inner.next(row);
            raise_pending(&self.pending)?;
        }
        Ok(())
    }

    pub fn next(&mut self, x: &Bound<'_, PyAny>) -> PyResult<()> {
        let element = extract_f64_vector(x)?;
        self.inner.next(element.view());
        raise_pending(&self.pending)
    }

    pub fn get_solution(&self) -> PyResult<Vec<Vec<f64>>> {
        Ok(solution_to_rows(self.inner.solution()?))
    }

    pub fn get_fval(&self) -> f64 {
        self.inner.fval()
    }

    #[getter]
    pub fn threshold(&self) -> f64 {
        self.inner.threshold()
    }
}

/// `_rust_ssm` — PyO3 module initializer.
///
/// Registers the optimizer classes; invoked by Python when importing the
/// compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_ssm<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PySieveStreaming>()?;
    m.add_class::<PyThreeSieves>()?;
    Ok(())
}
