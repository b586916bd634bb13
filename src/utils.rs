//! utils — PyO3 conversion helpers and Python-backed objectives.
//!
//! Everything in this module is compiled only with the `python-bindings`
//! feature. It converts Python inputs into `ndarray` containers and turns
//! Python objectives into [`SubmodularFunction`] implementations:
//!
//! - a plain callable `f(rows) -> float` becomes a shared
//!   [`FunctionWrapper`];
//! - an object exposing `peek(rows, x)`, `update(rows, x)` and `clone()`
//!   becomes a [`PyObjective`], cloned through its own `clone()` method.
//!
//! Python exceptions raised by the objective (`peek`, `update`, `clone`,
//! or the callable itself) are stored in a shared [`PendingPyErr`] slot.
//! The pyclasses in `lib.rs` re-raise it right after the constructor or
//! the `next` / `fit` step that triggered it. While it is pending the
//! objective makes no further Python calls.
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2, ArrayView1};

#[cfg(feature = "python-bindings")]
use numpy::{PyReadonlyArray1, PyReadonlyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::objective::{Element, FunctionWrapper, PendingError, SubmodularFunction};

/// Copy a solution into nested row vectors for Python.
#[cfg(feature = "python-bindings")]
pub fn solution_to_rows(solution: &[Element]) -> Vec<Vec<f64>> {
    solution.iter().map(|e| e.to_vec()).collect()
}

/// Extract one element from a 1-D numpy array or a sequence of floats.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vector(raw: &Bound<'_, PyAny>) -> PyResult<Array1<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr.as_array().to_owned());
    }
    let values: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray or sequence of float64")
    })?;
    Ok(Array1::from(values))
}

/// Extract a batch (one element per row) from a 2-D numpy array or a
/// sequence of equally long float sequences.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix(raw: &Bound<'_, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr.as_array().to_owned());
    }
    let rows: Vec<Vec<f64>> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 2-D numpy.ndarray or a sequence of float64 sequences")
    })?;
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != n_cols) {
        return Err(PyValueError::new_err("all rows of the batch must have the same length"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|err| PyValueError::new_err(err.to_string()))
}

/// First Python exception raised inside an objective, re-raised by the
/// owning pyclass after each call.
#[cfg(feature = "python-bindings")]
pub type PendingPyErr = PendingError<PyErr>;

/// Re-raise the exception recorded in `pending`, if any.
#[cfg(feature = "python-bindings")]
pub fn raise_pending(pending: &PendingPyErr) -> PyResult<()> {
    pending.take().map_or(Ok(()), Err)
}

/// Turn a Python objective into an owned [`SubmodularFunction`] reporting
/// its exceptions through `pending`.
///
/// # Errors
/// - `TypeError` if `f` is neither a callable nor an object exposing
///   `peek`, `update` and `clone`.
#[cfg(feature = "python-bindings")]
pub fn build_objective(
    f: &Bound<'_, PyAny>, pending: &PendingPyErr,
) -> PyResult<Box<dyn SubmodularFunction>> {
    if f.hasattr("peek")? && f.hasattr("update")? && f.hasattr("clone")? {
        let obj = f.clone().unbind();
        return Ok(Box::new(PyObjective { obj, pending: pending.clone() }));
    }
    if f.is_callable() {
        return Ok(Box::new(wrap_callable(f.clone().unbind(), pending.clone())));
    }
    Err(PyTypeError::new_err(
        "f must be a callable scoring a list of rows, or expose peek/update/clone",
    ))
}

#[cfg(feature = "python-bindings")]
fn wrap_callable(f: Py<PyAny>, pending: PendingPyErr) -> FunctionWrapper {
    FunctionWrapper::new(move |set: &[Element]| {
        if pending.is_set() {
            return f64::NAN;
        }
        Python::with_gil(|py| {
            f.call1(py, (solution_to_rows(set),)).and_then(|v| v.extract::<f64>(py)).unwrap_or_else(
                |err| {
                    tracing::debug!(%err, "Python objective raised");
                    pending.record(err);
                    f64::NAN
                },
            )
        })
    })
}

/// Stateful objective implemented in Python.
///
/// Once an exception is pending, `peek` scores `NaN` and `update` is
/// skipped until the owner re-raises it.
#[cfg(feature = "python-bindings")]
pub struct PyObjective {
    obj: Py<PyAny>,
    pending: PendingPyErr,
}

#[cfg(feature = "python-bindings")]
impl SubmodularFunction for PyObjective {
    fn peek(&mut self, solution: &[Element], x: ArrayView1<'_, f64>) -> f64 {
        if self.pending.is_set() {
            return f64::NAN;
        }
        Python::with_gil(|py| {
            self.obj
                .call_method1(py, "peek", (solution_to_rows(solution), x.to_vec()))
                .and_then(|v| v.extract::<f64>(py))
                .unwrap_or_else(|err| {
                    tracing::debug!(%err, "Python peek raised");
                    self.pending.record(err);
                    f64::NAN
                })
        })
    }

    fn update(&mut self, solution: &[Element], x: ArrayView1<'_, f64>) {
        if self.pending.is_set() {
            return;
        }
        Python::with_gil(|py| {
            if let Err(err) =
                self.obj.call_method1(py, "update", (solution_to_rows(solution), x.to_vec()))
            {
                tracing::debug!(%err, "Python update raised");
                self.pending.record(err);
            }
        })
    }

    fn clone_box(&self) -> Box<dyn SubmodularFunction> {
        Python::with_gil(|py| {
            let obj = self.obj.call_method0(py, "clone").unwrap_or_else(|err| {
                tracing::debug!(%err, "Python clone raised");
                self.pending.record(err);
                self.obj.clone_ref(py)
            });
            let copy: Box<dyn SubmodularFunction> =
                Box::new(PyObjective { obj, pending: self.pending.clone() });
            copy
        })
    }
}
