//! Python bindings of [`fastdf_core::df`] built with [`pyo3`].
//!
//! # Design
//!
//! [`FastDataFrame`] wraps the owning [`DataFrame`] and is the only class that
//! accepts column assignment. Every slice, shift or cleaning result comes back
//! as a [`FastDataFrameView`], which shares or owns its buffer exactly as the
//! core View it wraps does.
//!
//! The Rust buffer sits behind a read/write lock, so arrays handed to Python
//! (columns, rows, `values`) are copies. Slicing itself never copies.
//!
//! Both classes expose the same read API, generated by `view_methods!` on top
//! of the [`AsView`] trait.

use fastdf_core::{DataFrame, ErrorKind, FrameError, Indexer, View};
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::{
    exceptions::{PyIndexError, PyKeyError, PyValueError},
    prelude::*,
};

mod indexing;
mod meta;
mod ops;

#[pyclass]
pub struct FastDataFrame {
    pub frame: DataFrame<f64>,
}

#[pyclass]
pub struct FastDataFrameView {
    pub view: View<f64>,
}

#[pyclass]
pub struct FastRow {
    pub view: View<f64>,
    pub position: isize,
}

/// Keeps one [`Indexer`] alive, so repeated lookups on the same `loc`
/// object reuse its column cache.
#[pyclass]
pub struct LocIndexer {
    pub indexer: Indexer<f64>,
}

pub trait AsView {
    fn as_view(&self) -> &View<f64>;
}

impl AsView for FastDataFrame {
    fn as_view(&self) -> &View<f64> {
        &self.frame
    }
}

impl AsView for FastDataFrameView {
    fn as_view(&self) -> &View<f64> {
        &self.view
    }
}

impl From<View<f64>> for FastDataFrameView {
    fn from(view: View<f64>) -> Self {
        Self { view }
    }
}

pub(crate) fn to_py_err(err: FrameError) -> PyErr {
    let message = err.to_string();
    match err.kind() {
        ErrorKind::Key => PyKeyError::new_err(message),
        ErrorKind::Index => PyIndexError::new_err(message),
        ErrorKind::InvalidArgument | ErrorKind::Busy => PyValueError::new_err(message),
    }
}

macro_rules! view_methods {
    ($ty:ident) => {
        #[pymethods]
        impl $ty {
            fn __len__(&self) -> usize {
                self.as_view().len()
            }

            fn __repr__(&self) -> String {
                self.as_view().to_string()
            }

            fn __str__(&self) -> String {
                self.as_view().to_string()
            }

            fn __getitem__(&self, py: Python, key: &Bound<'_, PyAny>) -> PyResult<PyObject> {
                indexing::get_item(py, self.as_view(), key)
            }

            #[getter]
            fn shape(&self) -> (usize, usize) {
                self.as_view().shape()
            }

            #[getter]
            fn columns(&self) -> Vec<String> {
                self.as_view().column_names().to_vec()
            }

            #[getter]
            fn values<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
                self.as_view().to_array().into_pyarray_bound(py)
            }

            #[getter]
            fn loc(&self) -> LocIndexer {
                LocIndexer {
                    indexer: self.as_view().loc(),
                }
            }

            #[pyo3(signature = (periods=1, fill_value=None))]
            fn shift(&self, periods: isize, fill_value: Option<f64>) -> FastDataFrameView {
                self.as_view().shift(periods, fill_value).into()
            }

            #[pyo3(signature = (axis=None))]
            fn mean<'py>(
                &self,
                py: Python<'py>,
                axis: Option<i64>,
            ) -> PyResult<Bound<'py, PyArray1<f64>>> {
                ops::reduce(py, self.as_view(), ops::Reduction::Mean, axis)
            }

            #[pyo3(signature = (axis=None))]
            fn sum<'py>(
                &self,
                py: Python<'py>,
                axis: Option<i64>,
            ) -> PyResult<Bound<'py, PyArray1<f64>>> {
                ops::reduce(py, self.as_view(), ops::Reduction::Sum, axis)
            }

            #[pyo3(signature = (axis=None))]
            fn min<'py>(
                &self,
                py: Python<'py>,
                axis: Option<i64>,
            ) -> PyResult<Bound<'py, PyArray1<f64>>> {
                ops::reduce(py, self.as_view(), ops::Reduction::Min, axis)
            }

            #[pyo3(signature = (axis=None))]
            fn max<'py>(
                &self,
                py: Python<'py>,
                axis: Option<i64>,
            ) -> PyResult<Bound<'py, PyArray1<f64>>> {
                ops::reduce(py, self.as_view(), ops::Reduction::Max, axis)
            }

            fn isna<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<bool>> {
                self.as_view().isna().into_pyarray_bound(py)
            }

            fn fillna(&self, value: f64) -> FastDataFrameView {
                self.as_view().fillna(value).into()
            }

            #[pyo3(signature = (axis=0))]
            fn dropna(&self, axis: i64) -> PyResult<FastDataFrameView> {
                ops::dropna(self.as_view(), axis)
            }

            #[pyo3(signature = (axis=0))]
            fn any<'py>(&self, py: Python<'py>, axis: i64) -> PyResult<Bound<'py, PyArray1<bool>>> {
                ops::any(py, self.as_view(), axis)
            }
        }
    };
}

view_methods!(FastDataFrame);
view_methods!(FastDataFrameView);
