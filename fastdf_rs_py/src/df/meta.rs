use fastdf_core::DataFrame;
use log::debug;
use numpy::PyReadonlyArray2;
use pyo3::{prelude::*, types::PyDict};

use super::{to_py_err, FastDataFrame, FastDataFrameView};

impl FastDataFrame {
    fn from_parts(values: PyReadonlyArray2<f64>, columns: Vec<String>) -> PyResult<Self> {
        let frame = DataFrame::from_view(values.as_array(), columns).map_err(to_py_err)?;
        Ok(FastDataFrame { frame })
    }
}

#[pymethods]
impl FastDataFrame {
    #[new]
    fn py_new(values: PyReadonlyArray2<f64>, columns: Vec<String>) -> PyResult<Self> {
        Self::from_parts(values, columns)
    }

    #[staticmethod]
    fn new(values: PyReadonlyArray2<f64>, columns: Vec<String>) -> PyResult<Self> {
        Self::from_parts(values, columns)
    }

    /// Copies `df.values` (as float64) and the string form of `df.columns`.
    #[staticmethod]
    fn from_pandas(df: &Bound<'_, PyAny>) -> PyResult<Self> {
        let py = df.py();
        let kwargs = PyDict::new_bound(py);
        kwargs.set_item("dtype", "float64")?;
        let values = df.call_method("to_numpy", (), Some(&kwargs))?;
        let values = values.extract::<PyReadonlyArray2<f64>>()?;
        let columns = df
            .getattr("columns")?
            .iter()?
            .map(|name| name.map(|name| name.to_string()))
            .collect::<PyResult<Vec<_>>>()?;
        debug!(
            "converting a pandas frame of shape {:?} with columns {columns:?}",
            values.as_array().dim()
        );
        Self::from_parts(values, columns)
    }

    /// A View over every row, sharing this frame's buffer.
    fn view(&self) -> FastDataFrameView {
        self.frame.slice(None, None).into()
    }

    fn to_frame(&self) -> FastDataFrame {
        FastDataFrame {
            frame: self.frame.to_frame(),
        }
    }
}

#[pymethods]
impl FastDataFrameView {
    /// Materializes this window as a new, independent owning frame.
    fn to_frame(&self) -> FastDataFrame {
        FastDataFrame {
            frame: self.view.to_frame(),
        }
    }

    fn shares_buffer_with(&self, other: &Self) -> bool {
        self.view.shares_buffer_with(&other.view)
    }

    #[getter]
    fn bounds(&self) -> (usize, usize) {
        self.view.bounds()
    }
}
