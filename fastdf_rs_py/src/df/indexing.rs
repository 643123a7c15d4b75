use fastdf_core::{ColumnValue, FrameError, Indexer, Key, Selection, View};
use numpy::{IntoPyArray, PyArray1};
use pyo3::{exceptions::PyTypeError, prelude::*, types::PySlice};

use super::{to_py_err, FastDataFrame, FastDataFrameView, FastRow, LocIndexer};

/// A [`Key`] extracted from a Python object, owning what it borrows.
#[derive(Debug)]
enum PyKey {
    /// positions and slices borrow nothing
    Plain(Key<'static>),
    Column(String),
    Take(Vec<isize>),
}

impl PyKey {
    fn extract(key: &Bound<'_, PyAny>) -> PyResult<Self> {
        if let Ok(name) = key.extract::<String>() {
            return Ok(PyKey::Column(name));
        }
        if let Ok(slice) = key.downcast::<PySlice>() {
            let key = Key::stepped_slice(
                slice.getattr("start")?.extract()?,
                slice.getattr("stop")?.extract()?,
                slice.getattr("step")?.extract()?,
            )
            .map_err(to_py_err)?;
            return Ok(PyKey::Plain(key));
        }
        if let Ok(i) = key.extract::<isize>() {
            return Ok(PyKey::Plain(Key::Position(i)));
        }
        if let Ok(positions) = key.extract::<Vec<isize>>() {
            return Ok(PyKey::Take(positions));
        }
        Err(PyTypeError::new_err(format!(
            "unsupported key type {}",
            key.get_type()
        )))
    }

    fn as_key(&self) -> Key<'_> {
        match self {
            PyKey::Plain(key) => *key,
            PyKey::Column(name) => Key::Column(name),
            PyKey::Take(positions) => Key::Take(positions),
        }
    }
}

/// A column value from a float or a 1-D sequence of floats.
fn column_value(value: &Bound<'_, PyAny>) -> fastdf_core::Result<ColumnValue<f64>> {
    if let Ok(x) = value.extract::<f64>() {
        return Ok(ColumnValue::Scalar(x));
    }
    value
        .extract::<Vec<f64>>()
        .map(ColumnValue::Values)
        .map_err(|_| {
            FrameError::InvalidArgument(format!(
                "expected a float or a 1-D sequence of floats, got {}",
                value.get_type()
            ))
        })
}

fn into_py_object(py: Python, view: &View<f64>, selection: Selection<'_, f64>) -> PyObject {
    match selection {
        Selection::Row(row) => FastRow {
            view: view.clone(),
            position: (row.offset() - view.bounds().0) as isize,
        }
        .into_py(py),
        Selection::View(view) => FastDataFrameView::from(view).into_py(py),
        Selection::Column(column) => column.to_owned().into_pyarray_bound(py).into_any().unbind(),
    }
}

fn select(py: Python, loc: &mut Indexer<f64>, key: &PyKey) -> PyResult<PyObject> {
    let view = loc.view().clone();
    let selection = loc.get(key.as_key()).map_err(to_py_err)?;
    Ok(into_py_object(py, &view, selection))
}

/// `df[key]`: a column array for names, a [`FastRow`] for positions, a
/// clamped View for slices and a copied View for position lists.
pub(crate) fn get_item(
    py: Python,
    view: &View<f64>,
    key: &Bound<'_, PyAny>,
) -> PyResult<PyObject> {
    select(py, &mut view.loc(), &PyKey::extract(key)?)
}

#[pymethods]
impl FastDataFrame {
    fn __setitem__(&mut self, key: &Bound<'_, PyAny>, value: &Bound<'_, PyAny>) -> PyResult<()> {
        let key = PyKey::extract(key)
            .map_err(|_| to_py_err(FrameError::assignment_key(key.get_type())))?;
        self.frame
            .set_with(key.as_key(), || column_value(value))
            .map_err(to_py_err)
    }
}

#[pymethods]
impl LocIndexer {
    fn __getitem__(&mut self, py: Python, key: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        select(py, &mut self.indexer, &PyKey::extract(key)?)
    }

    fn __repr__(&self) -> String {
        format!("LocIndexer(bounds={:?})", self.indexer.view().bounds())
    }
}

#[pymethods]
impl FastRow {
    fn __getitem__(&self, name: String) -> PyResult<f64> {
        self.view
            .get_row(self.position)
            .and_then(|row| row.get(&name))
            .map_err(to_py_err)
    }

    fn __len__(&self) -> usize {
        self.view.columns().len()
    }

    fn __repr__(&self) -> PyResult<String> {
        let row = self.view.get_row(self.position).map_err(to_py_err)?;
        Ok(format!("FastRow({row:?})"))
    }

    #[getter]
    fn values<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let row = self.view.get_row(self.position).map_err(to_py_err)?;
        Ok(row.values().to_owned().into_pyarray_bound(py))
    }
}
