use fastdf_core::View;
use numpy::{IntoPyArray, PyArray1};
use pyo3::{exceptions::PyValueError, prelude::*};

pub(crate) use fastdf_core::toolkit::array::Reduction;

use super::{to_py_err, FastDataFrameView};

fn to_axis(axis: i64) -> PyResult<usize> {
    usize::try_from(axis)
        .map_err(|_| PyValueError::new_err(format!("axis must be 0 or 1, got {axis}")))
}

pub(crate) fn reduce<'py>(
    py: Python<'py>,
    view: &View<f64>,
    reduction: Reduction,
    axis: Option<i64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let axis = axis.map(to_axis).transpose()?;
    let res = py
        .allow_threads(|| view.reduce(reduction, axis))
        .map_err(to_py_err)?;
    Ok(res.into_pyarray_bound(py))
}

pub(crate) fn any<'py>(
    py: Python<'py>,
    view: &View<f64>,
    axis: i64,
) -> PyResult<Bound<'py, PyArray1<bool>>> {
    let axis = to_axis(axis)?;
    let res = py
        .allow_threads(|| view.any(axis))
        .map_err(to_py_err)?;
    Ok(res.into_pyarray_bound(py))
}

pub(crate) fn dropna(view: &View<f64>, axis: i64) -> PyResult<FastDataFrameView> {
    view.dropna(to_axis(axis)?)
        .map(FastDataFrameView::from)
        .map_err(to_py_err)
}
