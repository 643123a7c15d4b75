use log::debug;
use ndarray::{s, Array1, Array2};

use super::View;
use crate::{
    df::error::{check_axis, Result},
    toolkit::array::{any_nonzero, map_rows, AFloat, Reduction},
};

impl<T: AFloat> View<T> {
    /// Rows moved down by `periods` (up when negative) into a new buffer.
    ///
    /// Vacated rows are filled with `fill_value`, NaN when `None`.
    pub fn shift(&self, periods: isize, fill_value: Option<T>) -> View<T> {
        let fill_value = fill_value.unwrap_or_else(T::nan);
        let shifted = self.with_values(|values| {
            let num_rows = values.nrows();
            let n = periods.unsigned_abs().min(num_rows);
            let mut shifted = Array2::from_elem(values.dim(), fill_value);
            if periods >= 0 {
                shifted
                    .slice_mut(s![n.., ..])
                    .assign(&values.slice(s![..num_rows - n, ..]));
            } else {
                shifted
                    .slice_mut(s![..num_rows - n, ..])
                    .assign(&values.slice(s![n.., ..]));
            }
            shifted
        });
        debug!("shift({periods}) materialized a {:?} buffer", shifted.dim());
        self.materialized(shifted)
    }

    /// NaN-skipping reduction, `axis` 0 (or `None`) per column, 1 per row.
    pub fn reduce(&self, reduction: Reduction, axis: Option<usize>) -> Result<Array1<T>> {
        let axis = check_axis(axis.unwrap_or(0))?;
        let reduced = self.with_values(|values| {
            let lanes = if axis == 0 {
                values.reversed_axes()
            } else {
                values
            };
            let pool = self.options.pool_for(lanes.nrows());
            if pool.is_some() {
                debug!("{reduction:?} over {} lanes runs on the pool", lanes.nrows());
            }
            map_rows(lanes, pool, |lane| reduction.apply(lane))
        });
        Ok(Array1::from(reduced))
    }

    pub fn mean(&self, axis: Option<usize>) -> Result<Array1<T>> {
        self.reduce(Reduction::Mean, axis)
    }

    pub fn sum(&self, axis: Option<usize>) -> Result<Array1<T>> {
        self.reduce(Reduction::Sum, axis)
    }

    pub fn min(&self, axis: Option<usize>) -> Result<Array1<T>> {
        self.reduce(Reduction::Min, axis)
    }

    pub fn max(&self, axis: Option<usize>) -> Result<Array1<T>> {
        self.reduce(Reduction::Max, axis)
    }

    /// logical-or along `axis`, nonzero counts as `true`
    pub fn any(&self, axis: usize) -> Result<Array1<bool>> {
        let axis = check_axis(axis)?;
        let reduced = self.with_values(|values| {
            let lanes = if axis == 0 {
                values.reversed_axes()
            } else {
                values
            };
            let pool = self.options.pool_for(lanes.nrows());
            map_rows(lanes, pool, any_nonzero)
        });
        Ok(Array1::from(reduced))
    }
}
