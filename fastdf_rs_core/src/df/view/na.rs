use std::sync::Arc;

use log::debug;
use ndarray::{Array2, Axis};

use super::View;
use crate::{
    df::error::{check_axis, Result},
    toolkit::array::AFloat,
};

impl<T: AFloat> View<T> {
    pub fn isna(&self) -> Array2<bool> {
        self.with_values(|values| values.mapv(|x| x.is_nan()))
    }

    pub fn fillna(&self, value: T) -> View<T> {
        let filled = self.with_values(|values| values.mapv(|x| if x.is_nan() { value } else { x }));
        debug!("fillna materialized a {:?} buffer", filled.dim());
        self.materialized(filled)
    }

    /// `axis` 0 drops rows holding any NaN, 1 drops such columns.
    pub fn dropna(&self, axis: usize) -> Result<View<T>> {
        let axis = check_axis(axis)?;
        let (keep, values) = self.with_values(|values| {
            let keep: Vec<usize> = values
                .axis_iter(Axis(axis))
                .enumerate()
                .filter(|(_, lane)| !lane.iter().any(|x| x.is_nan()))
                .map(|(i, _)| i)
                .collect();
            let kept = values.select(Axis(axis), &keep);
            (keep, kept)
        });
        debug!("dropna(axis={axis}) materialized a {:?} buffer", values.dim());
        if axis == 0 {
            return Ok(self.materialized(values));
        }
        let columns = self.columns.select(&keep);
        Ok(View::from_owned(values, Arc::new(columns), Arc::clone(&self.options)))
    }

    /// A copy of the window without the `names` columns.
    ///
    /// Fails with a key error if any name is unknown.
    pub fn drop_columns(&self, names: &[&str]) -> Result<View<T>> {
        let dropped = names
            .iter()
            .map(|name| self.columns.get_or_err(name))
            .collect::<Result<Vec<_>>>()?;
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|col| !dropped.contains(col))
            .collect();
        let values = self.with_values(|values| values.select(Axis(1), &keep));
        debug!("drop_columns materialized a {:?} buffer", values.dim());
        let columns = self.columns.select(&keep);
        Ok(View::from_owned(values, Arc::new(columns), Arc::clone(&self.options)))
    }

    /// A copy of the rows at the relative `positions`, in the given order.
    ///
    /// Every position is bounds-checked like [`View::get_row`].
    pub fn take(&self, positions: &[isize]) -> Result<View<T>> {
        let rows = positions
            .iter()
            .map(|&i| self.resolve_position(i))
            .collect::<Result<Vec<_>>>()?;
        let values = self.buffer.read().select(Axis(0), &rows);
        debug!("take materialized a {:?} buffer", values.dim());
        Ok(self.materialized(values))
    }
}
