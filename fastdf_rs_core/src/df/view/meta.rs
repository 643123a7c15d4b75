use std::sync::Arc;

use ndarray::{Array2, ArrayView2};

use super::{ColumnRef, Row, Values, View};
use crate::{
    df::{
        buffer::Buffer,
        columns::ColumnIndex,
        error::{FrameError, Result},
        options::FrameOptions,
    },
    toolkit::array::AFloat,
};

impl<T: AFloat> View<T> {
    pub(crate) fn from_parts(
        buffer: Buffer<T>,
        columns: Arc<ColumnIndex>,
        options: Arc<FrameOptions>,
        start: usize,
        stop: usize,
    ) -> Self {
        debug_assert!(start <= stop);
        Self {
            buffer,
            columns,
            options,
            start,
            stop,
        }
    }

    /// wraps a freshly materialized buffer, the new View covers all of it
    pub(crate) fn from_owned(
        values: Array2<T>,
        columns: Arc<ColumnIndex>,
        options: Arc<FrameOptions>,
    ) -> Self {
        let stop = values.nrows();
        Self::from_parts(Buffer::new(values), columns, options, 0, stop)
    }

    /// same columns and options as `self`, over `values`
    pub(crate) fn materialized(&self, values: Array2<T>) -> Self {
        Self::from_owned(values, Arc::clone(&self.columns), Arc::clone(&self.options))
    }

    pub(crate) fn with_values<R>(&self, f: impl FnOnce(ArrayView2<T>) -> R) -> R {
        f(self.values().view())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// `(rows, columns)` of the window
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.columns.len())
    }

    /// absolute `[start, stop)` of the window inside its buffer
    #[inline]
    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.stop)
    }

    #[inline]
    pub fn columns(&self) -> &ColumnIndex {
        &self.columns
    }

    #[inline]
    pub fn column_names(&self) -> &[String] {
        self.columns.names()
    }

    #[inline]
    pub fn options(&self) -> &FrameOptions {
        &self.options
    }

    pub fn shares_buffer_with(&self, other: &View<T>) -> bool {
        self.buffer.ptr_eq(&other.buffer)
    }

    pub fn values(&self) -> Values<'_, T> {
        Values {
            guard: self.buffer.read(),
            start: self.start,
            stop: self.stop,
        }
    }

    /// an owned copy of the window
    pub fn to_array(&self) -> Array2<T> {
        self.with_values(|values| values.to_owned())
    }

    pub fn get_column(&self, name: &str) -> Result<ColumnRef<'_, T>> {
        let col = self.columns.get_or_err(name)?;
        Ok(self.column_at(col))
    }

    pub(crate) fn column_at(&self, col: usize) -> ColumnRef<'_, T> {
        ColumnRef {
            guard: self.buffer.read(),
            start: self.start,
            stop: self.stop,
            col,
        }
    }

    /// `i` counts from `start` when non-negative, from `stop` otherwise.
    pub fn get_row(&self, i: isize) -> Result<Row<'_, T>> {
        let row = self.resolve_position(i)?;
        Ok(Row {
            guard: self.buffer.read(),
            row,
            columns: &self.columns,
        })
    }

    /// A narrower View over the same buffer.
    ///
    /// Bounds resolve like [`View::get_row`] but are clamped into the window
    /// instead of failing, `stop` is exclusive and `None` means open-ended.
    pub fn slice(&self, start: Option<isize>, stop: Option<isize>) -> View<T> {
        let (lo, hi) = (self.start as isize, self.stop as isize);
        let start = start.map_or(lo, |a| self.resolve_bound(a)).clamp(lo, hi);
        let stop = stop.map_or(hi, |b| self.resolve_bound(b)).clamp(start, hi);
        Self::from_parts(
            self.buffer.clone(),
            Arc::clone(&self.columns),
            Arc::clone(&self.options),
            start as usize,
            stop as usize,
        )
    }

    #[inline]
    fn resolve_bound(&self, i: isize) -> isize {
        if i >= 0 {
            (self.start as isize).saturating_add(i)
        } else {
            (self.stop as isize).saturating_add(i)
        }
    }

    /// absolute buffer row of the relative position `i`
    pub(crate) fn resolve_position(&self, i: isize) -> Result<usize> {
        let absolute = self.resolve_bound(i);
        if absolute < self.start as isize || absolute >= self.stop as isize {
            return Err(FrameError::IndexOutOfRange {
                index: i,
                len: self.len(),
            });
        }
        Ok(absolute as usize)
    }
}

#[cfg(test)]
mod tests {
    use crate::df::{frame::tests::get_test_df, ErrorKind};

    #[test]
    fn test_shape() {
        let df = get_test_df();
        assert_eq!(df.shape(), (4, 3));
        assert_eq!(df.len(), 4);
        assert!(!df.is_empty());
        assert_eq!(df.bounds(), (0, 4));
        assert_eq!(df.column_names(), &["a", "b", "c"]);
    }

    #[test]
    fn test_get_row() {
        let df = get_test_df();
        assert_eq!(df.get_row(0).unwrap().to_vec(), vec![1., 2., 3.]);
        assert_eq!(df.get_row(-1).unwrap().to_vec(), vec![10., 11., 12.]);
        assert_eq!(df.get_row(-1).unwrap(), df.get_row(3).unwrap());
        let err = df.get_row(4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Index);
        assert!(df.get_row(-5).is_err());
    }

    #[test]
    fn test_get_row_is_relative_to_window() {
        let df = get_test_df();
        let view = df.slice(Some(1), Some(3));
        assert_eq!(view.get_row(0).unwrap().offset(), 1);
        assert_eq!(view.get_row(-1).unwrap().offset(), 2);
        assert!(view.get_row(2).is_err());
        assert!(view.get_row(-3).is_err());
    }

    #[test]
    fn test_get_column() {
        let df = get_test_df();
        assert_eq!(df.get_column("b").unwrap().to_vec(), vec![2., 5., 8., 11.]);
        let err = df.get_column("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Key);
    }

    #[test]
    fn test_slice_clamps() {
        let df = get_test_df();
        assert_eq!(df.slice(Some(2), Some(100)).bounds(), (2, 4));
        assert_eq!(df.slice(Some(-100), Some(2)).bounds(), (0, 2));
        assert_eq!(df.slice(Some(3), Some(1)).bounds(), (3, 3));
        assert_eq!(df.slice(Some(10), None).bounds(), (4, 4));
        assert_eq!(df.slice(None, Some(-1)).bounds(), (0, 3));
        assert_eq!(df.slice(None, None).bounds(), (0, 4));
        assert!(df.slice(Some(10), None).is_empty());
    }

    #[test]
    fn test_nested_slice_addresses_root_buffer() {
        let df = get_test_df();
        let outer = df.slice(Some(1), None);
        let inner = outer.slice(Some(1), Some(2));
        assert_eq!(inner.bounds(), (2, 3));
        assert!(inner.shares_buffer_with(&df));
        assert_eq!(inner.to_array(), df.to_array().slice(ndarray::s![2..3, ..]));
        let clamped = outer.slice(Some(-10), Some(10));
        assert_eq!(clamped.bounds(), outer.bounds());
    }
}
