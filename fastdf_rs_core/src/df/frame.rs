use std::{fmt, ops::Deref, sync::Arc};

use log::debug;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

use super::{
    columns::ColumnIndex,
    error::{FrameError, Result},
    options::FrameOptions,
    view::{Key, View},
};
use crate::toolkit::array::AFloat;

/// A value assigned to a whole column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue<T> {
    /// broadcast to every row
    Scalar(T),
    /// one value per row
    Values(Vec<T>),
}

impl<T: AFloat> ColumnValue<T> {
    fn into_column(self, num_rows: usize) -> Result<Array1<T>> {
        match self {
            ColumnValue::Scalar(x) => Ok(Array1::from_elem(num_rows, x)),
            ColumnValue::Values(values) if values.len() == num_rows => Ok(Array1::from(values)),
            ColumnValue::Values(values) => Err(FrameError::ShapeMismatch {
                expected: vec![num_rows],
                got: vec![values.len()],
            }),
        }
    }
}

impl<T: AFloat> From<T> for ColumnValue<T> {
    fn from(x: T) -> Self {
        ColumnValue::Scalar(x)
    }
}

impl<T: AFloat> From<Vec<T>> for ColumnValue<T> {
    fn from(values: Vec<T>) -> Self {
        ColumnValue::Values(values)
    }
}

impl<T: AFloat> From<&[T]> for ColumnValue<T> {
    fn from(values: &[T]) -> Self {
        ColumnValue::Values(values.to_vec())
    }
}

impl<T: AFloat> From<Array1<T>> for ColumnValue<T> {
    fn from(values: Array1<T>) -> Self {
        ColumnValue::Values(values.to_vec())
    }
}

impl<T: AFloat> From<ArrayView1<'_, T>> for ColumnValue<T> {
    fn from(values: ArrayView1<'_, T>) -> Self {
        ColumnValue::Values(values.to_vec())
    }
}

/// The owning frame.
///
/// It is the View created directly from external values and the only place
/// allowed to mutate them. It is deliberately not `Clone`: derive Views with
/// [`View::slice`] or [`DataFrame::view`] instead.
#[derive(Debug)]
pub struct DataFrame<T: AFloat> {
    view: View<T>,
}

impl<T: AFloat> DataFrame<T> {
    pub fn new<S: Into<String>>(
        values: Array2<T>,
        columns: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        Self::with_options(values, columns, FrameOptions::default())
    }

    /// Takes ownership of `values`, which are copied only if they are not
    /// already in standard (row-major, contiguous) layout.
    pub fn with_options<S: Into<String>>(
        values: Array2<T>,
        columns: impl IntoIterator<Item = S>,
        options: FrameOptions,
    ) -> Result<Self> {
        let columns = ColumnIndex::new(columns)?;
        if columns.len() != values.ncols() {
            return Err(FrameError::ShapeMismatch {
                expected: vec![values.ncols()],
                got: vec![columns.len()],
            });
        }
        let values = if values.is_standard_layout() {
            values
        } else {
            values.as_standard_layout().into_owned()
        };
        Ok(Self {
            view: View::from_owned(values, Arc::new(columns), Arc::new(options)),
        })
    }

    pub fn from_shape_vec<S: Into<String>>(
        num_rows: usize,
        num_columns: usize,
        values: Vec<T>,
        columns: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let got = values.len();
        let values = Array2::from_shape_vec((num_rows, num_columns), values).map_err(|_| {
            FrameError::ShapeMismatch {
                expected: vec![num_rows, num_columns],
                got: vec![got],
            }
        })?;
        Self::new(values, columns)
    }

    pub fn from_view<S: Into<String>>(
        values: ArrayView2<T>,
        columns: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        Self::new(values.to_owned(), columns)
    }

    #[inline]
    pub fn view(&self) -> &View<T> {
        &self.view
    }

    pub fn into_view(self) -> View<T> {
        self.view
    }

    /// Assigns a whole column, only [`Key::Column`] keys are accepted.
    pub fn set<'k>(
        &mut self,
        key: impl Into<Key<'k>>,
        value: impl Into<ColumnValue<T>>,
    ) -> Result<()> {
        self.set_with(key, || Ok(value.into()))
    }

    /// Like [`DataFrame::set`], but `value` is only produced once `key` is
    /// known to name a column, so a bad key is reported before a bad value.
    pub fn set_with<'k>(
        &mut self,
        key: impl Into<Key<'k>>,
        value: impl FnOnce() -> Result<ColumnValue<T>>,
    ) -> Result<()> {
        let name = key.into().into_column_name()?;
        self.set_column(name, value()?)
    }

    /// Overwrites `name` in place if it exists, appends it otherwise.
    ///
    /// An overwrite is visible to every View still sharing this frame's buffer.
    /// An append grows a new buffer: Views created before it keep the old one.
    pub fn set_column(&mut self, name: &str, value: impl Into<ColumnValue<T>>) -> Result<()> {
        let column = value.into().into_column(self.view.len())?;
        match self.view.columns.get(name) {
            Some(col) => self.overwrite(col, column),
            None => self.append(name, column),
        }
    }

    fn overwrite(&mut self, col: usize, column: Array1<T>) -> Result<()> {
        let mut values = self
            .view
            .buffer
            .try_write()
            .ok_or(FrameError::BufferBorrowed)?;
        values.column_mut(col).assign(&column);
        debug!("overwrote column {col} in place");
        Ok(())
    }

    fn append(&mut self, name: &str, column: Array1<T>) -> Result<()> {
        let columns = self.view.columns.with_appended(name)?;
        let grown = {
            let values = self.view.buffer.read();
            let (num_rows, num_columns) = values.dim();
            let mut grown = Array2::from_elem((num_rows, num_columns + 1), T::zero());
            grown.slice_mut(s![.., ..num_columns]).assign(&*values);
            grown.column_mut(num_columns).assign(&column);
            grown
        };
        debug!("appended column {name:?}, buffer grew to {:?}", grown.dim());
        self.view = View::from_owned(grown, Arc::new(columns), Arc::clone(&self.view.options));
        Ok(())
    }
}

impl<T: AFloat> Deref for DataFrame<T> {
    type Target = View<T>;

    fn deref(&self) -> &View<T> {
        &self.view
    }
}

impl<T: AFloat> fmt::Display for DataFrame<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view, f)
    }
}

impl<T: AFloat> View<T> {
    /// materializes the window as a new, independent owning frame
    pub fn to_frame(&self) -> DataFrame<T> {
        DataFrame {
            view: View::from_owned(
                self.to_array(),
                Arc::clone(&self.columns),
                Arc::clone(&self.options),
            ),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::df::ErrorKind;
    use ndarray::array;

    pub(crate) fn get_test_df() -> DataFrame<f64> {
        DataFrame::new(
            array![[1., 2., 3.], [4., 5., 6.], [7., 8., 9.], [10., 11., 12.]],
            ["a", "b", "c"],
        )
        .unwrap()
    }

    #[test]
    fn test_construction_checks() {
        let err = DataFrame::new(array![[1., 2.]], ["a"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(matches!(err, FrameError::ShapeMismatch { .. }));
        let err = DataFrame::new(array![[1., 2.]], ["a", "a"]).unwrap_err();
        assert!(matches!(err, FrameError::DuplicateColumn(_)));
        let err = DataFrame::<f32>::from_shape_vec(2, 2, vec![1.; 3], ["a", "b"]).unwrap_err();
        assert!(err.to_string().contains("[2, 2]"));
    }

    #[test]
    fn test_construction_makes_contiguous() {
        let transposed = array![[1., 2., 3.], [4., 5., 6.]].reversed_axes();
        assert!(!transposed.is_standard_layout());
        let df = DataFrame::new(transposed, ["x", "y"]).unwrap();
        assert!(df.values().view().is_standard_layout());
        assert_eq!(df.get_column("y").unwrap().to_vec(), vec![4., 5., 6.]);
        let from_view = DataFrame::from_view(df.values().view(), ["p", "q"]).unwrap();
        assert_eq!(from_view.to_array(), df.to_array());
    }

    #[test]
    fn test_overwrite_is_seen_by_views() {
        let mut df = get_test_df();
        let view = df.slice(Some(1), Some(3));
        let shifted = view.shift(0, None);
        df.set("b", vec![0., -1., -2., -3.]).unwrap();
        assert_eq!(view.get_column("b").unwrap().to_vec(), vec![-1., -2.]);
        // transforms own their buffer
        assert_eq!(shifted.get_column("b").unwrap().to_vec(), vec![5., 8.]);
        df.set_column("a", 0.5).unwrap();
        assert_eq!(view.get_row(0).unwrap().get("a").unwrap(), 0.5);
    }

    #[test]
    fn test_overwrite_fails_while_borrowed() {
        let mut df = get_test_df();
        let view = df.slice(None, None);
        let row = view.get_row(0).unwrap();
        let err = df.set_column("a", 1.).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Busy);
        drop(row);
        df.set_column("a", 1.).unwrap();
        assert_eq!(view.get_column("a").unwrap().to_vec(), vec![1.; 4]);
    }

    #[test]
    fn test_append_scalar() {
        let mut df = DataFrame::new(array![[1.], [2.], [3.]], ["a"]).unwrap();
        let before = df.slice(None, None);
        df.set("C", 9.).unwrap();
        assert_eq!(df.get_column("C").unwrap().to_vec(), vec![9., 9., 9.]);
        assert_eq!(df.len(), 3);
        assert_eq!(df.column_names(), &["a", "C"]);
        // older views keep the previous buffer and columns
        assert!(!before.shares_buffer_with(&df));
        assert!(before.get_column("C").is_err());
        df.set_column("a", 0.).unwrap();
        assert_eq!(before.get_column("a").unwrap().to_vec(), vec![1., 2., 3.]);
    }

    #[test]
    fn test_append_values() {
        let mut df = get_test_df();
        df.set_column("d", array![1., 2., 3., 4.]).unwrap();
        assert_eq!(df.shape(), (4, 4));
        assert_eq!(df.get_row(-1).unwrap().to_vec(), vec![10., 11., 12., 4.]);
        assert!(df.values().view().is_standard_layout());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut df = get_test_df();
        let err = df.set(0isize, 1.).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = df.set("a", vec![1., 2.]).unwrap_err();
        assert_eq!(err.to_string(), "shape mismatch: expected [4], got [2]");
        let err = df.set("new", &[1., 2., 3.][..]).unwrap_err();
        assert!(matches!(err, FrameError::ShapeMismatch { .. }));
        assert_eq!(df.shape(), (4, 3));
    }

    #[test]
    fn test_to_frame() {
        let df = get_test_df();
        let mut owned = df.slice(Some(-2), None).to_frame();
        assert_eq!(owned.len(), 2);
        owned.set_column("a", 0.).unwrap();
        assert_eq!(df.get_column("a").unwrap().to_vec(), vec![1., 4., 7., 10.]);
        assert_eq!(owned.get_column("a").unwrap().to_vec(), vec![0., 0.]);
    }

    #[test]
    fn test_set_checks_key_before_value() {
        let mut df = get_test_df();
        let err = df
            .set_with(-1isize, || Err(FrameError::InvalidArgument("bad value".into())))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("string column names"));
        let err = df
            .set_with(Key::from(1isize..2), || -> Result<ColumnValue<f64>> {
                panic!("value must not be produced for a non-column key")
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        // a named column still surfaces the value error
        let err = df
            .set_with("a", || Err(FrameError::InvalidArgument("bad value".into())))
            .unwrap_err();
        assert_eq!(err.to_string(), "bad value");
        df.set_with("d", || Ok(ColumnValue::Scalar(2.))).unwrap();
        assert_eq!(df.shape(), (4, 4));
    }

    #[test]
    fn test_display_matches_view() {
        let df = get_test_df();
        assert_eq!(format!("{df}"), df.view().to_string());
        assert!(format!("{df}").starts_with("        a"));
    }
}
