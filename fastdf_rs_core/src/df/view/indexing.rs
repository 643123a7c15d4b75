use std::{
    collections::HashMap,
    ops::{Range, RangeFrom, RangeFull, RangeTo},
};

use log::trace;

use super::{ColumnRef, Row, View};
use crate::{
    df::{
        columns::ColumnIndex,
        error::{FrameError, Result},
    },
    toolkit::array::AFloat,
};

/// An access request understood by [`Indexer::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'k> {
    /// a single row, negative positions count from the end
    Position(isize),
    /// a clamped row window, `stop` is exclusive
    Slice {
        start: Option<isize>,
        stop: Option<isize>,
    },
    Column(&'k str),
    /// a materialized selection of rows, each position bounds-checked
    Take(&'k [isize]),
}

impl<'k> Key<'k> {
    /// A [`Key::Slice`], rejecting any `step` other than `None` or `1`.
    pub fn stepped_slice(
        start: Option<isize>,
        stop: Option<isize>,
        step: Option<isize>,
    ) -> Result<Self> {
        match step {
            None | Some(1) => Ok(Key::Slice { start, stop }),
            Some(step) => Err(FrameError::InvalidArgument(format!(
                "only unit steps are supported, got {step}"
            ))),
        }
    }

    /// the name of a [`Key::Column`], an invalid-argument error for any other key
    pub fn into_column_name(self) -> Result<&'k str> {
        match self {
            Key::Column(name) => Ok(name),
            key => Err(FrameError::assignment_key(format_args!("{key:?}"))),
        }
    }
}

impl From<isize> for Key<'_> {
    fn from(i: isize) -> Self {
        Key::Position(i)
    }
}

impl<'k> From<&'k str> for Key<'k> {
    fn from(name: &'k str) -> Self {
        Key::Column(name)
    }
}

impl<'k> From<&'k [isize]> for Key<'k> {
    fn from(positions: &'k [isize]) -> Self {
        Key::Take(positions)
    }
}

impl From<Range<isize>> for Key<'_> {
    fn from(range: Range<isize>) -> Self {
        Key::Slice {
            start: Some(range.start),
            stop: Some(range.end),
        }
    }
}

impl From<RangeFrom<isize>> for Key<'_> {
    fn from(range: RangeFrom<isize>) -> Self {
        Key::Slice {
            start: Some(range.start),
            stop: None,
        }
    }
}

impl From<RangeTo<isize>> for Key<'_> {
    fn from(range: RangeTo<isize>) -> Self {
        Key::Slice {
            start: None,
            stop: Some(range.end),
        }
    }
}

impl From<RangeFull> for Key<'_> {
    fn from(_: RangeFull) -> Self {
        Key::Slice {
            start: None,
            stop: None,
        }
    }
}

pub enum Selection<'a, T: AFloat> {
    Row(Row<'a, T>),
    View(View<T>),
    Column(ColumnRef<'a, T>),
}

impl<'a, T: AFloat> Selection<'a, T> {
    pub fn into_row(self) -> Option<Row<'a, T>> {
        match self {
            Selection::Row(row) => Some(row),
            _ => None,
        }
    }

    pub fn into_view(self) -> Option<View<T>> {
        match self {
            Selection::View(view) => Some(view),
            _ => None,
        }
    }

    pub fn into_column(self) -> Option<ColumnRef<'a, T>> {
        match self {
            Selection::Column(column) => Some(column),
            _ => None,
        }
    }
}

/// Column offsets resolved by one [`Indexer`], valid for one set of bounds.
#[derive(Debug)]
struct IndexerCache {
    bounds: (usize, usize),
    capacity: usize,
    columns: HashMap<String, usize>,
}

impl IndexerCache {
    fn new(bounds: (usize, usize), capacity: usize) -> Self {
        Self {
            bounds,
            capacity,
            columns: HashMap::new(),
        }
    }

    fn column(&mut self, bounds: (usize, usize), index: &ColumnIndex, name: &str) -> Result<usize> {
        if self.bounds != bounds {
            trace!("bounds moved from {:?} to {bounds:?}, resetting cache", self.bounds);
            self.columns.clear();
            self.bounds = bounds;
        }
        if let Some(&col) = self.columns.get(name) {
            return Ok(col);
        }
        let col = index.get_or_err(name)?;
        trace!("column cache miss for {name:?}");
        if self.columns.len() < self.capacity {
            self.columns.insert(name.to_string(), col);
        }
        Ok(col)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.columns.len()
    }
}

/// Resolves [`Key`]s relative to one View's own bounds.
///
/// The Indexer holds its own (cheap) clone of the View, so it can live as
/// long as its caller needs the column cache to stay warm.
#[derive(Debug)]
pub struct Indexer<T: AFloat> {
    view: View<T>,
    cache: IndexerCache,
}

impl<T: AFloat> Indexer<T> {
    pub fn new(view: View<T>) -> Self {
        let cache = IndexerCache::new(view.bounds(), view.options.cache_capacity);
        Self { view, cache }
    }

    pub fn get<'k>(&mut self, key: impl Into<Key<'k>>) -> Result<Selection<'_, T>> {
        match key.into() {
            Key::Position(i) => self.row(i).map(Selection::Row),
            Key::Slice { start, stop } => Ok(Selection::View(self.slice(start, stop))),
            Key::Column(name) => self.column(name).map(Selection::Column),
            Key::Take(positions) => self.take(positions).map(Selection::View),
        }
    }

    pub fn row(&self, i: isize) -> Result<Row<'_, T>> {
        self.view.get_row(i)
    }

    pub fn slice(&self, start: Option<isize>, stop: Option<isize>) -> View<T> {
        self.view.slice(start, stop)
    }

    pub fn column(&mut self, name: &str) -> Result<ColumnRef<'_, T>> {
        let col = self
            .cache
            .column(self.view.bounds(), &self.view.columns, name)?;
        Ok(self.view.column_at(col))
    }

    pub fn take(&self, positions: &[isize]) -> Result<View<T>> {
        self.view.take(positions)
    }

    #[inline]
    pub fn view(&self) -> &View<T> {
        &self.view
    }
}

impl<T: AFloat> View<T> {
    /// positional and label access relative to this View
    pub fn loc(&self) -> Indexer<T> {
        Indexer::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::df::{frame::tests::get_test_df, ErrorKind, FrameOptions};

    #[test]
    fn test_key_conversions() {
        assert_eq!(Key::from(-1isize), Key::Position(-1));
        assert_eq!(Key::from("a"), Key::Column("a"));
        assert_eq!(
            Key::from(1isize..3),
            Key::Slice {
                start: Some(1),
                stop: Some(3)
            }
        );
        assert_eq!(
            Key::from(..-1isize),
            Key::Slice {
                start: None,
                stop: Some(-1)
            }
        );
        assert_eq!(
            Key::from(..),
            Key::Slice {
                start: None,
                stop: None
            }
        );
        let positions = [0isize, 2];
        assert_eq!(Key::from(&positions[..]), Key::Take(&[0, 2]));
    }

    #[test]
    fn test_get_dispatch() {
        let df = get_test_df();
        let mut loc = df.loc();
        let row = loc.get(-1isize).unwrap().into_row().unwrap();
        assert_eq!(row.get("a").unwrap(), 10.);
        drop(row);
        let view = loc.get(1isize..3).unwrap().into_view().unwrap();
        assert_eq!(view.bounds(), (1, 3));
        assert!(view.shares_buffer_with(&df));
        let column = loc.get("c").unwrap().into_column().unwrap();
        assert_eq!(column.to_vec(), vec![3., 6., 9., 12.]);
        drop(column);
        let taken = loc.get(&[2isize, 0][..]).unwrap().into_view().unwrap();
        assert_eq!(taken.get_column("a").unwrap().to_vec(), vec![7., 1.]);
        assert!(!taken.shares_buffer_with(&df));
    }

    #[test]
    fn test_resolves_relative_to_own_view() {
        let df = get_test_df();
        let view = df.slice(Some(1), Some(3));
        let mut loc = view.loc();
        assert_eq!(loc.row(0).unwrap().offset(), 1);
        assert_eq!(loc.slice(Some(1), Some(100)).bounds(), (2, 3));
        assert_eq!(loc.column("a").unwrap().to_vec(), vec![4., 7.]);
        let err = loc.get(2isize).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Index);
        let err = loc.get("zz").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Key);
    }

    #[test]
    fn test_column_cache_is_bounded() {
        let df = crate::df::DataFrame::with_options(
            ndarray::Array2::<f64>::zeros((2, 3)),
            ["a", "b", "c"],
            FrameOptions::default().with_cache_capacity(2),
        )
        .unwrap();
        let mut loc = df.loc();
        for name in ["a", "b", "c", "a", "c"] {
            loc.column(name).unwrap();
        }
        assert_eq!(loc.cache.len(), 2);
        assert!(loc.column("missing").is_err());
        assert_eq!(loc.cache.len(), 2);
    }

    #[test]
    fn test_cache_resets_on_new_bounds() {
        let df = get_test_df();
        let mut cache = IndexerCache::new(df.bounds(), 8);
        assert_eq!(cache.column((0, 4), df.columns(), "b").unwrap(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.column((1, 4), df.columns(), "c").unwrap(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stepped_slice() {
        assert_eq!(
            Key::stepped_slice(Some(1), None, Some(1)).unwrap(),
            Key::Slice {
                start: Some(1),
                stop: None
            }
        );
        assert!(Key::stepped_slice(None, None, None).is_ok());
        for step in [2, -1, 0] {
            let err = Key::stepped_slice(None, None, Some(step)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_into_column_name() {
        assert_eq!(Key::from("a").into_column_name().unwrap(), "a");
        for key in [Key::Position(0), Key::from(..), Key::Take(&[1])] {
            let err = key.into_column_name().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert!(err.to_string().contains("string column names"));
        }
    }

    #[test]
    fn test_slice_key_clamps_like_view() {
        let df = get_test_df();
        let view = df.slice(Some(1), None);
        let mut loc = view.loc();
        let key = Key::stepped_slice(Some(-100), Some(100), None).unwrap();
        let sliced = loc.get(key).unwrap().into_view().unwrap();
        assert_eq!(sliced.bounds(), view.bounds());
        assert!(sliced.shares_buffer_with(&df));
    }

    #[test]
    fn test_cache_stays_warm_across_lookups() {
        let df = get_test_df();
        // the indexer keeps its own handle on the window
        let mut loc = df.slice(Some(2), None).loc();
        assert_eq!(loc.column("b").unwrap().to_vec(), vec![8., 11.]);
        assert_eq!(loc.cache.len(), 1);
        assert_eq!(loc.get(0isize).unwrap().into_row().unwrap().offset(), 2);
        assert_eq!(loc.column("b").unwrap().to_vec(), vec![8., 11.]);
        assert_eq!(loc.cache.len(), 1);
        assert_eq!(loc.view().bounds(), (2, 4));
    }
}
