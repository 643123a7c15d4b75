use std::{fmt, sync::Arc, sync::RwLockReadGuard};

use itertools::izip;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

use super::{buffer::Buffer, columns::ColumnIndex, options::FrameOptions};
use crate::toolkit::array::AFloat;

mod display;
mod indexing;
mod meta;
mod na;
mod ops;

pub use indexing::{Indexer, Key, Selection};

/// A `[start, stop)` row window over a shared buffer.
///
/// Cloning a View is cheap, it only bumps reference counts.
#[derive(Debug, Clone)]
pub struct View<T: AFloat> {
    pub(crate) buffer: Buffer<T>,
    pub(crate) columns: Arc<ColumnIndex>,
    pub(crate) options: Arc<FrameOptions>,
    pub(crate) start: usize,
    pub(crate) stop: usize,
}

/// Read access to a View's whole window.
pub struct Values<'a, T> {
    guard: RwLockReadGuard<'a, Array2<T>>,
    start: usize,
    stop: usize,
}

impl<'a, T> Values<'a, T> {
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.guard.slice(s![self.start..self.stop, ..])
    }
}

/// Transient handle to one buffer row, keyed by column name.
pub struct Row<'a, T> {
    guard: RwLockReadGuard<'a, Array2<T>>,
    row: usize,
    columns: &'a ColumnIndex,
}

impl<'a, T: AFloat> Row<'a, T> {
    pub fn get(&self, name: &str) -> super::Result<T> {
        let col = self.columns.get_or_err(name)?;
        Ok(self.guard[[self.row, col]])
    }

    pub fn values(&self) -> ArrayView1<'_, T> {
        self.guard.row(self.row)
    }

    /// absolute row offset inside the buffer
    #[inline]
    pub fn offset(&self) -> usize {
        self.row
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        izip!(self.columns.names(), self.values()).map(|(name, &x)| (name.as_str(), x))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.values().to_vec()
    }
}

impl<T: AFloat> PartialEq for Row<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.values() == other.values()
    }
}

impl<T: AFloat> fmt::Debug for Row<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Transient handle to one column restricted to a View's window.
pub struct ColumnRef<'a, T> {
    guard: RwLockReadGuard<'a, Array2<T>>,
    start: usize,
    stop: usize,
    col: usize,
}

impl<'a, T: AFloat> ColumnRef<'a, T> {
    pub fn view(&self) -> ArrayView1<'_, T> {
        self.guard.slice(s![self.start..self.stop, self.col])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    pub fn get(&self, i: usize) -> Option<T> {
        self.view().get(i).copied()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.view().to_vec()
    }

    pub fn to_owned(&self) -> Array1<T> {
        self.view().to_owned()
    }
}

impl<T: AFloat> fmt::Debug for ColumnRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.view().iter()).finish()
    }
}
