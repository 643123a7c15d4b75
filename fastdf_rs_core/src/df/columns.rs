use std::collections::HashMap;

use super::error::{FrameError, Result};

/// Ordered column name -> buffer column offset mapping.
///
/// Offsets are always the insertion positions, so they form a contiguous
/// permutation of `0..len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    names: Vec<String>,
    offsets: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Result<Self> {
        let mut index = Self::default();
        for name in names {
            index.push(name.into())?;
        }
        Ok(index)
    }

    fn push(&mut self, name: String) -> Result<()> {
        if self.offsets.contains_key(&name) {
            return Err(FrameError::DuplicateColumn(name));
        }
        self.offsets.insert(name.clone(), self.names.len());
        self.names.push(name);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.offsets.get(name).copied()
    }

    pub fn get_or_err(&self, name: &str) -> Result<usize> {
        self.get(name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.offsets.contains_key(name)
    }

    pub fn name(&self, offset: usize) -> Option<&str> {
        self.names.get(offset).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.names.iter().map(String::as_str).zip(0..)
    }

    /// a copy of this index with `name` added as the last column
    pub fn with_appended(&self, name: &str) -> Result<Self> {
        let mut next = self.clone();
        next.push(name.to_string())?;
        Ok(next)
    }

    /// An independent index over the columns at `offsets`, renumbered from 0
    /// in the given order. Unknown offsets are skipped.
    pub fn select(&self, offsets: &[usize]) -> Self {
        let mut selected = Self::default();
        offsets
            .iter()
            .filter_map(|&offset| self.names.get(offset))
            .for_each(|name| {
                selected.offsets.insert(name.clone(), selected.names.len());
                selected.names.push(name.clone());
            });
        selected
    }
}
