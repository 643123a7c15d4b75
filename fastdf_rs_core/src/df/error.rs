use std::fmt;

use thiserror::Error;

/// coarse error categories, used by the bindings to pick an exception type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Key,
    Index,
    InvalidArgument,
    Busy,
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    #[error("axis must be 0, 1 or None, got {0}")]
    InvalidAxis(usize),
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("buffer is borrowed by a live row, column or values handle")]
    BufferBorrowed,
}

impl FrameError {
    /// the error raised when a column assignment is keyed by anything but a name
    pub fn assignment_key(got: impl fmt::Display) -> Self {
        FrameError::InvalidArgument(format!(
            "only string column names are supported for assignment, got {got}"
        ))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FrameError::ColumnNotFound(_) => ErrorKind::Key,
            FrameError::IndexOutOfRange { .. } => ErrorKind::Index,
            FrameError::InvalidAxis(_)
            | FrameError::ShapeMismatch { .. }
            | FrameError::DuplicateColumn(_)
            | FrameError::InvalidArgument(_)
            | FrameError::ThreadPool(_) => ErrorKind::InvalidArgument,
            FrameError::BufferBorrowed => ErrorKind::Busy,
        }
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;

#[inline]
pub(crate) fn check_axis(axis: usize) -> Result<usize> {
    if axis > 1 {
        Err(FrameError::InvalidAxis(axis))
    } else {
        Ok(axis)
    }
}
