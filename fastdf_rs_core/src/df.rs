//! # df
//!
//! DataFrame-style views over one dense, row-major float buffer.
//!
//! # Design
//!
//! A [`DataFrame`] takes ownership of externally supplied values and is the only
//! thing allowed to mutate them. Everything derived from it is a [`View`]: a
//! `[start, stop)` row window plus a shared [`ColumnIndex`], both addressing the
//! owner's buffer without copying it.
//!
//! Operations split into two groups:
//!
//! - view operations (`slice`, `get_row`, `get_column`, the [`Indexer`]) are
//!   bounds bookkeeping only, and every result keeps reading the shared buffer.
//! - transform operations (`shift`, `fillna`, `dropna`, `drop_columns`, `take`)
//!   always materialize a new buffer, so later writes on the owner never reach them.
//!
//! Appending a column on the owner is copy-on-grow: the owner swaps in a new,
//! fully populated buffer, and Views created before the append keep reading
//! the previous one.

mod buffer;
pub mod columns;
pub mod error;
pub mod frame;
pub mod options;
pub mod view;

pub use columns::ColumnIndex;
pub use error::{ErrorKind, FrameError, Result};
pub use frame::{ColumnValue, DataFrame};
pub use options::FrameOptions;
pub use view::{ColumnRef, Indexer, Key, Row, Selection, Values, View};
