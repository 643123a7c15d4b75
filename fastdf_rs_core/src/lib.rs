pub mod df;
pub mod toolkit;

pub use df::{
    ColumnIndex, ColumnRef, ColumnValue, DataFrame, ErrorKind, FrameError, FrameOptions, Indexer,
    Key, Result, Row, Selection, Values, View,
};
pub use toolkit::array::AFloat;
