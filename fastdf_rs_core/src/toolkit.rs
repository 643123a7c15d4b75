pub mod array;
