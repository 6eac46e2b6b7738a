//! CSV output of company records

pub mod writer;

pub use writer::{ColumnPolicy, HeaderState, RowWriter};
