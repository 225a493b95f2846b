//! Parsing of the translation table CSV dialect.

pub mod cell;
pub mod lines;
pub mod table;

pub use cell::CellReader;
pub use lines::{
    LineJoiner,
    join_lines,
};
pub use table::TableBuilder;
