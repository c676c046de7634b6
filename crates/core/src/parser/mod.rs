//! Go source parsing and build constraint evaluation

pub mod constraint;
pub mod file_name;
pub mod go_parser;

// Re-export commonly used items
pub use constraint::{Constraint, header_constraint};
pub use file_name::{is_hidden, is_test_file, matches_file_name};
pub use go_parser::{GoFileHeader, GoParser};
