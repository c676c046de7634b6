pub mod generate;

pub use generate::{OutputMode, generate_command};
