pub mod args;

pub use args::normalize_go_flags;
