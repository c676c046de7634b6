//! buildgen-core - Bazel BUILD file generation for Go packages
//!
//! This crate provides functionality to:
//! - Resolve a Go import path to its directory, files and imports
//! - Apply Go build constraints to decide which files belong to the build
//! - Classify imports as local, vendored or standard library
//! - Render `go_library` and `go_test` targets into a BUILD file
pub mod bazel;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod parser;
pub mod services;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, ResolutionError, Result};
pub use types::*;

// Re-export main API components
pub use bazel::{BuildFileGenerator, generate, write_build_file};
pub use config::{BuildContext, GeneratorConfig};
pub use interfaces::PackageResolver;
pub use services::GoPathResolver;
