//! Package resolution interface
//!
//! Turns a Go import path into the metadata the generator consumes. The
//! generator never touches the filesystem itself, so tests and other
//! front-ends can supply metadata from anywhere.

use crate::{error::Result, types::PackageMetadata};

/// Trait for resolving an import path to package metadata
pub trait PackageResolver {
    /// Resolve the named package
    fn resolve(&self, import_path: &str) -> Result<PackageMetadata>;
}

impl<F> PackageResolver for F
where
    F: Fn(&str) -> Result<PackageMetadata>,
{
    fn resolve(&self, import_path: &str) -> Result<PackageMetadata> {
        self(import_path)
    }
}
