//! Seams between the generator and its collaborators

pub mod package_resolver;

pub use package_resolver::PackageResolver;
