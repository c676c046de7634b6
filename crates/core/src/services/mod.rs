//! Concrete implementations of the interface traits

pub mod gopath_resolver;

pub use gopath_resolver::GoPathResolver;
