pub mod import_class;
pub mod package;

// Re-export commonly used types
pub use import_class::{ImportClass, VENDOR_HOSTS, classify};
pub use package::PackageMetadata;
