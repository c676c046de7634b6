//! BUILD file generation for Go packages

pub mod build_file;
pub mod generator;
pub mod rules;
pub mod target;

pub use build_file::{BUILD_FILE_NAME, write_build_file};
pub use generator::{BUILD_HEADER, BuildFileGenerator, generate};
pub use rules::{GoLibraryEmitter, GoTestEmitter, RuleEmitter};
pub use target::{GoTarget, GoTargetKind, SourceGlob};
