//! Emitters for the rule types written to a BUILD file

mod go_library;

pub use go_library::GoLibraryEmitter;
pub use go_test::GoTestEmitter;

use super::GoTarget;
use crate::types::{PackageMetadata, classify};

/// Trait for turning package metadata into one target
pub trait RuleEmitter {
    /// Whether this rule should be emitted for the package
    fn applies(&self, pkg: &PackageMetadata) -> bool;

    /// Build the target, classifying imports against `root_prefix`
    fn emit(&self, pkg: &PackageMetadata, root_prefix: &str) -> GoTarget;
}

/// Labels for the given imports, standard library entries dropped.
pub(crate) fn import_labels<'a>(
    imports: impl IntoIterator<Item = &'a str>,
    root_prefix: &str,
) -> Vec<String> {
    imports
        .into_iter()
        .filter_map(|import| {
            let class = classify(import, root_prefix);
            class.log(import);
            class.label(root_prefix)
        })
        .collect()
}
