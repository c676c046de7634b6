//! Handler for go_library rules

use super::{RuleEmitter, import_labels};
use crate::bazel::{GoTarget, GoTargetKind, SourceGlob};
use crate::types::PackageMetadata;

/// Emits the package's `go_library`; always applies
pub struct GoLibraryEmitter;

impl RuleEmitter for GoLibraryEmitter {
    fn applies(&self, _pkg: &PackageMetadata) -> bool {
        true
    }

    fn emit(&self, pkg: &PackageMetadata, root_prefix: &str) -> GoTarget {
        let ignored = pkg.ignored_go_files.iter().map(String::as_str);
        let srcs = SourceGlob::new(["*.go"]).excluding(std::iter::once("*_test.go").chain(ignored));

        GoTarget {
            kind: GoTargetKind::Library,
            name: pkg.name.clone(),
            srcs,
            deps: import_labels(pkg.library_deps(), root_prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_target() {
        let pkg = PackageMetadata::new("foo")
            .with_imports(["github.com/x/y", "fmt", "bar/baz"])
            .with_ignored_files(["gen.go", "old.go"]);

        let target = GoLibraryEmitter.emit(&pkg, "bar");
        assert_eq!(target.kind, GoTargetKind::Library);
        assert_eq!(target.name, "foo");
        assert_eq!(target.srcs.include, vec!["*.go"]);
        assert_eq!(target.srcs.exclude, vec!["*_test.go", "gen.go", "old.go"]);
        assert_eq!(target.deps, vec!["//baz", "//vendor/github.com/x/y"]);
    }

    #[test]
    fn test_library_applies_without_imports() {
        let pkg = PackageMetadata::new("foo");
        assert!(GoLibraryEmitter.applies(&pkg));
        assert!(GoLibraryEmitter.emit(&pkg, "bar").deps.is_empty());
    }
}
