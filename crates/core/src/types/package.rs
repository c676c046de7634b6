use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A resolved Go package: its directory, file lists and import lists.
///
/// Produced by a [`PackageResolver`](crate::interfaces::PackageResolver) and
/// consumed read-only by the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub dir: PathBuf,
    pub name: String,
    pub import_path: String,
    /// Non-test `.go` files that belong to the build
    pub go_files: Vec<String>,
    /// `.go` files excluded by build constraints
    pub ignored_go_files: Vec<String>,
    /// `_test.go` files declaring the package itself
    pub test_go_files: Vec<String>,
    /// `_test.go` files declaring `<name>_test`
    pub xtest_go_files: Vec<String>,
    pub imports: Vec<String>,
    pub test_imports: Vec<String>,
}

impl PackageMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_test_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_test_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_go_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ignored_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_go_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_tests(&self) -> bool {
        !self.test_go_files.is_empty() || !self.xtest_go_files.is_empty()
    }

    /// Library imports, de-duplicated and sorted.
    pub fn library_deps(&self) -> Vec<&str> {
        sorted_unique(self.imports.iter())
    }

    /// Union of library and test imports, de-duplicated and sorted.
    pub fn test_deps(&self) -> Vec<&str> {
        sorted_unique(self.imports.iter().chain(self.test_imports.iter()))
    }

    /// Ignored files that would otherwise match the test glob
    pub fn ignored_test_files(&self) -> impl Iterator<Item = &str> {
        self.ignored_go_files
            .iter()
            .map(String::as_str)
            .filter(|f| f.ends_with("_test.go"))
    }
}

fn sorted_unique<'a>(imports: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    imports
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
