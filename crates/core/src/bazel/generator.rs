//! Renders a package's BUILD file

use super::rules::{GoLibraryEmitter, GoTestEmitter, RuleEmitter};
use super::GoTarget;
use crate::config::GeneratorConfig;
use crate::types::PackageMetadata;
use std::io::{self, Write};

/// Visibility and rule-loading preamble written at the top of every file
pub const BUILD_HEADER: &str = "package(default_visibility = ['//visibility:public'])

load('/tools/def', 'go_library', 'go_test')";

/// Turns package metadata into BUILD file text
pub struct BuildFileGenerator {
    root_prefix: String,
    include_tests: bool,
    library: GoLibraryEmitter,
    test: GoTestEmitter,
}

impl BuildFileGenerator {
    pub fn new(root_prefix: impl Into<String>) -> Self {
        Self {
            root_prefix: root_prefix.into(),
            include_tests: true,
            library: GoLibraryEmitter,
            test: GoTestEmitter,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.root_prefix.clone()).with_tests(config.include_tests)
    }

    pub fn with_tests(mut self, include_tests: bool) -> Self {
        self.include_tests = include_tests;
        self
    }

    /// Targets in emission order: the library, then the test if any
    pub fn targets(&self, pkg: &PackageMetadata) -> Vec<GoTarget> {
        let mut emitters: Vec<&dyn RuleEmitter> = vec![&self.library];
        if self.include_tests {
            emitters.push(&self.test);
        }

        emitters
            .into_iter()
            .filter(|emitter| emitter.applies(pkg))
            .map(|emitter| emitter.emit(pkg, &self.root_prefix))
            .collect()
    }

    /// Write the full BUILD file for `pkg` into `out`
    pub fn write_to<W: Write>(&self, pkg: &PackageMetadata, out: &mut W) -> io::Result<()> {
        writeln!(out, "{BUILD_HEADER}")?;
        for target in self.targets(pkg) {
            writeln!(out)?;
            target.write_to(out)?;
        }
        Ok(())
    }

    pub fn generate(&self, pkg: &PackageMetadata) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(pkg, &mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// Render the BUILD file for `pkg` in one call
pub fn generate(root_prefix: &str, pkg: &PackageMetadata, include_tests: bool) -> String {
    BuildFileGenerator::new(root_prefix)
        .with_tests(include_tests)
        .generate(pkg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo() -> PackageMetadata {
        PackageMetadata::new("foo").with_imports(["bar/baz", "github.com/x/y", "fmt"])
    }

    #[test]
    fn test_library_only_output() {
        let out = generate("bar", &foo(), true);
        assert_eq!(
            out,
            "package(default_visibility = ['//visibility:public'])

load('/tools/def', 'go_library', 'go_test')

go_library(name = 'foo',
  srcs = glob(['*.go'], exclude = ['*_test.go']),
  deps = [
    '//baz',
    '//vendor/github.com/x/y',
  ],
)
"
        );
        assert!(!out.contains("go_test("));
        assert!(!out.contains("fmt"));
    }

    #[test]
    fn test_library_and_test_output() {
        let pkg = PackageMetadata {
            import_path: "bar/foo".to_string(),
            ..foo()
                .with_test_files(["foo_test.go"])
                .with_test_imports(["testing", "gopkg.in/check.v1", "bar/foo", "bar/baz"])
                .with_ignored_files(["gen.go"])
        };

        let out = generate("bar", &pkg, true);
        assert_eq!(
            out,
            "package(default_visibility = ['//visibility:public'])

load('/tools/def', 'go_library', 'go_test')

go_library(name = 'foo',
  srcs = glob(['*.go'], exclude = ['*_test.go', 'gen.go']),
  deps = [
    '//baz',
    '//vendor/github.com/x/y',
  ],
)

go_test(name = 'foo_test',
  srcs = glob(['*_test.go']),
  deps = [
    ':foo',
    '//baz',
    '//vendor/github.com/x/y',
    '//vendor/gopkg.in/check.v1',
  ],
)
"
        );

        let test_block = &out[out.find("go_test(").unwrap()..];
        for label in [":foo", "//baz", "//vendor/github.com/x/y"] {
            assert_eq!(test_block.matches(&format!("'{label}'")).count(), 1, "{label}");
        }
    }

    #[test]
    fn test_test_target_with_only_std_imports() {
        let pkg = PackageMetadata::new("foo")
            .with_test_files(["foo_test.go"])
            .with_test_imports(["testing"]);

        let out = generate("bar", &pkg, true);
        assert_eq!(out.matches("go_test(").count(), 1);
        assert!(out.contains("go_test(name = 'foo_test',"));
        assert!(out.contains("    ':foo',\n"));
        assert!(!out.contains("testing"));
    }

    #[test]
    fn test_blank_line_between_targets() {
        let pkg = foo().with_test_files(["foo_test.go"]);
        let out = generate("bar", &pkg, true);
        assert!(out.contains(")\n\ngo_test("));
        assert_eq!(out.matches("go_library(").count(), 1);
    }

    #[test]
    fn test_tests_can_be_disabled() {
        let pkg = foo().with_test_files(["foo_test.go"]);
        let out = generate("bar", &pkg, false);
        assert!(!out.contains("go_test("));
    }

    #[test]
    fn test_library_deps_sorted_regardless_of_input_order() {
        let a = PackageMetadata::new("foo").with_imports(["github.com/z/z", "bar/b", "bar/a"]);
        let b = PackageMetadata::new("foo").with_imports(["bar/a", "github.com/z/z", "bar/b"]);
        let out = generate("bar", &a, true);
        assert_eq!(out, generate("bar", &b, true));
        let a_pos = out.find("'//a'").unwrap();
        let b_pos = out.find("'//b'").unwrap();
        assert!(a_pos < b_pos);
    }

    #[test]
    fn test_local_label_emitted_once() {
        let pkg = PackageMetadata::new("foo").with_imports(["bar/baz", "bar/baz"]);
        let out = generate("bar", &pkg, true);
        assert_eq!(out.matches("'//baz'").count(), 1);
    }

    #[test]
    fn test_each_ignored_file_excluded() {
        let pkg = foo().with_ignored_files(["a.go", "b_windows.go", "c.go"]);
        let out = generate("bar", &pkg, true);
        assert!(out.contains("exclude = ['*_test.go', 'a.go', 'b_windows.go', 'c.go']"));
    }

    #[test]
    fn test_idempotent() {
        let pkg = foo()
            .with_test_files(["foo_test.go"])
            .with_test_imports(["github.com/a/b"]);
        let generator = BuildFileGenerator::new("bar");
        assert_eq!(generator.generate(&pkg), generator.generate(&pkg));
    }

    #[test]
    fn test_from_config() {
        let config = GeneratorConfig::new(Some("bar/foo"), Some("bar"))
            .unwrap()
            .with_tests(false);
        let pkg = foo().with_test_files(["foo_test.go"]);
        let out = BuildFileGenerator::from_config(&config).generate(&pkg);
        assert!(out.contains("'//baz'"));
        assert!(!out.contains("go_test("));
    }
}
