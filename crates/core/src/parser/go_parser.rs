use crate::error::{Error, Result};
use tree_sitter::{Node, Parser};

/// The parts of a Go file that matter for package resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoFileHeader {
    pub package_name: String,
    pub imports: Vec<String>,
    /// `//` comment lines in the header, i.e. before the last blank line
    /// preceding the package clause
    pub header_comments: Vec<String>,
}

pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<tree_sitter::Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseError("Failed to parse source code".to_string()))
    }

    /// Extract the package clause, imports and header comments.
    ///
    /// Fails only when no package clause can be found.
    pub fn parse_header(&mut self, source: &str) -> Result<GoFileHeader> {
        let tree = self.parse(source)?;
        let root = tree.root_node();

        let mut leading: Vec<Node> = Vec::new();
        let mut package_clause = None;
        let mut imports = Vec::new();

        for child in root.children(&mut root.walk()) {
            match child.kind() {
                "comment" if package_clause.is_none() => leading.push(child),
                "package_clause" if package_clause.is_none() => package_clause = Some(child),
                "import_declaration" => collect_imports(child, source, &mut imports),
                _ => {}
            }
        }

        let clause = package_clause
            .ok_or_else(|| Error::ParseError("expected 'package' clause".to_string()))?;
        let package_name = clause
            .children(&mut clause.walk())
            .find(|c| c.kind() == "package_identifier")
            .map(|c| node_text(c, source).to_string())
            .ok_or_else(|| Error::ParseError("package clause without a name".to_string()))?;

        Ok(GoFileHeader {
            package_name,
            imports,
            header_comments: header_comments(&leading, clause, source),
        })
    }
}

fn collect_imports(decl: Node, source: &str, out: &mut Vec<String>) {
    for child in decl.children(&mut decl.walk()) {
        match child.kind() {
            "import_spec" => out.extend(import_spec_path(child, source)),
            "import_spec_list" => {
                for spec in child.children(&mut child.walk()) {
                    if spec.kind() == "import_spec" {
                        out.extend(import_spec_path(spec, source));
                    }
                }
            }
            _ => {}
        }
    }
}

fn import_spec_path(spec: Node, source: &str) -> Option<String> {
    let path = spec.child_by_field_name("path")?;
    let text = node_text(path, source);
    let unquoted = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('`').and_then(|t| t.strip_suffix('`')))?;
    Some(unquoted.to_string())
}

/// Keep only the `//` comments that end before the last blank line ahead
/// of the package clause.
fn header_comments(leading: &[Node], clause: Node, source: &str) -> Vec<String> {
    let mut cut = 0;
    let mut prev_end = None;
    for (idx, start_row) in leading
        .iter()
        .map(|c| c.start_position().row)
        .chain(std::iter::once(clause.start_position().row))
        .enumerate()
    {
        if let Some(end) = prev_end {
            if start_row > end + 1 {
                cut = idx;
            }
        }
        prev_end = Some(
            leading
                .get(idx)
                .map(|c| c.end_position().row)
                .unwrap_or(start_row),
        );
    }

    leading[..cut]
        .iter()
        .map(|c| node_text(*c, source))
        .filter(|text| text.starts_with("//"))
        .map(str::to_string)
        .collect()
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_creation() {
        assert!(GoParser::new().is_ok());
    }

    #[test]
    fn test_single_and_grouped_imports() {
        let mut parser = GoParser::new().unwrap();
        let source = r#"package foo

import "fmt"

import (
	"strings"
	alias "github.com/x/y"
	_ "gopkg.in/yaml.v2"
	. "bar/baz"
)

func main() {}
"#;
        let header = parser.parse_header(source).unwrap();
        assert_eq!(header.package_name, "foo");
        assert_eq!(
            header.imports,
            vec!["fmt", "strings", "github.com/x/y", "gopkg.in/yaml.v2", "bar/baz"]
        );
        assert!(header.header_comments.is_empty());
    }

    #[test]
    fn test_raw_string_import() {
        let mut parser = GoParser::new().unwrap();
        let header = parser
            .parse_header("package foo\n\nimport `net/http`\n")
            .unwrap();
        assert_eq!(header.imports, vec!["net/http"]);
    }

    #[test]
    fn test_header_comments_need_blank_line() {
        let mut parser = GoParser::new().unwrap();
        let source = "// Copyright 2016\n\n//go:build linux\n// +build linux\n\n// Package foo is documented.\npackage foo\n";
        let header = parser.parse_header(source).unwrap();
        assert_eq!(
            header.header_comments,
            vec!["// Copyright 2016", "//go:build linux", "// +build linux"]
        );
    }

    #[test]
    fn test_doc_comment_is_not_header() {
        let mut parser = GoParser::new().unwrap();
        let source = "// +build ignore\npackage foo\n";
        let header = parser.parse_header(source).unwrap();
        assert!(header.header_comments.is_empty());
    }

    #[test]
    fn test_external_test_package() {
        let mut parser = GoParser::new().unwrap();
        let source = "package foo_test\n\nimport (\n\t\"testing\"\n\n\t\"bar/foo\"\n)\n";
        let header = parser.parse_header(source).unwrap();
        assert_eq!(header.package_name, "foo_test");
        assert_eq!(header.imports, vec!["testing", "bar/foo"]);
    }

    #[test]
    fn test_missing_package_clause() {
        let mut parser = GoParser::new().unwrap();
        assert!(parser.parse_header("func main() {}\n").is_err());
        assert!(parser.parse_header("").is_err());
    }
}
