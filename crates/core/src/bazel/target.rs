//! In-memory form of the targets written to a BUILD file

use std::io::{self, Write};

/// A Go target ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoTarget {
    pub kind: GoTargetKind,
    pub name: String,
    pub srcs: SourceGlob,
    /// Labels in emission order
    pub deps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoTargetKind {
    Library,
    Test,
}

impl GoTargetKind {
    /// Rule name as loaded from the rule definitions file
    pub fn rule_name(&self) -> &'static str {
        match self {
            GoTargetKind::Library => "go_library",
            GoTargetKind::Test => "go_test",
        }
    }
}

/// A `glob([...], exclude = [...])` expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceGlob {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl SourceGlob {
    pub fn new<I, S>(include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn excluding<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(exclude.into_iter().map(Into::into));
        self
    }

    pub fn render(&self) -> String {
        if self.exclude.is_empty() {
            format!("glob([{}])", quote_list(&self.include))
        } else {
            format!(
                "glob([{}], exclude = [{}])",
                quote_list(&self.include),
                quote_list(&self.exclude)
            )
        }
    }
}

impl GoTarget {
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}(name = {},", self.kind.rule_name(), quote(&self.name))?;
        writeln!(out, "  srcs = {},", self.srcs.render())?;
        writeln!(out, "  deps = [")?;
        for dep in &self.deps {
            writeln!(out, "    {},", quote(dep))?;
        }
        writeln!(out, "  ],")?;
        writeln!(out, ")")
    }
}

/// Single-quoted Starlark string literal
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| quote(v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("foo"), "'foo'");
        assert_eq!(quote("it's"), "'it\\'s'");
        assert_eq!(quote("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_glob_render() {
        assert_eq!(SourceGlob::new(["*_test.go"]).render(), "glob(['*_test.go'])");
        assert_eq!(
            SourceGlob::new(["*.go"])
                .excluding(["*_test.go", "gen.go"])
                .render(),
            "glob(['*.go'], exclude = ['*_test.go', 'gen.go'])"
        );
    }

    #[test]
    fn test_target_rendering() {
        let target = GoTarget {
            kind: GoTargetKind::Library,
            name: "foo".to_string(),
            srcs: SourceGlob::new(["*.go"]).excluding(["*_test.go"]),
            deps: vec!["//baz".to_string()],
        };
        let mut out = Vec::new();
        target.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "go_library(name = 'foo',\n  srcs = glob(['*.go'], exclude = ['*_test.go']),\n  deps = [\n    '//baz',\n  ],\n)\n"
        );
    }

    #[test]
    fn test_empty_deps_rendering() {
        let target = GoTarget {
            kind: GoTargetKind::Test,
            name: "foo_test".to_string(),
            srcs: SourceGlob::new(["*_test.go"]),
            deps: Vec::new(),
        };
        let mut out = Vec::new();
        target.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "go_test(name = 'foo_test',\n  srcs = glob(['*_test.go']),\n  deps = [\n  ],\n)\n"
        );
    }
}
