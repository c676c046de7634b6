//! Build constraint parsing and evaluation
//!
//! Supports both the `//go:build` expression syntax and the legacy
//! `// +build` line syntax. When a file carries a `//go:build` line the
//! `// +build` lines are ignored.

use crate::config::BuildContext;
use regex::Regex;
use std::sync::LazyLock;

static GO_BUILD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//go:build(?:\s+(.*))?$").expect("valid regex"));

static PLUS_BUILD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^// \+build(?:\s+(.*))?$").expect("valid regex"));

/// A parsed build constraint expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Tag(String),
    Not(Box<Constraint>),
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
}

impl Constraint {
    pub fn eval(&self, ctx: &BuildContext) -> bool {
        match self {
            Constraint::Tag(tag) => ctx.matches_tag(tag),
            Constraint::Not(inner) => !inner.eval(ctx),
            Constraint::And(a, b) => a.eval(ctx) && b.eval(ctx),
            Constraint::Or(a, b) => a.eval(ctx) || b.eval(ctx),
        }
    }

    fn and(a: Constraint, b: Constraint) -> Constraint {
        Constraint::And(Box::new(a), Box::new(b))
    }

    fn or(a: Constraint, b: Constraint) -> Constraint {
        Constraint::Or(Box::new(a), Box::new(b))
    }
}

/// Combine the constraint lines found in a file header.
///
/// Returns `Ok(None)` when the header has no constraint lines.
pub fn header_constraint<'a>(
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<Option<Constraint>, String> {
    let mut go_build = None;
    let mut plus_build: Option<Constraint> = None;

    for line in lines {
        let line = line.trim_end();
        if let Some(caps) = GO_BUILD_LINE.captures(line) {
            if go_build.is_some() {
                return Err("multiple //go:build comments".to_string());
            }
            let expr = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            go_build = Some(parse_go_build(expr)?);
        } else if let Some(caps) = PLUS_BUILD_LINE.captures(line) {
            let expr = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let parsed = parse_plus_build(expr)?;
            plus_build = Some(match plus_build {
                Some(prev) => Constraint::and(prev, parsed),
                None => parsed,
            });
        }
    }

    Ok(go_build.or(plus_build))
}

/// Parse a `// +build` line body: spaces mean OR, commas mean AND.
pub fn parse_plus_build(expr: &str) -> Result<Constraint, String> {
    let mut result: Option<Constraint> = None;
    for field in expr.split_whitespace() {
        let mut conj: Option<Constraint> = None;
        for term in field.split(',') {
            let (negated, tag) = match term.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, term),
            };
            if !is_valid_tag(tag) {
                return Err(format!("invalid +build tag {term:?}"));
            }
            let atom = Constraint::Tag(tag.to_string());
            let atom = if negated {
                Constraint::Not(Box::new(atom))
            } else {
                atom
            };
            conj = Some(match conj {
                Some(prev) => Constraint::and(prev, atom),
                None => atom,
            });
        }
        if let Some(conj) = conj {
            result = Some(match result {
                Some(prev) => Constraint::or(prev, conj),
                None => conj,
            });
        }
    }
    result.ok_or_else(|| "empty +build line".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Tag(String),
    Not,
    And,
    Or,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '!' => tokens.push(Token::Not),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            '&' | '|' => {
                if chars.next_if(|&(_, next)| next == c).is_none() {
                    return Err(format!("unexpected {c:?} at offset {i}"));
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            _ if is_tag_char(c) => {
                let mut end = i + c.len_utf8();
                while let Some((j, next)) = chars.next_if(|&(_, next)| is_tag_char(next)) {
                    end = j + next.len_utf8();
                }
                tokens.push(Token::Tag(expr[i..end].to_string()));
            }
            _ => return Err(format!("invalid character {c:?} in build constraint")),
        }
    }
    Ok(tokens)
}

/// Parse a `//go:build` expression with `||`, `&&`, `!` and parentheses.
pub fn parse_go_build(expr: &str) -> Result<Constraint, String> {
    let tokens = tokenize(expr)?;
    let mut parser = ExprParser { tokens, pos: 0 };
    let constraint = parser.or_expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(format!("unexpected token in //go:build {expr:?}"));
    }
    Ok(constraint)
}

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn or_expr(&mut self) -> Result<Constraint, String> {
        let mut lhs = self.and_expr()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            lhs = Constraint::or(lhs, self.and_expr()?);
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Constraint, String> {
        let mut lhs = self.not_expr()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            lhs = Constraint::and(lhs, self.not_expr()?);
        }
        Ok(lhs)
    }

    fn not_expr(&mut self) -> Result<Constraint, String> {
        match self.bump() {
            Some(Token::Not) => Ok(Constraint::Not(Box::new(self.not_expr()?))),
            Some(Token::LParen) => {
                let inner = self.or_expr()?;
                match self.bump() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err("missing ) in //go:build".to_string()),
                }
            }
            Some(Token::Tag(tag)) => Ok(Constraint::Tag(tag)),
            Some(other) => Err(format!("unexpected {other:?} in //go:build")),
            None => Err("unexpected end of //go:build expression".to_string()),
        }
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(is_tag_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> BuildContext {
        BuildContext {
            goos: "linux".to_string(),
            goarch: "amd64".to_string(),
            ..Default::default()
        }
    }

    fn holds(lines: &[&str]) -> bool {
        header_constraint(lines.iter().copied())
            .unwrap()
            .map(|c| c.eval(&ctx()))
            .unwrap_or(true)
    }

    #[test]
    fn test_no_constraint_lines() {
        assert_eq!(header_constraint(["// Package foo does things."]).unwrap(), None);
        assert!(holds(&["// Copyright 2016"]));
    }

    #[test]
    fn test_go_build_expressions() {
        assert!(holds(&["//go:build linux"]));
        assert!(!holds(&["//go:build ignore"]));
        assert!(holds(&["//go:build linux && amd64"]));
        assert!(!holds(&["//go:build linux && !amd64"]));
        assert!(holds(&["//go:build windows || (linux && !arm)"]));
        assert!(!holds(&["//go:build !(linux || darwin)"]));
    }

    #[test]
    fn test_go_build_precedence() {
        // && binds tighter than ||
        let c = parse_go_build("a || b && c").unwrap();
        assert_eq!(
            c,
            Constraint::or(
                Constraint::Tag("a".into()),
                Constraint::and(Constraint::Tag("b".into()), Constraint::Tag("c".into()))
            )
        );
    }

    #[test]
    fn test_plus_build_lines() {
        assert!(!holds(&["// +build ignore"]));
        assert!(holds(&["// +build linux darwin"]));
        assert!(!holds(&["// +build linux,!amd64"]));
        assert!(holds(&["// +build linux,amd64 windows"]));
        // Multiple lines are AND-ed
        assert!(!holds(&["// +build linux", "// +build windows"]));
    }

    #[test]
    fn test_go_build_overrides_plus_build() {
        assert!(holds(&["//go:build linux", "// +build ignore"]));
    }

    #[test]
    fn test_malformed_constraints() {
        assert!(parse_go_build("linux &&").is_err());
        assert!(parse_go_build("linux & amd64").is_err());
        assert!(parse_go_build("(linux").is_err());
        assert!(parse_go_build("linux)").is_err());
        assert!(parse_go_build("").is_err());
        assert!(parse_plus_build("linux,,amd64").is_err());
        assert!(header_constraint(["//go:build a", "//go:build b"]).is_err());
    }

    #[test]
    fn test_go_build_requires_word_boundary() {
        // "//go:buildfoo" is not a constraint line
        assert_eq!(header_constraint(["//go:buildfoo"]).unwrap(), None);
    }

    #[test]
    fn test_plus_build_needs_single_space() {
        for line in ["//+build ignore", "//  +build ignore", "//\t+build ignore"] {
            assert_eq!(header_constraint([line]).unwrap(), None, "{line}");
        }
        assert!(holds(&["//+build ignore"]));
    }
}
