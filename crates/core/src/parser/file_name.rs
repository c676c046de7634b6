use crate::config::BuildContext;
use crate::config::build_context::{KNOWN_ARCH, KNOWN_OS};

/// Whether a `.go` file name passes the `_GOOS`, `_GOARCH` and
/// `_GOOS_GOARCH` suffix rules for the given context.
pub fn matches_file_name(file_name: &str, ctx: &BuildContext) -> bool {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    // Everything before the first underscore is ignored
    let Some(idx) = stem.find('_') else {
        return true;
    };
    let mut parts: Vec<&str> = stem[idx..].split('_').collect();
    if parts.last() == Some(&"test") {
        parts.pop();
    }

    let n = parts.len();
    if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
        return ctx.matches_tag(parts[n - 1]) && ctx.matches_tag(parts[n - 2]);
    }
    if n >= 1 && (KNOWN_OS.contains(&parts[n - 1]) || KNOWN_ARCH.contains(&parts[n - 1])) {
        return ctx.matches_tag(parts[n - 1]);
    }
    true
}

/// Files the Go tool never considers, regardless of constraints
pub fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('_') || file_name.starts_with('.')
}

pub fn is_test_file(file_name: &str) -> bool {
    file_name.ends_with("_test.go")
}
