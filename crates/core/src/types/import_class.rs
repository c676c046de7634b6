use serde::Serialize;
use tracing::info;

/// Hosts whose packages are vendored under `//vendor/`
pub const VENDOR_HOSTS: &[&str] = &["github.com", "gopkg.in", "golang.org"];

/// Where an import path lives relative to the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ImportClass {
    /// Under the root prefix; holds the path with `<root>/` removed
    Local(String),
    /// Hosted on one of [`VENDOR_HOSTS`]
    Vendor { host: &'static str, path: String },
    /// Anything else; no dependency is emitted
    Std,
}

/// Classify an import path against the workspace root prefix.
///
/// The root prefix is checked first so a vendor-hosted workspace still
/// produces local labels.
pub fn classify(import_path: &str, root_prefix: &str) -> ImportClass {
    if !root_prefix.is_empty() {
        if import_path == root_prefix {
            return ImportClass::Local(String::new());
        }
        if let Some(rest) = import_path
            .strip_prefix(root_prefix)
            .and_then(|r| r.strip_prefix('/'))
        {
            return ImportClass::Local(rest.to_string());
        }
    }

    let first = import_path.split('/').next().unwrap_or_default();
    match VENDOR_HOSTS.iter().copied().find(|host| *host == first) {
        Some(host) => ImportClass::Vendor {
            host,
            path: import_path.to_string(),
        },
        None => ImportClass::Std,
    }
}

impl ImportClass {
    /// Bazel label for this import, `None` for the standard library.
    ///
    /// An import of the root package itself maps to `//:<last segment>`.
    pub fn label(&self, root_prefix: &str) -> Option<String> {
        match self {
            ImportClass::Local(rest) if rest.is_empty() => {
                let name = root_prefix.rsplit('/').next().unwrap_or(root_prefix);
                Some(format!("//:{name}"))
            }
            ImportClass::Local(rest) => Some(format!("//{rest}")),
            ImportClass::Vendor { path, .. } => Some(format!("//vendor/{path}")),
            ImportClass::Std => None,
        }
    }

    /// The classification log line for `import_path`.
    ///
    /// Local imports show the path relative to the root; the root package
    /// itself is shown by its full import path.
    pub fn log_message(&self, import_path: &str) -> String {
        match self {
            ImportClass::Local(rest) if rest.is_empty() => format!("Local import: {import_path}"),
            ImportClass::Local(rest) => format!("Local import: {rest}"),
            ImportClass::Vendor { host, .. } => match *host {
                "github.com" => format!("Github import: {import_path}"),
                "gopkg.in" => format!("gopkg import: {import_path}"),
                _ => format!("golang import: {import_path}"),
            },
            ImportClass::Std => format!("Std import: {import_path}"),
        }
    }

    pub fn log(&self, import_path: &str) {
        info!("{}", self.log_message(import_path));
    }
}
