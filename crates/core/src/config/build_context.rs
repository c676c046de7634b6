//! Target platform and search roots used when resolving a Go package

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Operating systems recognised in file name suffixes and build tags
pub const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

/// Architectures recognised in file name suffixes and build tags
pub const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// Operating systems that satisfy the `unix` build tag
pub const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

/// Highest `go1.N` release tag considered satisfied
pub const GO_RELEASE_MINOR: u32 = 23;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContext {
    pub goos: String,
    pub goarch: String,
    pub goroot: Option<PathBuf>,
    pub gopath: Vec<PathBuf>,
    pub cgo_enabled: bool,
    /// Extra tags from `--tags`
    pub build_tags: Vec<String>,
    pub release_minor: u32,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            goos: host_goos().to_string(),
            goarch: host_goarch().to_string(),
            goroot: None,
            gopath: Vec::new(),
            cgo_enabled: true,
            build_tags: Vec::new(),
            release_minor: GO_RELEASE_MINOR,
        }
    }
}

impl BuildContext {
    /// Read GOOS, GOARCH, GOROOT, GOPATH and CGO_ENABLED from the environment.
    ///
    /// Without `GOROOT`, falls back to `go env GOROOT`. Without `CGO_ENABLED`,
    /// cgo is on only when building for the host platform.
    pub fn from_env() -> Self {
        let mut ctx = Self::default();

        if let Some(goos) = non_empty_var("GOOS") {
            ctx.goos = goos;
        }
        if let Some(goarch) = non_empty_var("GOARCH") {
            ctx.goarch = goarch;
        }
        ctx.goroot = non_empty_var("GOROOT")
            .map(PathBuf::from)
            .or_else(|| go_env_goroot("go"));
        ctx.gopath = match env::var_os("GOPATH").filter(|v| !v.is_empty()) {
            Some(value) => env::split_paths(&value).collect(),
            None => dirs::home_dir()
                .map(|home| vec![home.join("go")])
                .unwrap_or_default(),
        };
        ctx.cgo_enabled =
            cgo_setting(non_empty_var("CGO_ENABLED").as_deref(), &ctx.goos, &ctx.goarch);

        tracing::debug!(
            "Build context: GOOS={} GOARCH={} GOROOT={:?} GOPATH={:?} cgo={}",
            ctx.goos,
            ctx.goarch,
            ctx.goroot,
            ctx.gopath,
            ctx.cgo_enabled
        );
        ctx
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_tags
            .extend(tags.into_iter().map(Into::into).filter(|t: &String| !t.is_empty()));
        self
    }

    /// Whether a single build tag holds in this context
    pub fn matches_tag(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch || tag == "gc" {
            return true;
        }
        if tag == "unix" && UNIX_OS.contains(&self.goos.as_str()) {
            return true;
        }
        // android implies linux, ios implies darwin, illumos implies solaris
        match (tag, self.goos.as_str()) {
            ("linux", "android") | ("darwin", "ios") | ("solaris", "illumos") => return true,
            _ => {}
        }
        if tag == "cgo" {
            return self.cgo_enabled;
        }
        if let Some(minor) = tag.strip_prefix("go1.") {
            return minor
                .parse::<u32>()
                .is_ok_and(|m| m >= 1 && m <= self.release_minor);
        }
        self.build_tags.iter().any(|t| t == tag)
    }

    /// Directories searched for a non-relative import path, GOROOT first
    pub fn source_roots(&self) -> Vec<PathBuf> {
        self.goroot
            .iter()
            .chain(self.gopath.iter())
            .map(|root| root.join("src"))
            .collect()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// `CGO_ENABLED` value, or the host-platform default when unset
fn cgo_setting(value: Option<&str>, goos: &str, goarch: &str) -> bool {
    match value {
        Some(v) => v == "1",
        None => goos == host_goos() && goarch == host_goarch(),
    }
}

/// Ask the `go` tool for its GOROOT; `None` when it can't be run.
fn go_env_goroot(program: &str) -> Option<PathBuf> {
    let output = Command::new(program).args(["env", "GOROOT"]).output().ok()?;
    if !output.status.success() {
        tracing::debug!("{program} env GOROOT exited with {}", output.status);
        return None;
    }
    let root = String::from_utf8(output.stdout).ok()?;
    let root = root.trim();
    (!root.is_empty()).then(|| PathBuf::from(root))
}

fn host_goos() -> &'static str {
    match env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

fn host_goarch() -> &'static str {
    match env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}
