//! GOPATH-style package resolver
//!
//! Locates a package under GOROOT or GOPATH (or at a filesystem path),
//! scans its `.go` files, applies build constraints and collects imports.

use crate::{
    config::BuildContext,
    error::{Error, ResolutionError, Result},
    interfaces::PackageResolver,
    parser::{GoParser, header_constraint, is_hidden, is_test_file, matches_file_name},
    types::PackageMetadata,
};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub struct GoPathResolver {
    ctx: BuildContext,
    working_dir: Option<PathBuf>,
    parser: RefCell<GoParser>,
}

enum FileKind {
    Source,
    Test,
    ExternalTest,
}

impl GoPathResolver {
    pub fn new(ctx: BuildContext) -> Result<Self> {
        Ok(Self {
            ctx,
            working_dir: None,
            parser: RefCell::new(GoParser::new()?),
        })
    }

    /// Base directory for relative filesystem paths such as `./foo`
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    /// Find the package directory and its canonical import path
    fn locate(&self, import_path: &str) -> Result<(PathBuf, String)> {
        if is_filesystem_path(import_path) {
            let base = match &self.working_dir {
                Some(dir) => dir.clone(),
                None => std::env::current_dir()?,
            };
            let dir = base.join(import_path);
            if !dir.is_dir() {
                return Err(ResolutionError::NotFound {
                    import_path: import_path.to_string(),
                    searched: vec![dir],
                }
                .into());
            }
            let canonical = self.import_path_for_dir(&dir).unwrap_or_else(|| import_path.to_string());
            return Ok((dir, canonical));
        }

        let roots = self.ctx.source_roots();
        let mut searched = Vec::with_capacity(roots.len());
        for root in roots {
            let candidate = root.join(import_path);
            debug!("Looking for {} in {}", import_path, candidate.display());
            if candidate.is_dir() {
                return Ok((candidate, import_path.to_string()));
            }
            searched.push(candidate);
        }

        Err(ResolutionError::NotFound {
            import_path: import_path.to_string(),
            searched,
        }
        .into())
    }

    /// Import path of a directory that lies under one of the source roots
    fn import_path_for_dir(&self, dir: &Path) -> Option<String> {
        let dir = dir.canonicalize().ok()?;
        self.ctx.source_roots().into_iter().find_map(|root| {
            let root = root.canonicalize().ok()?;
            let rel = dir.strip_prefix(&root).ok()?;
            let parts: Vec<_> = rel.components().filter_map(|c| c.as_os_str().to_str()).collect();
            (!parts.is_empty()).then(|| parts.join("/"))
        })
    }

    /// Scan a package directory.
    pub fn resolve_dir(&self, dir: &Path, import_path: &str) -> Result<PackageMetadata> {
        let mut pkg = PackageMetadata {
            dir: dir.to_path_buf(),
            import_path: import_path.to_string(),
            ..Default::default()
        };
        let mut first_file = String::new();
        let mut imports = BTreeSet::new();
        let mut test_imports = BTreeSet::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !name.ends_with(".go") || is_hidden(&name) {
                continue;
            }

            if !matches_file_name(&name, &self.ctx) {
                debug!("Ignoring {}: file name excludes {}/{}", name, self.ctx.goos, self.ctx.goarch);
                pkg.ignored_go_files.push(name);
                continue;
            }

            let source = fs::read_to_string(entry.path())?;
            let header = self
                .parser
                .borrow_mut()
                .parse_header(&source)
                .map_err(|e| invalid_source(entry.path(), e))?;

            let satisfied = match header_constraint(header.header_comments.iter().map(String::as_str)) {
                Ok(Some(constraint)) => constraint.eval(&self.ctx),
                Ok(None) => true,
                Err(msg) => {
                    warn!("{}: {}", entry.path().display(), msg);
                    false
                }
            };
            if !satisfied {
                debug!("Ignoring {}: build constraints exclude it", name);
                pkg.ignored_go_files.push(name);
                continue;
            }

            let mut package_name = header.package_name;
            if package_name == "documentation" {
                pkg.ignored_go_files.push(name);
                continue;
            }

            let kind = if !is_test_file(&name) {
                FileKind::Source
            } else if package_name.ends_with("_test") && pkg.name != package_name {
                package_name.truncate(package_name.len() - "_test".len());
                FileKind::ExternalTest
            } else {
                FileKind::Test
            };

            if pkg.name.is_empty() {
                pkg.name = package_name;
                first_file = name.clone();
            } else if package_name != pkg.name {
                return Err(ResolutionError::MultiplePackages {
                    dir: dir.to_path_buf(),
                    first: pkg.name,
                    first_file,
                    second: package_name,
                    second_file: name,
                }
                .into());
            }

            if !self.ctx.cgo_enabled && header.imports.iter().any(|i| i == "C") {
                debug!("Ignoring {}: imports \"C\" with cgo disabled", name);
                pkg.ignored_go_files.push(name);
                continue;
            }

            match kind {
                FileKind::Source => {
                    imports.extend(header.imports);
                    pkg.go_files.push(name);
                }
                FileKind::Test => {
                    test_imports.extend(header.imports);
                    pkg.test_go_files.push(name);
                }
                FileKind::ExternalTest => {
                    test_imports.extend(header.imports);
                    pkg.xtest_go_files.push(name);
                }
            }
        }

        if pkg.name.is_empty() {
            return Err(ResolutionError::NoGoFiles(dir.to_path_buf()).into());
        }

        pkg.imports = imports.into_iter().collect();
        pkg.test_imports = test_imports.into_iter().collect();
        debug!(
            "Resolved {} ({}): {} sources, {} tests, {} ignored",
            pkg.import_path,
            pkg.name,
            pkg.go_files.len(),
            pkg.test_go_files.len() + pkg.xtest_go_files.len(),
            pkg.ignored_go_files.len()
        );
        Ok(pkg)
    }
}

impl PackageResolver for GoPathResolver {
    fn resolve(&self, import_path: &str) -> Result<PackageMetadata> {
        let (dir, canonical) = self.locate(import_path)?;
        self.resolve_dir(&dir, &canonical)
    }
}

fn is_filesystem_path(import_path: &str) -> bool {
    import_path == "."
        || import_path == ".."
        || import_path.starts_with("./")
        || import_path.starts_with("../")
        || Path::new(import_path).is_absolute()
}

fn invalid_source(file: &Path, err: Error) -> Error {
    let message = match err {
        Error::ParseError(msg) | Error::TreeSitterError(msg) => msg,
        other => other.to_string(),
    };
    ResolutionError::InvalidSource {
        file: file.to_path_buf(),
        message,
    }
    .into()
}
