//! Writing the generated BUILD file to disk

use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub const BUILD_FILE_NAME: &str = "BUILD";

/// Replace `<dir>/BUILD` with `contents`.
///
/// The text goes to a temporary file in `dir` first and is renamed over the
/// target, so readers see either the old file or the complete new one.
pub fn write_build_file(dir: &Path, contents: &str) -> Result<PathBuf> {
    let path = dir.join(BUILD_FILE_NAME);
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(&path).map_err(|e| e.error)?;
    debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(path)
}
