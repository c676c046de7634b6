use std::io;
use std::path::PathBuf;

/// Errors that can occur while generating a BUILD file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Failures to turn an import path into package metadata
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("cannot find package \"{import_path}\" in any of: {}", format_searched(.searched))]
    NotFound {
        import_path: String,
        searched: Vec<PathBuf>,
    },

    #[error("no buildable Go source files in {}", .0.display())]
    NoGoFiles(PathBuf),

    #[error("found packages {first} ({first_file}) and {second} ({second_file}) in {}", .dir.display())]
    MultiplePackages {
        dir: PathBuf,
        first: String,
        first_file: String,
        second: String,
        second_file: String,
    },

    #[error("{}: {message}", .file.display())]
    InvalidSource { file: PathBuf, message: String },
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "<no search roots>".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;
