//! Error types for the command line tool.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShadercError {
    #[error("Dialect error: {0}")]
    Dialect(#[from] triad_shader::DialectError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Unknown built-in shader: {0}")]
    UnknownBuiltin(String),

    #[error("No input given: pass a shader file, --builtin or --manifest")]
    MissingInput,
}

impl ShadercError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShadercError::Io {
            path: path.into(),
            source,
        }
    }
}
