//! Error types for dialect selection.
//!
//! Rewriting itself never fails; only configuration does.

use crate::registry::Backend;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    #[error("No shader dialect registered for backend: {0}")]
    UnsupportedBackend(Backend),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Unknown shading stage: {0}")]
    UnknownStage(String),
}
