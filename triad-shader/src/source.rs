//! Shader source text.

use std::fmt;
use std::sync::Arc;

/// Full text of one shader stage.
///
/// Immutable: every rewrite produces a new `ShaderSource`. Cloning is cheap so
/// one source can feed many variant compilations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderSource {
    text: Arc<str>,
}

impl ShaderSource {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for ShaderSource {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ShaderSource {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for ShaderSource {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ShaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
