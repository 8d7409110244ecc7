//! Backend identities and the dialect registry.

use crate::dialect::{GLSL300ES, GLSL450, Glsl100, ShaderDialect};
use crate::error::DialectError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Graphics backend a shader is being compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// OpenGL ES 2 / WebGL1.
    Gles2,
    /// OpenGL ES 3 / WebGL2.
    Gles3,
    /// Desktop OpenGL core profile.
    GlCore,
    Vulkan,
    Metal,
}

impl Backend {
    pub const ALL: [Backend; 5] = [
        Backend::Gles2,
        Backend::Gles3,
        Backend::GlCore,
        Backend::Vulkan,
        Backend::Metal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Gles2 => "gles2",
            Backend::Gles3 => "gles3",
            Backend::GlCore => "glcore",
            Backend::Vulkan => "vulkan",
            Backend::Metal => "metal",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gles2" | "webgl1" | "webgl" => Ok(Backend::Gles2),
            "gles3" | "webgl2" => Ok(Backend::Gles3),
            "glcore" | "gl" | "opengl" => Ok(Backend::GlCore),
            "vulkan" | "vk" => Ok(Backend::Vulkan),
            "metal" | "mtl" => Ok(Backend::Metal),
            _ => Err(DialectError::UnknownBackend(s.to_string())),
        }
    }
}

/// Explicit mapping from backend to dialect.
///
/// Built once at startup and read-only afterwards; lookups hand out shared
/// references to stateless dialects.
#[derive(Clone, Default)]
pub struct DialectRegistry {
    dialects: BTreeMap<Backend, Arc<dyn ShaderDialect>>,
}

impl DialectRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            dialects: BTreeMap::new(),
        }
    }

    /// Registry with every built-in dialect. Metal is left out: it needs a
    /// cross-compiler rather than a source rewrite.
    pub fn with_defaults() -> Self {
        let glsl300es: Arc<dyn ShaderDialect> = Arc::new(GLSL300ES);
        Self::new()
            .with(Backend::Gles2, Arc::new(Glsl100))
            .with(Backend::Gles3, glsl300es.clone())
            .with(Backend::GlCore, glsl300es)
            .with(Backend::Vulkan, Arc::new(GLSL450))
    }

    /// Register (or replace) the dialect for `backend`.
    pub fn register(&mut self, backend: Backend, dialect: Arc<dyn ShaderDialect>) -> &mut Self {
        self.dialects.insert(backend, dialect);
        self
    }

    pub fn with(mut self, backend: Backend, dialect: Arc<dyn ShaderDialect>) -> Self {
        self.register(backend, dialect);
        self
    }

    /// Dialect for `backend`, or [`DialectError::UnsupportedBackend`].
    pub fn get(&self, backend: Backend) -> Result<Arc<dyn ShaderDialect>, DialectError> {
        self.dialects
            .get(&backend)
            .cloned()
            .ok_or(DialectError::UnsupportedBackend(backend))
    }

    /// Registered backends with their dialect names, in backend order.
    pub fn entries(&self) -> impl Iterator<Item = (Backend, &'static str)> + '_ {
        self.dialects.iter().map(|(backend, dialect)| (*backend, dialect.name()))
    }
}

impl fmt::Debug for DialectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}
