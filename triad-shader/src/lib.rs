//! Triad Shader Crate
//!
//! Rewrites shaders written once in a backend-neutral GLSL surface syntax into
//! the dialect each rendering backend's compiler accepts: `attribute`/`varying`
//! keywords, texture intrinsics, fragment outputs, extension pragmas and the
//! stereo multiview header.
//!
//! This is a surface rewrite, not a compiler: there is no parse tree and no
//! validation. Malformed input passes through and is reported by the native
//! compiler downstream.
//!
//! ```
//! use triad_shader::{Backend, DefineSet, DialectRegistry, ShaderProcessor, ShaderSource, ShadingStage};
//!
//! let registry = DialectRegistry::with_defaults();
//! let processor = ShaderProcessor::for_backend(&registry, Backend::Gles3).unwrap();
//! let source = ShaderSource::from("attribute vec3 position;\nvarying vec2 uv;\n");
//! let result = processor.process(&source, ShadingStage::Vertex, &DefineSet::new());
//! assert_eq!(result.source.as_str(), "in vec3 position;\nout vec2 uv;\n");
//! ```

pub mod defines;
pub mod dialect;
pub mod error;
pub mod lexer;
pub mod patterns;
pub mod processor;
pub mod registry;
pub mod rewriter;
pub mod rules;
pub mod shaders;
pub mod source;
pub mod stage;

pub use defines::DefineSet;
pub use dialect::{GLSL300ES, GLSL450, Glsl100, RuleDialect, ShaderDialect};
pub use error::DialectError;
pub use processor::{ProcessingResult, ShaderProcessor, process};
pub use registry::{Backend, DialectRegistry};
pub use rules::DialectRules;
pub use source::ShaderSource;
pub use stage::ShadingStage;
