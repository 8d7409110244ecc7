//! Shader processing entry point for the compilation pipeline.

use crate::defines::DefineSet;
use crate::dialect::ShaderDialect;
use crate::error::DialectError;
use crate::registry::{Backend, DialectRegistry};
use crate::rewriter;
use crate::source::ShaderSource;
use crate::stage::ShadingStage;
use std::sync::Arc;

/// Output of one processing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    pub source: ShaderSource,
    /// Name of the dialect that produced `source`, for diagnostics.
    pub dialect: &'static str,
}

/// Runs the declaration rewriter then the dialect post-processor.
///
/// The output depends only on the inputs: no state is kept between calls and
/// one processor can be shared across threads.
#[derive(Clone)]
pub struct ShaderProcessor {
    dialect: Arc<dyn ShaderDialect>,
}

impl ShaderProcessor {
    pub fn new(dialect: Arc<dyn ShaderDialect>) -> Self {
        Self { dialect }
    }

    /// Processor for `backend` looked up in `registry`.
    pub fn for_backend(registry: &DialectRegistry, backend: Backend) -> Result<Self, DialectError> {
        registry.get(backend).map(Self::new)
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(dialect = self.dialect.name(), stage = %stage, defines = defines.len())
    )]
    pub fn process(&self, source: &ShaderSource, stage: ShadingStage, defines: &DefineSet) -> ProcessingResult {
        let code = rewriter::rewrite_declarations(self.dialect.as_ref(), source.as_str(), stage);
        let code = self.dialect.post_process(&code, defines, stage);
        tracing::trace!(input = source.len(), output = code.len(), "shader processed");

        ProcessingResult {
            source: ShaderSource::from(code),
            dialect: self.dialect.name(),
        }
    }
}

impl std::fmt::Debug for ShaderProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProcessor")
            .field("dialect", &self.dialect.name())
            .finish()
    }
}

/// One-shot helper: select the dialect for `backend` and process `source`.
pub fn process(
    registry: &DialectRegistry,
    backend: Backend,
    source: &ShaderSource,
    stage: ShadingStage,
    defines: &DefineSet,
) -> Result<ProcessingResult, DialectError> {
    Ok(ShaderProcessor::for_backend(registry, backend)?.process(source, stage, defines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaders;
    use std::thread;

    fn processor(backend: Backend) -> ShaderProcessor {
        ShaderProcessor::for_backend(&DialectRegistry::with_defaults(), backend).unwrap()
    }

    #[test]
    fn test_full_vertex_pipeline() {
        let src = ShaderSource::from(shaders::BLIT_VERTEX);
        let out = processor(Backend::Gles3).process(&src, ShadingStage::Vertex, &DefineSet::new());
        assert_eq!(out.dialect, "glsl300es");
        let text = out.source.as_str();
        assert!(text.contains("in vec2 position;"));
        assert!(text.contains("out vec2 vUV;"));
        assert!(!text.contains("attribute"));
        assert!(!text.contains("varying"));
    }

    #[test]
    fn test_full_fragment_pipeline() {
        let src = ShaderSource::from(shaders::BLIT_FRAGMENT);
        let out = processor(Backend::Gles3).process(&src, ShadingStage::Fragment, &DefineSet::new());
        let text = out.source.as_str();
        assert!(text.contains("in vec2 vUV;"));
        assert!(text.contains("layout(location = 0) out vec4 glFragColor;\nvoid main(void)"));
        assert!(text.contains("glFragColor = texture(textureSampler, vUV);"));
        assert_eq!(text.matches("layout(location = 0) out").count(), 1);
    }

    #[test]
    fn test_cube_lod_and_cube_rewritten_together() {
        let src = ShaderSource::from(shaders::SKYBOX_FRAGMENT);
        let out = processor(Backend::Gles3).process(&src, ShadingStage::Fragment, &DefineSet::new());
        let text = out.source.as_str();
        assert!(text.contains("textureLod(reflectionSampler, vDirection, lod)"));
        assert!(text.contains("texture(reflectionSampler, vDirection)"));
        assert!(!text.contains("textureCube"));
        assert!(!text.contains("LodEXT"));
        assert!(!text.contains("#extension GL_EXT_shader_texture_lod"));
    }

    #[test]
    fn test_multi_target_fragment_not_injected() {
        let src = ShaderSource::from(shaders::GBUFFER_FRAGMENT);
        let out = processor(Backend::Gles3).process(&src, ShadingStage::Fragment, &DefineSet::new());
        let text = out.source.as_str();
        assert!(!text.contains("out vec4 glFragColor"));
        assert!(text.contains("glFragData[1]"));
        assert!(!text.contains("GL_EXT_draw_buffers"));
    }

    #[test]
    fn test_multiview_vertex_is_header_plus_source() {
        let src = ShaderSource::from("in vec3 position;\nvoid main() { gl_Position = vec4(position, 1.0); }\n");
        let defines = DefineSet::new().with("MULTIVIEW");
        let out = processor(Backend::Gles3).process(&src, ShadingStage::Vertex, &defines);
        assert_eq!(
            out.source.as_str(),
            format!("#extension GL_OVR_multiview2 : require\nlayout (num_views = 2) in;\n{}", src)
        );
    }

    #[test]
    fn test_deterministic_output() {
        let src = ShaderSource::from(shaders::SKYBOX_FRAGMENT);
        let defines = DefineSet::new().with("FOG");
        let p = processor(Backend::Vulkan);
        let first = p.process(&src, ShadingStage::Fragment, &defines);
        for _ in 0..8 {
            assert_eq!(p.process(&src, ShadingStage::Fragment, &defines), first);
        }
    }

    #[test]
    fn test_processor_shared_across_threads() {
        let p = processor(Backend::GlCore);
        let expected = p.process(&ShaderSource::from(shaders::BLIT_FRAGMENT), ShadingStage::Fragment, &DefineSet::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let p = p.clone();
                thread::spawn(move || {
                    p.process(&ShaderSource::from(shaders::BLIT_FRAGMENT), ShadingStage::Fragment, &DefineSet::new())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_gles2_passthrough() {
        let src = ShaderSource::from(shaders::BLIT_FRAGMENT);
        let out = processor(Backend::Gles2).process(&src, ShadingStage::Fragment, &DefineSet::new());
        assert_eq!(out.source, src);
    }

    #[test]
    fn test_unsupported_backend_is_configuration_error() {
        let registry = DialectRegistry::with_defaults();
        let src = ShaderSource::from(shaders::BLIT_VERTEX);
        match process(&registry, Backend::Metal, &src, ShadingStage::Vertex, &DefineSet::new()) {
            Err(DialectError::UnsupportedBackend(Backend::Metal)) => {}
            other => panic!("Expected UnsupportedBackend error, got {:?}", other),
        }
    }
}
