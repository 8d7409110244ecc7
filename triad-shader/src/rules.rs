//! Rule tables describing one shading dialect, and the whole-source
//! post-processing pass driven by them.

use crate::defines::DefineSet;
use crate::patterns::{self, Rename};
use crate::stage::ShadingStage;
use tracing::{debug, trace};

/// Pure-data description of a dialect's rewrite rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectRules {
    /// Replacement for the neutral `attribute` keyword.
    pub attribute_keyword: &'static str,
    /// Replacement for `varying` in the vertex stage.
    pub vertex_varying_keyword: &'static str,
    /// Replacement for `varying` in the fragment stage.
    pub fragment_varying_keyword: &'static str,
    /// Extension whose presence means the shader declares its render targets
    /// itself.
    pub multi_target_extension: &'static str,
    /// Extensions that are core in this dialect; their pragmas are removed.
    pub pruned_extensions: &'static [&'static str],
    /// Texture sampling intrinsics, matched in call position only.
    pub intrinsic_calls: &'static [Rename],
    /// Built-in variables renamed in every stage.
    pub builtin_renames: &'static [Rename],
    /// Legacy fragment outputs, renamed in the fragment stage.
    pub fragment_outputs: &'static [Rename],
    /// Declaration injected before `void main(` in single-output fragment
    /// shaders.
    pub output_declaration: &'static str,
    /// Define that turns on stereo multiview.
    pub multiview_symbol: &'static str,
    /// Text prepended to multiview vertex shaders.
    pub multiview_header: &'static str,
}

const PRUNED_EXTENSIONS: &[&str] = &[
    "GL_OVR_multiview2",
    "GL_OES_standard_derivatives",
    "GL_EXT_shader_texture_lod",
    "GL_EXT_frag_depth",
    "GL_EXT_draw_buffers",
];

const INTRINSIC_CALLS: &[Rename] = &[
    Rename::new("texture2D", "texture"),
    Rename::new("textureCube", "texture"),
    Rename::new("texture2DProj", "textureProj"),
    Rename::new("texture2DLodEXT", "textureLod"),
    Rename::new("textureCubeLodEXT", "textureLod"),
];

const FRAGMENT_OUTPUTS: &[Rename] = &[
    Rename::new("gl_FragColor", "glFragColor"),
    Rename::new("gl_FragData", "glFragData"),
    Rename::new("gl_FragDepthEXT", "gl_FragDepth"),
];

const OUTPUT_DECLARATION: &str = "layout(location = 0) out vec4 glFragColor;\n";

pub const MULTIVIEW_SYMBOL: &str = "MULTIVIEW";

/// GLSL ES 3.00, also accepted by desktop GL core profiles.
pub const GLSL_300_ES: DialectRules = DialectRules {
    attribute_keyword: "in",
    vertex_varying_keyword: "out",
    fragment_varying_keyword: "in",
    multi_target_extension: "GL_EXT_draw_buffers",
    pruned_extensions: PRUNED_EXTENSIONS,
    intrinsic_calls: INTRINSIC_CALLS,
    builtin_renames: &[],
    fragment_outputs: FRAGMENT_OUTPUTS,
    output_declaration: OUTPUT_DECLARATION,
    multiview_symbol: MULTIVIEW_SYMBOL,
    multiview_header: "#extension GL_OVR_multiview2 : require\nlayout (num_views = 2) in;\n",
};

/// Vulkan-flavoured GLSL 4.50. The view count comes from the render pass, so
/// the multiview header only enables the extension.
pub const GLSL_450: DialectRules = DialectRules {
    builtin_renames: &[Rename::new("gl_ViewID_OVR", "gl_ViewIndex")],
    multiview_header: "#extension GL_EXT_multiview : require\n",
    ..GLSL_300_ES
};

const ENABLED: &[&str] = &["enable", "require"];

impl DialectRules {
    /// Whole-source rewrite. Steps run in a fixed order: detection first,
    /// against the untouched text, then pruning, renaming and injection.
    pub fn post_process(&self, code: &str, defines: &DefineSet, stage: ShadingStage) -> String {
        let has_multi_target = patterns::has_extension(code, self.multi_target_extension, ENABLED);
        let has_output = stage.is_fragment() && patterns::has_output_declaration(code);

        let code = patterns::prune_extensions(code, self.pruned_extensions);
        let code = patterns::rename_calls(&code, self.intrinsic_calls);
        let code = if self.builtin_renames.is_empty() {
            code
        } else {
            patterns::rename_identifiers(&code, self.builtin_renames)
        };

        match stage {
            ShadingStage::Fragment => {
                let code = patterns::rename_identifiers(&code, self.fragment_outputs);
                if has_multi_target || has_output {
                    trace!(has_multi_target, has_output, "explicit outputs present");
                    code
                } else {
                    debug!("injecting fragment output declaration");
                    patterns::insert_before_entry_point(&code, self.output_declaration)
                }
            }
            ShadingStage::Vertex => {
                if defines.contains(self.multiview_symbol) {
                    debug!("prepending multiview header");
                    let mut out = String::with_capacity(self.multiview_header.len() + code.len());
                    out.push_str(self.multiview_header);
                    out.push_str(&code);
                    return out;
                }
                code
            }
        }
    }
}
