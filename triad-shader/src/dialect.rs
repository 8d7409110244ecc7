//! Shading dialects.
//!
//! A dialect turns backend-neutral shader text (`attribute`, `varying`,
//! `texture2D`, `gl_FragColor`, ...) into the syntax one backend compiler
//! accepts. Dialects are stateless and shared between threads.

use crate::defines::DefineSet;
use crate::patterns;
use crate::rules::{DialectRules, GLSL_300_ES, GLSL_450};
use crate::stage::ShadingStage;

/// Rewrite contract every dialect implements. None of the operations fail;
/// text a rule does not recognise passes through unchanged.
pub trait ShaderDialect: Send + Sync {
    /// Stable name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Rewrite a line already known to be an `attribute` declaration.
    fn rewrite_attribute_declaration(&self, line: &str) -> String;

    /// Does `line` declare a varying, optionally behind an interpolation
    /// qualifier such as `flat`?
    fn is_varying_declaration(&self, line: &str, stage: ShadingStage) -> bool;

    /// Rewrite a varying declaration for `stage`.
    fn rewrite_varying_declaration(&self, line: &str, stage: ShadingStage) -> String;

    /// Whole-source pass run after the line rewrites.
    fn post_process(&self, code: &str, defines: &DefineSet, stage: ShadingStage) -> String;
}

/// GLSL ES 1.00 (GLES2 / WebGL1). The neutral syntax already is this
/// dialect, so every operation is the identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct Glsl100;

impl ShaderDialect for Glsl100 {
    fn name(&self) -> &'static str {
        "glsl100"
    }

    fn rewrite_attribute_declaration(&self, line: &str) -> String {
        line.to_string()
    }

    fn is_varying_declaration(&self, line: &str, _stage: ShadingStage) -> bool {
        patterns::is_varying_line(line)
    }

    fn rewrite_varying_declaration(&self, line: &str, _stage: ShadingStage) -> String {
        line.to_string()
    }

    fn post_process(&self, code: &str, _defines: &DefineSet, _stage: ShadingStage) -> String {
        code.to_string()
    }
}

/// Dialect driven entirely by a [`DialectRules`] table.
#[derive(Debug, Clone, Copy)]
pub struct RuleDialect {
    name: &'static str,
    rules: &'static DialectRules,
}

impl RuleDialect {
    pub const fn new(name: &'static str, rules: &'static DialectRules) -> Self {
        Self { name, rules }
    }
}

/// GLSL ES 3.00 (GLES3 / WebGL2 / desktop GL core).
pub const GLSL300ES: RuleDialect = RuleDialect::new("glsl300es", &GLSL_300_ES);

/// Vulkan GLSL 4.50.
pub const GLSL450: RuleDialect = RuleDialect::new("glsl450", &GLSL_450);

impl ShaderDialect for RuleDialect {
    fn name(&self) -> &'static str {
        self.name
    }

    fn rewrite_attribute_declaration(&self, line: &str) -> String {
        patterns::replace_keyword(line, "attribute", self.rules.attribute_keyword)
    }

    fn is_varying_declaration(&self, line: &str, _stage: ShadingStage) -> bool {
        patterns::is_varying_line(line)
    }

    fn rewrite_varying_declaration(&self, line: &str, stage: ShadingStage) -> String {
        let keyword = match stage {
            ShadingStage::Vertex => self.rules.vertex_varying_keyword,
            ShadingStage::Fragment => self.rules.fragment_varying_keyword,
        };
        patterns::replace_keyword(line, "varying", keyword)
    }

    fn post_process(&self, code: &str, defines: &DefineSet, stage: ShadingStage) -> String {
        self.rules.post_process(code, defines, stage)
    }
}
