//! Line-by-line declaration rewriting.

use crate::dialect::ShaderDialect;
use crate::lexer::{self, Lexer};
use crate::patterns;
use crate::stage::ShadingStage;

/// Rewrite `attribute` and `varying` declarations line by line.
///
/// Each rule only sees the line it is given. Text inside a `/* */` comment
/// that started on an earlier line is copied through untouched; only the part
/// after the closing `*/` is offered to the dialect.
pub fn rewrite_declarations(dialect: &dyn ShaderDialect, code: &str, stage: ShadingStage) -> String {
    let mut out = String::with_capacity(code.len() + 32);
    let mut in_comment = false;

    for line in code.split_inclusive('\n') {
        let (comment, body) = if in_comment {
            line.split_at(lexer::open_comment_end(line))
        } else {
            ("", line)
        };
        in_comment = Lexer::resume(line, in_comment).finish();

        out.push_str(comment);
        out.push_str(&rewrite_line(dialect, body, stage));
    }
    out
}

fn rewrite_line(dialect: &dyn ShaderDialect, line: &str, stage: ShadingStage) -> String {
    if patterns::is_attribute_line(line) {
        dialect.rewrite_attribute_declaration(line)
    } else if dialect.is_varying_declaration(line, stage) {
        dialect.rewrite_varying_declaration(line, stage)
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GLSL300ES, Glsl100};

    const VERTEX: &str = "attribute vec3 position;\nattribute vec2 uv;\nvarying vec2 vUV;\nflat varying int vId;\nuniform mat4 mvp;\nvoid main() {\n    vUV = uv;\n    gl_Position = mvp * vec4(position, 1.0);\n}\n";

    #[test]
    fn test_vertex_declarations() {
        let out = rewrite_declarations(&GLSL300ES, VERTEX, ShadingStage::Vertex);
        assert_eq!(
            out,
            "in vec3 position;\nin vec2 uv;\nout vec2 vUV;\nflat out int vId;\nuniform mat4 mvp;\nvoid main() {\n    vUV = uv;\n    gl_Position = mvp * vec4(position, 1.0);\n}\n"
        );
    }

    #[test]
    fn test_fragment_varyings_become_inputs() {
        let out = rewrite_declarations(&GLSL300ES, "varying vec2 vUV;\r\nvoid main() {}\r\n", ShadingStage::Fragment);
        assert_eq!(out, "in vec2 vUV;\r\nvoid main() {}\r\n");
    }

    #[test]
    fn test_lines_inside_block_comments_untouched() {
        let src = "/* legacy\nattribute vec3 old;\nvarying vec2 oldUV; */ varying vec2 uv;\nattribute vec3 p;\n";
        let out = rewrite_declarations(&GLSL300ES, src, ShadingStage::Vertex);
        assert_eq!(
            out,
            "/* legacy\nattribute vec3 old;\nvarying vec2 oldUV; */ out vec2 uv;\nin vec3 p;\n"
        );
    }

    #[test]
    fn test_multiline_declaration_rewrites_keyword_line() {
        let src = "varying\n    vec2 uv;\nflat\nvarying vec3 n;\n";
        let out = rewrite_declarations(&GLSL300ES, src, ShadingStage::Fragment);
        assert_eq!(out, "in\n    vec2 uv;\nflat\nin vec3 n;\n");
    }

    #[test]
    fn test_identity_dialect_keeps_source() {
        assert_eq!(rewrite_declarations(&Glsl100, VERTEX, ShadingStage::Vertex), VERTEX);
    }

    #[test]
    fn test_no_trailing_newline() {
        let out = rewrite_declarations(&GLSL300ES, "attribute float w;", ShadingStage::Vertex);
        assert_eq!(out, "in float w;");
    }
}
