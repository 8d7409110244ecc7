//! Token-level pattern primitives shared by the dialect rules.
//!
//! Every primitive works on the token stream from [`crate::lexer`], so a rule
//! can only ever match a whole identifier outside of comments. None of them
//! fail: when nothing matches, the input comes back unchanged.

use crate::lexer::{Lexer, Token, TokenKind};
use std::ops::Range;

/// One identifier substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rename {
    pub from: &'static str,
    pub to: &'static str,
}

impl Rename {
    pub const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }
}

/// Interpolation qualifiers allowed in front of a `varying` keyword.
const INTERPOLATION_QUALIFIERS: &[&str] = &["flat", "smooth", "noperspective", "centroid", "invariant"];

/// A parsed `#extension NAME : BEHAVIOR` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPragma<'s> {
    pub name: &'s str,
    pub behavior: &'s str,
    /// The directive through its line terminator, plus any leading
    /// indentation.
    pub line: Range<usize>,
}

/// Apply non-overlapping edits, sorted by start offset, to `src`.
fn splice(src: &str, edits: &[(Range<usize>, &str)]) -> String {
    let mut out = String::with_capacity(src.len() + 64);
    let mut cursor = 0;
    for (range, replacement) in edits {
        out.push_str(&src[cursor..range.start]);
        out.push_str(replacement);
        cursor = range.end;
    }
    out.push_str(&src[cursor..]);
    out
}

/// Range removed when deleting the directive starting at `at`: the whole
/// line, unless other text (such as the tail of a comment) precedes the
/// directive on it, in which case that text is kept.
fn directive_bounds(src: &str, at: usize) -> Range<usize> {
    let line_start = src[..at].rfind('\n').map_or(0, |i| i + 1);
    let start = if src[line_start..at].trim().is_empty() { line_start } else { at };
    let end = src[at..].find('\n').map_or(src.len(), |i| at + i + 1);
    start..end
}

// ── Line primitives ───────────────────────────────────────────────────────

/// Replace the first occurrence of the `keyword` token in `line`.
pub fn replace_keyword(line: &str, keyword: &str, replacement: &str) -> String {
    match Lexer::new(line).find(|t| t.is_ident(keyword)) {
        Some(token) => splice(line, &[(token.start..token.end, replacement)]),
        None => line.to_string(),
    }
}

/// The first token on the line is the `attribute` keyword.
pub fn is_attribute_line(line: &str) -> bool {
    Lexer::new(line).next().is_some_and(|t| t.is_ident("attribute"))
}

/// The line declares a varying: `varying` is the first token, optionally
/// preceded by a single interpolation qualifier.
pub fn is_varying_line(line: &str) -> bool {
    let mut tokens = Lexer::new(line);
    match tokens.next() {
        Some(t) if t.is_ident("varying") => true,
        Some(t) if t.kind == TokenKind::Ident && INTERPOLATION_QUALIFIERS.contains(&t.text) => {
            tokens.next().is_some_and(|t| t.is_ident("varying"))
        }
        _ => false,
    }
}

// ── Whole-source primitives ───────────────────────────────────────────────

/// All `#extension` directives in `src`, in source order.
pub fn extension_pragmas(src: &str) -> Vec<ExtensionPragma<'_>> {
    let tokens: Vec<Token<'_>> = Lexer::new(src).collect();
    let mut pragmas = Vec::new();

    for (i, hash) in tokens.iter().enumerate() {
        if !(hash.is_punct('#') && hash.line_start) {
            continue;
        }
        let same_line = |t: &Token<'_>| !src[hash.start..t.start].contains('\n');
        let directive: Vec<&Token<'_>> = tokens[i + 1..].iter().take_while(|t| same_line(*t)).collect();
        if let [keyword, name, colon, behavior, ..] = directive.as_slice() {
            if keyword.is_ident("extension")
                && name.kind == TokenKind::Ident
                && colon.is_punct(':')
                && behavior.kind == TokenKind::Ident
            {
                pragmas.push(ExtensionPragma {
                    name: name.text,
                    behavior: behavior.text,
                    line: directive_bounds(src, hash.start),
                });
            }
        }
    }
    pragmas
}

/// `src` carries `#extension name : <behavior>` for one of `behaviors`.
pub fn has_extension(src: &str, name: &str, behaviors: &[&str]) -> bool {
    extension_pragmas(src)
        .iter()
        .any(|p| p.name == name && behaviors.contains(&p.behavior))
}

/// Delete every `#extension` line naming one of `names` with an `enable` or
/// `require` behavior. `warn` and `disable` directives are left alone.
pub fn prune_extensions(src: &str, names: &[&str]) -> String {
    let edits: Vec<(Range<usize>, &str)> = extension_pragmas(src)
        .into_iter()
        .filter(|p| names.contains(&p.name) && matches!(p.behavior, "enable" | "require"))
        .map(|p| (p.line, ""))
        .collect();
    if edits.is_empty() {
        return src.to_string();
    }
    tracing::trace!(removed = edits.len(), "pruned extension pragmas");
    splice(src, &edits)
}

/// Rename function calls: `from` is only rewritten when it is a whole
/// identifier followed (after optional whitespace) by `(`. Whitespace before
/// the parenthesis is kept.
///
/// All renames are applied in one pass over the token stream, so a name can
/// never be rewritten twice or matched as the prefix of a longer name.
pub fn rename_calls(src: &str, renames: &[Rename]) -> String {
    let tokens: Vec<Token<'_>> = Lexer::new(src).collect();
    let edits: Vec<(Range<usize>, &str)> = tokens
        .windows(2)
        .filter(|pair| pair[1].is_punct('('))
        .filter_map(|pair| {
            let name = &pair[0];
            lookup(renames, name).map(|to| (name.start..name.end, to))
        })
        .collect();
    splice(src, &edits)
}

/// Rename every whole-identifier occurrence.
pub fn rename_identifiers(src: &str, renames: &[Rename]) -> String {
    let edits: Vec<(Range<usize>, &str)> = Lexer::new(src)
        .filter_map(|t| lookup(renames, &t).map(|to| (t.start..t.end, to)))
        .collect();
    splice(src, &edits)
}

fn lookup(renames: &[Rename], token: &Token<'_>) -> Option<&'static str> {
    if token.kind != TokenKind::Ident {
        return None;
    }
    renames.iter().find(|r| r.from == token.text).map(|r| r.to)
}

/// `src` declares `layout(location = 0) out ...` (any spacing).
pub fn has_output_declaration(src: &str) -> bool {
    let tokens: Vec<Token<'_>> = Lexer::new(src).collect();
    tokens.windows(7).any(|w| {
        w[0].is_ident("layout")
            && w[1].is_punct('(')
            && w[2].is_ident("location")
            && w[3].is_punct('=')
            && w[4].kind == TokenKind::Number
            && w[4].text == "0"
            && w[5].is_punct(')')
            && w[6].is_ident("out")
    })
}

/// Byte offsets where each `void main(` signature starts. Shaders that pick
/// their entry point with `#ifdef` have more than one.
pub fn entry_point_offsets(src: &str) -> Vec<usize> {
    let tokens: Vec<Token<'_>> = Lexer::new(src).collect();
    tokens
        .windows(3)
        .filter(|w| w[0].is_ident("void") && w[1].is_ident("main") && w[2].is_punct('('))
        .map(|w| w[0].start)
        .collect()
}

/// Insert `text` immediately before every entry point signature. No-op when
/// the source has no `void main(`.
pub fn insert_before_entry_point(src: &str, text: &str) -> String {
    let edits: Vec<(Range<usize>, &str)> = entry_point_offsets(src)
        .into_iter()
        .map(|at| (at..at, text))
        .collect();
    splice(src, &edits)
}
