//! Surface tokenizer for GLSL-style shader text.
//!
//! This is not a GLSL lexer in the grammar sense. It only splits text into
//! identifiers, numbers and single punctuation characters with byte spans,
//! skipping whitespace and comments. That is enough for every rewrite rule to
//! match whole words outside comments instead of raw substrings.

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    Punct(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: TokenKind,
    pub text: &'s str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Only whitespace or comments precede this token on its line.
    pub line_start: bool,
}

impl Token<'_> {
    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == name
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    in_block_comment: bool,
    at_line_start: bool,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self::resume(src, false)
    }

    /// Start lexing `src` as a continuation of text that ended inside an
    /// unterminated `/* */` comment.
    pub fn resume(src: &'s str, in_block_comment: bool) -> Self {
        Self {
            src,
            pos: 0,
            in_block_comment,
            at_line_start: true,
        }
    }

    /// Consume the rest of the input and report whether it ends inside an
    /// unterminated block comment.
    pub fn finish(mut self) -> bool {
        while self.next().is_some() {}
        self.in_block_comment
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.at_line_start = true;
        }
        Some(ch)
    }

    fn skip_block_comment_body(&mut self) {
        loop {
            if self.rest().starts_with("*/") {
                self.pos += 2;
                self.in_block_comment = false;
                return;
            }
            if self.advance().is_none() {
                // Unterminated; the caller may resume on the next chunk.
                return;
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        if self.in_block_comment {
            self.skip_block_comment_body();
        }
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            if self.rest().starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else if self.rest().starts_with("/*") {
                self.pos += 2;
                self.in_block_comment = true;
                self.skip_block_comment_body();
            } else {
                break;
            }
        }
    }

    fn lex_while(&mut self, keep: impl Fn(char) -> bool) {
        while matches!(self.peek(), Some(c) if keep(c)) {
            self.advance();
        }
    }

    fn lex_number(&mut self) {
        loop {
            self.lex_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
            // Exponent sign: `1.0e-5`.
            let prev = self.src[..self.pos].chars().last();
            if matches!(prev, Some('e' | 'E')) && matches!(self.peek(), Some('+' | '-')) {
                self.advance();
                continue;
            }
            break;
        }
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Token<'s>> {
        self.skip_whitespace_and_comments();

        let ch = self.peek()?;
        let start = self.pos;
        let line_start = self.at_line_start;

        let kind = match ch {
            c if c.is_ascii_alphabetic() || c == '_' => {
                self.lex_while(|c| c.is_ascii_alphanumeric() || c == '_');
                TokenKind::Ident
            }
            c if c.is_ascii_digit() => {
                self.lex_number();
                TokenKind::Number
            }
            '.' if matches!(self.peek_second(), Some(c) if c.is_ascii_digit()) => {
                self.lex_number();
                TokenKind::Number
            }
            other => {
                self.advance();
                TokenKind::Punct(other)
            }
        };

        self.at_line_start = false;
        Some(Token {
            kind,
            text: &self.src[start..self.pos],
            start,
            end: self.pos,
            line_start,
        })
    }
}

/// Byte offset just past the `*/` that closes a comment opened on an earlier
/// line, or `line.len()` if the comment does not close on this line.
pub fn open_comment_end(line: &str) -> usize {
    line.find("*/").map_or(line.len(), |i| i + 2)
}
