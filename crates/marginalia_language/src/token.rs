//! Token types for the annotation language.
//!
//! Tokens are the output of the tokenizer and input to the parser.

use std::fmt;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The kind of this token.
    pub kind: TokenKind,
    /// The token's text (unescaped for strings, normalized for literals).
    pub value: String,
    /// Index of this token in the token stream, used for diagnostics.
    pub position: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    /// Creates the out-of-bounds sentinel token.
    #[must_use]
    pub fn end(position: usize) -> Self {
        Self::new(TokenKind::End, "", position)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == TokenKind::End {
            write!(f, "end of stream")
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Token kinds for the annotation language.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `@`
    At,
    /// `(`
    OpenParenthesis,
    /// `)`
    CloseParenthesis,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// Newline (kept: an annotation is only recognized at line start).
    Eol,
    /// Identifier, possibly qualified and possibly `::member`-suffixed.
    Identifier,
    /// Quoted string literal, unescaped.
    String,
    /// Integer literal, kept as digit text.
    Integer,
    /// Float literal, kept as digit text.
    Float,
    /// The literal `true` (any case).
    True,
    /// The literal `false` (any case).
    False,
    /// The literal `null` (any case).
    Null,
    /// Sentinel for out-of-bounds reads.
    End,
}
