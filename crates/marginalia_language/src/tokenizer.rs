//! Tokenizer for the annotation language.
//!
//! Converts a doc-comment string into a finite, indexable sequence of
//! tokens and exposes a cursor over that sequence. Doc-comment framing
//! (`*` and `/` decoration) and prose punctuation outside the annotation
//! grammar are skipped; newlines are kept as tokens because an annotation
//! is only recognized at the start of a comment line.

use marginalia_foundation::{Error, Result};

use crate::token::{Token, TokenKind};

/// Tokenizer and cursor over a doc comment's token sequence.
///
/// The whole input is tokenized at construction; the cursor API
/// ([`current`](Self::current), [`next`](Self::next), [`seek`](Self::seek))
/// is how the parser walks the result.
pub struct Tokenizer {
    /// The produced token sequence.
    tokens: Vec<Token>,
    /// Current cursor position.
    position: usize,
    /// Sentinel returned for reads past the end.
    end: Token,
}

impl Tokenizer {
    /// Tokenizes the given doc-comment text.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let tokens = Scanner::new(input).scan_all();
        let end = Token::end(tokens.len());
        Self {
            tokens,
            position: 0,
            end,
        }
    }

    /// Returns the produced token sequence.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the token under the cursor, or the `End` sentinel past the end.
    #[must_use]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.end)
    }

    /// Advances the cursor by one token.
    pub fn next(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Returns true if the cursor is within the token sequence.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.position < self.tokens.len()
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn key(&self) -> usize {
        self.position
    }

    /// Returns the token at an index.
    ///
    /// # Errors
    /// Returns an out-of-bounds error if the index is past the end.
    pub fn at(&self, index: usize) -> Result<&Token> {
        self.tokens.get(index).ok_or_else(|| Error::out_of_bounds(index))
    }

    /// Returns the kind of the token at an index, or `End` past the end.
    #[must_use]
    pub fn kind_at(&self, index: usize) -> TokenKind {
        self.tokens
            .get(index)
            .map_or(TokenKind::End, |token| token.kind)
    }

    /// Scans forward from the cursor (inclusive) to the next token of the
    /// given kind, leaving the cursor on the match.
    ///
    /// Returns false (cursor past the end) if no such token remains.
    pub fn seek(&mut self, kind: TokenKind) -> bool {
        while self.valid() {
            if self.current().kind == kind {
                return true;
            }
            self.next();
        }
        false
    }
}

/// Character-stream scanner producing the token sequence.
struct Scanner<'src> {
    /// Remaining input.
    rest: &'src str,
    /// Tokens produced so far.
    tokens: Vec<Token>,
}

impl<'src> Scanner<'src> {
    fn new(input: &'src str) -> Self {
        Self {
            rest: input,
            tokens: Vec::new(),
        }
    }

    fn scan_all(mut self) -> Vec<Token> {
        while let Some(c) = self.peek_char() {
            match c {
                '\n' => {
                    self.advance();
                    self.push(TokenKind::Eol, "\n");
                }
                '@' => {
                    self.advance();
                    self.push(TokenKind::At, "@");
                }
                '(' => {
                    self.advance();
                    self.push(TokenKind::OpenParenthesis, "(");
                }
                ')' => {
                    self.advance();
                    self.push(TokenKind::CloseParenthesis, ")");
                }
                '[' => {
                    self.advance();
                    self.push(TokenKind::OpenBracket, "[");
                }
                ']' => {
                    self.advance();
                    self.push(TokenKind::CloseBracket, "]");
                }
                ',' => {
                    self.advance();
                    self.push(TokenKind::Comma, ",");
                }
                '=' => {
                    self.advance();
                    self.push(TokenKind::Equals, "=");
                }
                '"' | '\'' => self.scan_string(c),
                c if c.is_ascii_digit() => self.scan_number(),
                c if is_identifier_start(c) => self.scan_word(),
                // Whitespace, `*`/`/` doc-comment framing, and prose
                // punctuation carry no tokens.
                _ => self.advance(),
            }
        }
        self.tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.rest = &self.rest[c.len_utf8()..];
        }
    }

    fn push(&mut self, kind: TokenKind, value: impl Into<String>) {
        let position = self.tokens.len();
        self.tokens.push(Token::new(kind, value, position));
    }

    /// Scans a quoted string literal.
    ///
    /// A backslash escapes the enclosing quote character only; every other
    /// backslash is kept literally. An unterminated string runs to the end
    /// of input.
    fn scan_string(&mut self, quote: char) {
        self.advance(); // consume opening quote
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            match c {
                c if c == quote => {
                    self.advance();
                    break;
                }
                '\\' => {
                    self.advance();
                    if self.peek_char() == Some(quote) {
                        self.advance();
                        text.push(quote);
                    } else {
                        text.push('\\');
                    }
                }
                c => {
                    self.advance();
                    text.push(c);
                }
            }
        }
        self.push(TokenKind::String, text);
    }

    /// Scans an integer or float literal, keeping the literal digit text.
    fn scan_number(&mut self) {
        let mut text = String::new();
        let mut has_dot = false;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance();
                text.push(c);
            } else if c == '.'
                && !has_dot
                && self.rest.chars().nth(1).is_some_and(|d| d.is_ascii_digit())
            {
                has_dot = true;
                self.advance();
                text.push('.');
            } else {
                break;
            }
        }
        let kind = if has_dot {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        self.push(kind, text);
    }

    /// Scans an identifier or a case-insensitive `true`/`false`/`null`
    /// literal. Identifiers may be backslash-qualified and may carry one
    /// trailing `::member` reference, captured into the same token.
    fn scan_word(&mut self) {
        let mut text = self.scan_identifier_text();

        if self.rest.starts_with("::") {
            self.advance();
            self.advance();
            text.push_str("::");
            text.push_str(&self.scan_identifier_text());
            self.push(TokenKind::Identifier, text);
            return;
        }

        if text.eq_ignore_ascii_case("true") {
            self.push(TokenKind::True, "true");
        } else if text.eq_ignore_ascii_case("false") {
            self.push(TokenKind::False, "false");
        } else if text.eq_ignore_ascii_case("null") {
            self.push(TokenKind::Null, "null");
        } else {
            self.push(TokenKind::Identifier, text);
        }
    }

    /// Consumes and returns one identifier's text.
    fn scan_identifier_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if is_identifier_continue(c) {
                self.advance();
                text.push(c);
            } else {
                break;
            }
        }
        text
    }
}

/// Returns true for characters that may start an identifier.
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '\\'
}

/// Returns true for characters that may continue an identifier.
fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\\'
}
