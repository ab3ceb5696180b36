//! Tokenizer tests.
//!
//! Tests for converting doc-comment text to token streams.

use marginalia::language::{Token, TokenKind, Tokenizer};

fn tokens(input: &str) -> Vec<Token> {
    Tokenizer::new(input).tokens().to_vec()
}

fn kinds(input: &str) -> Vec<TokenKind> {
    tokens(input).iter().map(|token| token.kind).collect()
}

#[test]
fn tokenize_argument_list() {
    let tokens = tokens(r#"(key = "aaa", key2=[1, 2])"#);

    let expected = [
        (TokenKind::OpenParenthesis, "("),
        (TokenKind::Identifier, "key"),
        (TokenKind::Equals, "="),
        (TokenKind::String, "aaa"),
        (TokenKind::Comma, ","),
        (TokenKind::Identifier, "key2"),
        (TokenKind::Equals, "="),
        (TokenKind::OpenBracket, "["),
        (TokenKind::Integer, "1"),
        (TokenKind::Comma, ","),
        (TokenKind::Integer, "2"),
        (TokenKind::CloseBracket, "]"),
        (TokenKind::CloseParenthesis, ")"),
    ];
    assert_eq!(tokens.len(), expected.len());
    for (token, (kind, value)) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, kind);
        assert_eq!(token.value, value);
    }
}

#[test]
fn tokenize_full_annotation() {
    assert_eq!(
        kinds(r#"@Route("/books/{id}")"#),
        vec![
            TokenKind::At,
            TokenKind::Identifier,
            TokenKind::OpenParenthesis,
            TokenKind::String,
            TokenKind::CloseParenthesis,
        ]
    );
}

#[test]
fn tokenize_skips_prose_punctuation() {
    // Doc-comment framing and sentence punctuation produce no tokens;
    // newlines survive and prose words come through as identifiers.
    let doc = "/**\n * Persists the entity. Handle with care!\n */";
    let kinds = kinds(doc);

    assert_eq!(kinds.first(), Some(&TokenKind::Eol));
    assert_eq!(kinds.last(), Some(&TokenKind::Eol));
    assert_eq!(
        kinds[1..kinds.len() - 1],
        [TokenKind::Identifier; 6],
        "prose words tokenize as identifiers"
    );
    assert!(!kinds.contains(&TokenKind::At));
    assert!(!kinds.contains(&TokenKind::OpenParenthesis));
}

#[test]
fn tokenize_empty_input() {
    assert!(tokens("").is_empty());
    assert!(tokens("   \t  ").is_empty());
}

#[test]
fn tokenize_literals_case_insensitively() {
    assert_eq!(
        kinds("True FALSE Null"),
        vec![TokenKind::True, TokenKind::False, TokenKind::Null]
    );
}

#[test]
fn tokenize_numbers() {
    let tokens = tokens("42 3.25");
    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "3.25");
}

#[test]
fn tokenize_member_reference_as_single_identifier() {
    let tokens = tokens("Vehicle::class Status::ACTIVE");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value, "Vehicle::class");
    assert_eq!(tokens[1].value, "Status::ACTIVE");
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn quote_styles_are_equivalent() {
    assert_eq!(tokens("\"aaa\""), tokens("'aaa'"));
}

#[test]
fn tokenize_escaped_enclosing_quote() {
    let tokens = tokens(r#""say \"hi\"""#);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value, "say \"hi\"");
}

#[test]
fn tokenize_unterminated_string_runs_to_end() {
    let tokens = tokens(r#""no closing quote"#);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "no closing quote");
}

#[test]
fn positions_are_stream_indices() {
    let tokens = tokens("@A(1, 2)\n@B");
    for (index, token) in tokens.iter().enumerate() {
        assert_eq!(token.position, index);
    }
}

proptest::proptest! {
    /// Quoted text with no quotes or backslashes is one string token,
    /// whatever grammar characters it contains.
    #[test]
    fn quoted_text_is_opaque(text in r#"[a-zA-Z0-9 @=,.()\[\]-]*"#) {
        let input = format!("\"{text}\"");
        let tokens = tokens(&input);
        proptest::prop_assert_eq!(tokens.len(), 1);
        proptest::prop_assert_eq!(tokens[0].kind, TokenKind::String);
        proptest::prop_assert_eq!(tokens[0].value.as_str(), text.as_str());
    }

    /// Tokenizing is deterministic.
    #[test]
    fn tokenizing_is_deterministic(input in ".*") {
        proptest::prop_assert_eq!(tokens(&input), tokens(&input));
    }
}
