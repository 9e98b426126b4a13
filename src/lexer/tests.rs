//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Symbols and backtick keywords
//! - Numbers, including the trailing dot of a member access
//! - String literals with escape sequences
//! - Punctuation and arithmetic symbols
//! - Comments and line breaks as separators
//! - Error cases

use std::rc::Rc;

use super::{
    lexer::{check_source_length, tokenize},
    tokens::TokenKind,
};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.qq".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_symbols() {
    let source = "foo Bar cl0ne x1y2".to_string();
    let tokens = tokenize(source, Some("test.qq".to_string())).unwrap();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].kind, TokenKind::Symbol);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "Bar");
    assert_eq!(tokens[2].value, "cl0ne");
    assert_eq!(tokens[3].kind, TokenKind::Symbol);
    assert_eq!(tokens[3].value, "x1y2");
}

#[test]
fn test_tokenize_keywords() {
    let source = "`key `k3y".to_string();
    let tokens = tokenize(source, Some("test.qq".to_string())).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Keyword);
    assert_eq!(tokens[0].value, "key");
    assert_eq!(tokens[1].kind, TokenKind::Keyword);
    assert_eq!(tokens[1].value, "k3y");
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5".to_string();
    let tokens = tokenize(source, Some("test.qq".to_string())).unwrap();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].value, "100.5");
}

#[test]
fn test_tokenize_float() {
    let tokens = tokenize("5.5".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "5.5");
}

#[test]
fn test_tokenize_member_access_on_number() {
    let tokens = tokenize("5.get".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "5");
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[1].value, ".");
    assert_eq!(tokens[1].span.start.0, 1);
    assert_eq!(tokens[2].kind, TokenKind::Symbol);
    assert_eq!(tokens[2].value, "get");
}

#[test]
fn test_tokenize_number_backs_off_one_dot_only() {
    let tokens = tokenize("5..".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value, "5.");
    assert_eq!(tokens[1].kind, TokenKind::Dot);
}

#[test]
fn test_tokenize_number_keeps_inner_dots() {
    let tokens = tokenize("1.2.3".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value, "1.2.3");
}

#[test]
fn test_tokenize_number_then_symbol() {
    assert_eq!(kinds("5plus"), vec![TokenKind::Number, TokenKind::Symbol]);
}

#[test]
fn test_tokenize_strings() {
    let source = "'hello' 'multiple words' ''".to_string();
    let tokens = tokenize(source, Some("test.qq".to_string())).unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "");
}

#[test]
fn test_tokenize_tab_escape() {
    let tokens = tokenize("'a\\tb'".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "a\tb");
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r"'\\ \' \n \t \r \b \f \v \a'".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].value, "\\ ' \n \t \r \u{8} \u{c} \u{b} \u{7}");
}

#[test]
fn test_tokenize_string_keeps_separators() {
    let source = "'a;b\n# c'".to_string();
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value, "a;b\n# c");
}

#[test]
fn test_tokenize_string_span_counts_bytes() {
    let tokens = tokenize("'héllo' x".to_string(), None).unwrap();

    assert_eq!(tokens[0].value, "héllo");
    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 8);
    assert_eq!(tokens[1].span.start.0, 9);
}

#[test]
fn test_tokenize_malformed_escape() {
    let error = tokenize("'a\\qb'".to_string(), None).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::MalformedEscape { escape: 'q' });
    assert_eq!(error.get_position().0, 3);
}

#[test]
fn test_tokenize_octal_escape_is_malformed() {
    let error = tokenize("'\\012'".to_string(), None).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::MalformedEscape { escape: '0' });
}

#[test]
fn test_tokenize_unterminated_string() {
    let error = tokenize("x 'abc".to_string(), None).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_tokenize_unterminated_string_after_backslash() {
    let error = tokenize("'abc\\".to_string(), None).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds(". : ; ( ) [ ] { }"),
        vec![
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrack,
            TokenKind::RBrack,
            TokenKind::LBrace,
            TokenKind::RBrace,
        ]
    );
}

#[test]
fn test_tokenize_arithmetic_as_symbols() {
    let tokens = tokenize("+ - * /".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 4);
    assert!(tokens.iter().all(|token| token.kind == TokenKind::Symbol));
    assert_eq!(tokens[0].value, "+");
    assert_eq!(tokens[3].value, "/");

    assert_eq!(tokens[0].operator_kind(), Some(TokenKind::Plus));
    assert_eq!(tokens[1].operator_kind(), Some(TokenKind::Minus));
    assert_eq!(tokens[2].operator_kind(), Some(TokenKind::Star));
    assert_eq!(tokens[3].operator_kind(), Some(TokenKind::Slash));
}

#[test]
fn test_operator_kind_of_plain_symbol() {
    let tokens = tokenize("plus '+'".to_string(), None).unwrap();

    assert_eq!(tokens[0].operator_kind(), None);
    assert_eq!(tokens[1].operator_kind(), None);
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("# comment\nx".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::Semicolon);
    assert_eq!(tokens[1].kind, TokenKind::Semicolon);
    assert_eq!(tokens[2].kind, TokenKind::Symbol);
    assert_eq!(tokens[2].value, "x");
}

#[test]
fn test_tokenize_comment_at_end_of_input() {
    assert_eq!(
        kinds("5 plus 3 # wow"),
        vec![
            TokenKind::Number,
            TokenKind::Symbol,
            TokenKind::Number,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_tokenize_newlines() {
    let tokens = tokenize("a\nb\r\nc".to_string(), None).unwrap();

    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].kind, TokenKind::Semicolon);
    assert_eq!(tokens[1].value, ";");
    assert_eq!(tokens[2].value, "b");
    assert_eq!(tokens[3].kind, TokenKind::Semicolon);
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    assert_eq!(tokens[5].value, "c");
}

#[test]
fn test_tokenize_whitespace_and_comments_only() {
    for source in ["", "   \t ", "\n", " \r\n\t# just a comment", "#a\n#b\n\n"] {
        let tokens = tokenize(source.to_string(), None).unwrap();
        assert!(
            tokens.iter().all(|token| token.kind == TokenKind::Semicolon),
            "unexpected token in {:?}",
            source
        );
    }

    assert!(tokenize("  \t  ".to_string(), None).unwrap().is_empty());
}

#[test]
fn test_tokenize_spans() {
    let tokens = tokenize("ab 12".to_string(), Some("span.qq".to_string())).unwrap();

    assert_eq!(tokens[1].span.start.0, 3);
    assert_eq!(tokens[1].span.end.0, 5);
    assert_eq!(tokens[1].span.start.1.as_str(), "span.qq");
}

#[test]
fn test_tokenize_illegal_character() {
    let error = tokenize("let x = 5".to_string(), Some("test.qq".to_string())).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::IllegalCharacter { character: '=' });
    assert_eq!(error.get_position().0, 6);
}

#[test]
fn test_tokenize_illegal_non_ascii_letter() {
    let error = tokenize("é".to_string(), None).unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::IllegalCharacter { character: 'é' });
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_tokenize_mixed_expression() {
    assert_eq!(
        kinds("o.get(`key; d 'as\\td')"),
        vec![
            TokenKind::Symbol,
            TokenKind::Dot,
            TokenKind::Symbol,
            TokenKind::LParen,
            TokenKind::Keyword,
            TokenKind::Semicolon,
            TokenKind::Symbol,
            TokenKind::String,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn test_token_display() {
    let tokens = tokenize("`key 'a b'".to_string(), None).unwrap();

    assert_eq!(tokens[0].to_string(), "[keyword|key]");
    assert_eq!(tokens[1].to_string(), "[string|a b]");
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_source_length_limit() {
    let file = Rc::new("huge.qq".to_string());
    assert!(check_source_length(u32::MAX as usize, &file).is_ok());

    let length = u32::MAX as usize + 1;
    let error = check_source_length(length, &file).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::SourceTooLarge { length });
    assert_eq!(error.get_position().0, 0);
    assert_eq!(error.get_position().1.as_str(), "huge.qq");
}
