use std::fmt::Display;

use crate::Span;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Symbol,
    Keyword,
    Number,
    String,

    Dot,
    Colon,
    Semicolon,

    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,

    // Never produced by the lexer, see `Token::operator_kind`
    Plus,
    Minus,
    Star,
    Slash,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Symbol => "symbol",
            TokenKind::Keyword => "keyword",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Dot => "dot",
            TokenKind::Colon => "colon",
            TokenKind::Semicolon => "semicolon",
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::LBrack => "lbrack",
            TokenKind::RBrack => "rbrack",
            TokenKind::LBrace => "lbrace",
            TokenKind::RBrace => "rbrace",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Star => "star",
            TokenKind::Slash => "slash",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}|{}]", self.kind, self.value)
    }
}

impl Token {
    /// Arithmetic operators are lexed as plain symbols. This recovers the
    /// dedicated kind for consumers that want to tell them apart.
    pub fn operator_kind(&self) -> Option<TokenKind> {
        if self.kind != TokenKind::Symbol {
            return None;
        }

        match self.value.as_str() {
            "+" => Some(TokenKind::Plus),
            "-" => Some(TokenKind::Minus),
            "*" => Some(TokenKind::Star),
            "/" => Some(TokenKind::Slash),
            _ => None,
        }
    }
}
