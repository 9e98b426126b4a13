use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

/// Consumes the `matched` bytes at the cursor and pushes whatever tokens they produce.
pub type RegexHandler = fn(&mut Lexer, usize) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order, first match wins. Every regex is anchored at the cursor.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[0-9][0-9.]*").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^[A-Za-z][A-Za-z0-9]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^`[A-Za-z0-9]*").unwrap(), handler: keyword_handler },
        RegexPattern { regex: Regex::new("^'").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^#[^\r\n]*").unwrap(), handler: comment_handler },
        RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RParen, ")") },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LBrack, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RBrack, "]") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LBrace, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RBrace, "}") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Symbol, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Symbol, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Symbol, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Symbol, "/") },
        RegexPattern { regex: Regex::new("^[\r\n]").unwrap(), handler: newline_handler },
        RegexPattern { regex: Regex::new("^[ \t]+").unwrap(), handler: skip_handler },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Offsets always fit, `tokenize` rejects sources `u32` cannot address.
    pub fn position(&self, offset: usize) -> Position {
        Position(
            u32::try_from(offset).unwrap_or(u32::MAX),
            Rc::clone(&self.file),
        )
    }

    /// Span covering the next `len` bytes from the cursor.
    pub fn span_ahead(&self, len: usize) -> Span {
        Span {
            start: self.position(self.pos),
            end: self.position(self.pos + len),
        }
    }
}

fn number_handler(lexer: &mut Lexer, matched: usize) -> Result<(), Error> {
    let mut len = matched;

    // `5.get` is a member access on `5`, so a trailing dot is left for the Dot token
    if lexer.remainder()[..len].ends_with('.') {
        len -= 1;
    }

    let value = String::from(&lexer.remainder()[..len]);
    let span = lexer.span_ahead(len);
    lexer.push(MK_TOKEN!(TokenKind::Number, value, span));
    lexer.advance_n(len);
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, matched: usize) -> Result<(), Error> {
    let value = String::from(&lexer.remainder()[..matched]);
    let span = lexer.span_ahead(matched);
    lexer.push(MK_TOKEN!(TokenKind::Symbol, value, span));
    lexer.advance_n(matched);
    Ok(())
}

fn keyword_handler(lexer: &mut Lexer, matched: usize) -> Result<(), Error> {
    // Skip the backtick
    let value = String::from(&lexer.remainder()[1..matched]);
    let span = lexer.span_ahead(matched);
    lexer.push(MK_TOKEN!(TokenKind::Keyword, value, span));
    lexer.advance_n(matched);
    Ok(())
}

fn unescape(escape: char) -> Option<char> {
    match escape {
        '\\' => Some('\\'),
        '\'' => Some('\''),
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'v' => Some('\u{b}'),
        'a' => Some('\u{7}'),
        _ => None,
    }
}

fn string_handler(lexer: &mut Lexer, _matched: usize) -> Result<(), Error> {
    let start = lexer.pos;
    let unterminated = || Error::new(ErrorImpl::UnterminatedString, lexer.position(start));

    let mut value = String::new();
    let mut length = None;
    // Skip the opening quote
    let mut chars = lexer.remainder().char_indices().skip(1);

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\'' => {
                length = Some(offset + 1);
                break;
            }
            '\\' => {
                let (offset, escape) = chars.next().ok_or_else(unterminated)?;
                let decoded = unescape(escape).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::MalformedEscape { escape },
                        lexer.position(start + offset),
                    )
                })?;
                value.push(decoded);
            }
            _ => value.push(ch),
        }
    }

    let length = length.ok_or_else(unterminated)?;
    let span = lexer.span_ahead(length);
    lexer.push(MK_TOKEN!(TokenKind::String, value, span));
    lexer.advance_n(length);
    Ok(())
}

fn comment_handler(lexer: &mut Lexer, matched: usize) -> Result<(), Error> {
    // A comment ends the statement it trails, like a line break does
    let span = lexer.span_ahead(matched);
    lexer.push(MK_TOKEN!(TokenKind::Semicolon, String::from(";"), span));
    lexer.advance_n(matched);
    Ok(())
}

fn newline_handler(lexer: &mut Lexer, matched: usize) -> Result<(), Error> {
    let span = lexer.span_ahead(matched);
    lexer.push(MK_TOKEN!(TokenKind::Semicolon, String::from(";"), span));
    lexer.advance_n(matched);
    Ok(())
}

fn skip_handler(lexer: &mut Lexer, matched: usize) -> Result<(), Error> {
    lexer.advance_n(matched);
    Ok(())
}

/// Positions are `u32` byte offsets, so longer sources cannot be tokenized.
pub(crate) fn check_source_length(length: usize, file: &Rc<String>) -> Result<(), Error> {
    match u32::try_from(length) {
        Ok(_) => Ok(()),
        Err(_) => Err(Error::new(
            ErrorImpl::SourceTooLarge { length },
            Position(0, Rc::clone(file)),
        )),
    }
}

/// Splits `source` into tokens.
///
/// Line breaks and comments come out as synthetic `Semicolon` tokens, other
/// whitespace is dropped. No end-of-input token is emitted.
///
/// # Errors
///
/// Fails on the first character no pattern accepts, on an unknown escape
/// inside a string, on a string that runs into the end of the input and on
/// sources longer than `u32::MAX` bytes.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    check_source_length(lex.source.len(), &lex.file)?;

    while !lex.at_eof() {
        let matched = PATTERNS
            .iter()
            .find_map(|pattern| pattern.regex.find(lex.remainder()).map(|m| (pattern.handler, m.end())));

        match matched {
            Some((handler, len)) => handler(&mut lex, len)?,
            None => {
                let character = lex.remainder().chars().next().unwrap_or_default();
                return Err(Error::new(
                    ErrorImpl::IllegalCharacter { character },
                    lex.position(lex.pos),
                ));
            }
        }
    }

    tracing::debug!(token_count = lex.tokens.len(), "tokenized source");
    Ok(lex.tokens)
}
