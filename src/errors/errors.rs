use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::IllegalCharacter { .. } => "IllegalCharacter",
            ErrorImpl::MalformedEscape { .. } => "MalformedEscape",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnmatchedClosingParen => "UnmatchedClosingParen",
            ErrorImpl::UnmatchedOpenParen => "UnmatchedOpenParen",
            ErrorImpl::EmptyGroup => "EmptyGroup",
            ErrorImpl::SourceTooLarge { .. } => "SourceTooLarge",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::IllegalCharacter { character } => {
                ErrorTip::Suggestion(format!("Illegal character `{}`", character.escape_default()))
            }
            ErrorImpl::MalformedEscape { escape } => ErrorTip::Suggestion(format!(
                "Unknown escape `\\{}`, expected one of \\\\ \\' \\n \\t \\r \\b \\f \\v \\a",
                escape.escape_default()
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String is never closed, did you miss a `'`?"))
            }
            ErrorImpl::UnmatchedClosingParen => {
                ErrorTip::Suggestion(String::from("Superfluous closing parens"))
            }
            ErrorImpl::UnmatchedOpenParen => {
                ErrorTip::Suggestion(String::from("Opening paren is never closed"))
            }
            ErrorImpl::EmptyGroup => ErrorTip::None,
            ErrorImpl::SourceTooLarge { length } => ErrorTip::Suggestion(format!(
                "Source is {} bytes, at most {} are supported",
                length,
                u32::MAX
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.internal_error, self.position.1, self.position.0
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("illegal character {character:?}")]
    IllegalCharacter { character: char },
    #[error("malformed escape {escape:?} in string")]
    MalformedEscape { escape: char },
    #[error("unterminated string")]
    UnterminatedString,
    #[error("superfluous closing parens")]
    UnmatchedClosingParen,
    #[error("unclosed opening parens")]
    UnmatchedOpenParen,
    #[error("empty parenthesised group")]
    EmptyGroup,
    #[error("source of {length} bytes is too large")]
    SourceTooLarge { length: usize },
}
