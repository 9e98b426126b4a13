//! Lexical analysis.
//!
//! Converts source text into a flat stream of tokens. It handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Symbols, backtick keywords, decimal numbers and quoted strings
//! - Escape decoding inside strings
//! - Line breaks and `#` comments as statement separators

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
