//! Error types for tokenizing and tree building.
//!
//! Every failure is fatal for the current parse and carries the source
//! position it was detected at:
//!
//! - Lexical errors: illegal characters, malformed escapes, unterminated strings
//! - Structural errors: unbalanced parens, empty groups
//! - Human readable names and tips for diagnostics

pub mod errors;
