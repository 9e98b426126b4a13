//! Parser module for building the syntax tree.
//!
//! This module groups the token stream into a tree of Expression nodes.
//! It handles:
//!
//! - Paren nesting, with errors for unbalanced parens
//! - Splitting groups into statements on `;`, line breaks and comments
//! - Pruning empty statements and flattening single-statement groups

pub mod parser;
