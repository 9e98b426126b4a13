#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::node::Node,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::build_tree,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Installs the stderr `tracing` subscriber, filtered by `RUST_LOG` or
/// `default_filter` when that is unset.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_logging(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init()
}

/// Tokenizes `source` and builds its tree in one go.
pub fn parse_source(source: String, file: Option<String>) -> Result<Node, Error> {
    let tokens = tokenize(source, file.clone())?;
    let file = Rc::new(file.unwrap_or_else(|| String::from("shell")));
    build_tree(tokens, file)
}

/// Finds the line holding byte `position`.
///
/// Returns the 1-based line number, the line text and the offset of
/// `position` within that line.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}


/// Renders an error against the source it came from.
///
/// ```text
/// Error: UnmatchedClosingParen (Superfluous closing parens)
/// -> main.qq
///    |
/// 20 | o.get(a))
///    | --------^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();

    let mut out = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };
    out.push_str(&format!("-> {}\n", position.1));

    // Errors at the very end of the input have no line to point into
    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        out.push_str(&format!("   at offset {}\n", position.0));
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    // The caret column counts characters, `line_pos` counts bytes
    let column = line_text
        .get(..line_pos)
        .map_or(line_pos, |before| before.chars().count());
    let arrows = column.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", render_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();
    (String::from(&string[start..]), start)
}
