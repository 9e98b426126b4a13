//! Tree builder turning a flat token stream into nested expressions.
//!
//! Building makes a single walk over the tokens doing two jobs:
//! - Paren grouping: every `( ... )` run becomes an Expression node, tracked
//!   with a stack of open groups that never ends up in the tree
//! - Statement splitting: when a group closes its children are cut on `;`,
//!   empty statements are dropped and redundant nesting is flattened
//!
//! A group only closes after every group nested in it, so statements are
//! split innermost first without recursing, whatever the nesting depth.

use std::{mem, rc::Rc};

use crate::{
    ast::node::{Node, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

/// An Expression still waiting for its closing paren.
struct OpenGroup {
    children: Vec<Node>,
    /// Span of the opening paren, or of the whole input for the root
    open: Span,
}

impl OpenGroup {
    fn new(open: Span) -> Self {
        OpenGroup {
            children: vec![],
            open,
        }
    }

    /// Splits the collected children into statements and seals the group.
    ///
    /// Only the root may end up without statements.
    fn close(self, end: Position, is_root: bool) -> Result<Node, Error> {
        let span = Span {
            start: self.open.start,
            end,
        };

        let children = split_statements(self.children, &span);
        if children.is_empty() && !is_root {
            return Err(Error::new(ErrorImpl::EmptyGroup, span.start));
        }

        Ok(Node::branch(NodeKind::Expression, children, span))
    }
}

fn is_separator(node: &Node) -> bool {
    matches!(&node.token, Some(token) if token.kind == TokenKind::Semicolon)
}

fn span_of(nodes: &[Node], fallback: &Span) -> Span {
    match (nodes.first(), nodes.last()) {
        (Some(first), Some(last)) => Span {
            start: first.span.start.clone(),
            end: last.span.end.clone(),
        },
        _ => fallback.clone(),
    }
}

/// A statement of a single node is that node, anything longer gets wrapped.
fn into_statement(statement: Vec<Node>, fallback: &Span) -> Node {
    match <[Node; 1]>::try_from(statement) {
        Ok([only]) => only,
        Err(statement) => {
            let span = span_of(&statement, fallback);
            Node::branch(NodeKind::Expression, statement, span)
        }
    }
}

/// Cuts a group's children into statements on separators.
///
/// A group of exactly one statement keeps that statement's nodes as its
/// children. Otherwise empty statements are dropped and every remaining one
/// becomes a child of its own, so `x y;` still nests `x y` one level down.
fn split_statements(children: Vec<Node>, span: &Span) -> Vec<Node> {
    let mut statements: Vec<Vec<Node>> = vec![];
    let mut current: Vec<Node> = vec![];

    for child in children {
        if is_separator(&child) {
            statements.push(mem::take(&mut current));
        } else {
            current.push(child);
        }
    }

    if statements.is_empty() {
        return current;
    }
    statements.push(current);

    // Leading, trailing and doubled separators leave empty statements behind
    statements.retain(|statement| !statement.is_empty());

    statements
        .into_iter()
        .map(|statement| into_statement(statement, span))
        .collect()
}

/// Builds the syntax tree for a token stream.
///
/// The returned root is always an Expression. Its children are the top-level
/// statements, or the nodes of the only statement when there is just one.
///
/// # Arguments
///
/// * `tokens` - Tokens as produced by `tokenize`
/// * `file` - Name of the source, used for positions when `tokens` is empty
///
/// # Errors
///
/// Fails on a `)` without a matching `(`, on a `(` that is never closed and
/// on a parenthesised group holding no statements.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn build_tree(tokens: Vec<Token>, file: Rc<String>) -> Result<Node, Error> {
    let end = tokens
        .last()
        .map(|token| token.span.end.clone())
        .unwrap_or_else(|| Position(0, Rc::clone(&file)));
    let root = Span {
        start: Position(0, file),
        end,
    };

    // The root sits in `current` at the start; descending pushes the current
    // group onto `ancestors`, ascending pops it back.
    let mut ancestors: Vec<OpenGroup> = vec![];
    let mut current = OpenGroup::new(root);

    for token in tokens {
        match token.kind {
            TokenKind::LParen => {
                let parent = mem::replace(&mut current, OpenGroup::new(token.span));
                ancestors.push(parent);
            }
            TokenKind::RParen => {
                let Some(parent) = ancestors.pop() else {
                    return Err(Error::new(
                        ErrorImpl::UnmatchedClosingParen,
                        token.span.start,
                    ));
                };
                let group = mem::replace(&mut current, parent);
                current.children.push(group.close(token.span.end, false)?);
            }
            _ => current.children.push(Node::leaf(token)),
        }
    }

    if !ancestors.is_empty() {
        // Report the innermost paren still open
        return Err(Error::new(
            ErrorImpl::UnmatchedOpenParen,
            current.open.start,
        ));
    }

    let end = current.open.end.clone();
    let tree = current.close(end, true)?;

    tracing::debug!(statements = tree.children.len(), "built tree");
    Ok(tree)
}
