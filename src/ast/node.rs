use std::{fmt::Display, mem};

use crate::{lexer::tokens::Token, Span};

/// Node Types
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NodeKind {
    /// Leaf wrapping exactly one token
    Token,
    Expression,
    List,
    Dict,
    Deref,
    Assign,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Token => "token",
            NodeKind::Expression => "expr",
            NodeKind::List => "list",
            NodeKind::Dict => "dict",
            NodeKind::Deref => "deref",
            NodeKind::Assign => "assign",
        }
    }

    /// Whether nodes of this kind are leaves. Only groupings hold children.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NodeKind::Expression | NodeKind::List | NodeKind::Dict)
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A node of the syntax tree.
///
/// Each node owns its children outright, there is no way back up to the
/// parent. `token` is set for `NodeKind::Token` leaves only, `children` is
/// empty for every terminal kind.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub token: Option<Token>,
    pub children: Vec<Node>,
    pub span: Span,
}

impl Node {
    pub fn leaf(token: Token) -> Self {
        Node {
            kind: NodeKind::Token,
            span: token.span.clone(),
            token: Some(token),
            children: vec![],
        }
    }

    pub fn branch(kind: NodeKind, children: Vec<Node>, span: Span) -> Self {
        Node {
            kind,
            token: None,
            children,
            span,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}

/// One pending line of the indented dump.
enum DumpLine<'a> {
    Node(&'a Node, usize),
    Close(usize),
}

/// Indented dump, one node per line
///
/// ```text
/// (
///   |symbol|a|
///   (
///     |number|1|
///   )
/// )
/// ```
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![DumpLine::Node(self, 0)];

        while let Some(line) = pending.pop() {
            match line {
                DumpLine::Close(indent) => writeln!(f, "{})", "  ".repeat(indent))?,
                DumpLine::Node(node, indent) => {
                    let pad = "  ".repeat(indent);

                    if !node.is_terminal() {
                        writeln!(f, "{}(", pad)?;
                        pending.push(DumpLine::Close(indent));
                        pending.extend(
                            node.children
                                .iter()
                                .rev()
                                .map(|child| DumpLine::Node(child, indent + 1)),
                        );
                        continue;
                    }

                    match &node.token {
                        Some(token) => writeln!(f, "{}|{}|{}|", pad, token.kind, token.value)?,
                        None => writeln!(f, "{}|{}|", pad, node.kind)?,
                    }
                }
            }
        }

        Ok(())
    }
}

// Dropping children one level at a time keeps deeply nested trees off the call stack
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
