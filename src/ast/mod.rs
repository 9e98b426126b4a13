/// AST module
/// Contains the syntax tree produced by the parser
///
/// Submodules:
/// - node: Node kinds and the recursive tree node
pub mod node;
