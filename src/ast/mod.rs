/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the syntax tree
///
/// Submodules:
/// - ast: The node sum type, its families and their kinds
/// - visitor: Exhaustive-match traversal and a couple of stock visitors
pub mod ast;
pub mod visitor;

#[cfg(test)]
mod tests;
