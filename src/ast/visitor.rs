//! Exhaustive-match traversal over the syntax tree.
//!
//! Implement [`Visitor`] and override the family hooks of interest; the
//! defaults descend into children in grammar order.

use crate::Location;

use super::ast::{DeclKind, ExprKind, GlobalKind, Node, StmtKind, SyntaxNode, TypeKind};

pub trait Visitor {
    fn visit_expr(&mut self, node: &SyntaxNode<ExprKind>) {
        walk_children(self, &node.children);
    }

    fn visit_type(&mut self, node: &SyntaxNode<TypeKind>) {
        walk_children(self, &node.children);
    }

    fn visit_decl(&mut self, node: &SyntaxNode<DeclKind>) {
        walk_children(self, &node.children);
    }

    fn visit_stmt(&mut self, node: &SyntaxNode<StmtKind>) {
        walk_children(self, &node.children);
    }

    fn visit_global(&mut self, node: &SyntaxNode<GlobalKind>) {
        walk_children(self, &node.children);
    }

    fn visit_missing(&mut self, _location: Location) {}

    fn visit_empty(&mut self) {}
}

pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) {
    match node {
        Node::Empty => visitor.visit_empty(),
        Node::Missing(location) => visitor.visit_missing(*location),
        Node::Expr(node) => visitor.visit_expr(node),
        Node::Type(node) => visitor.visit_type(node),
        Node::Decl(node) => visitor.visit_decl(node),
        Node::Stmt(node) => visitor.visit_stmt(node),
        Node::Global(node) => visitor.visit_global(node),
    }
}

pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, children: &[Node]) {
    for child in children {
        walk(visitor, child);
    }
}

/// Collects the location of every required-but-missing node.
#[derive(Debug, Default)]
pub struct MissingCollector {
    pub locations: Vec<Location>,
}

impl Visitor for MissingCollector {
    fn visit_missing(&mut self, location: Location) {
        self.locations.push(location);
    }
}

/// Counts non-sentinel nodes per family.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeCounter {
    pub exprs: usize,
    pub types: usize,
    pub decls: usize,
    pub stmts: usize,
    pub globals: usize,
}

impl NodeCounter {
    pub fn total(&self) -> usize {
        self.exprs + self.types + self.decls + self.stmts + self.globals
    }
}

impl Visitor for NodeCounter {
    fn visit_expr(&mut self, node: &SyntaxNode<ExprKind>) {
        self.exprs += 1;
        walk_children(self, &node.children);
    }

    fn visit_type(&mut self, node: &SyntaxNode<TypeKind>) {
        self.types += 1;
        walk_children(self, &node.children);
    }

    fn visit_decl(&mut self, node: &SyntaxNode<DeclKind>) {
        self.decls += 1;
        walk_children(self, &node.children);
    }

    fn visit_stmt(&mut self, node: &SyntaxNode<StmtKind>) {
        self.stmts += 1;
        walk_children(self, &node.children);
    }

    fn visit_global(&mut self, node: &SyntaxNode<GlobalKind>) {
        self.globals += 1;
        walk_children(self, &node.children);
    }
}

impl Node {
    pub fn missing_locations(&self) -> Vec<Location> {
        let mut collector = MissingCollector::default();
        walk(&mut collector, self);
        collector.locations
    }

    pub fn count_nodes(&self) -> NodeCounter {
        let mut counter = NodeCounter::default();
        walk(&mut counter, self);
        counter
    }
}
