//! Unit tests for the syntax tree and its traversal.

use crate::{
    ast::{
        ast::{ExprKind, Literal, Node, StmtKind, SyntaxNode, TypeKind, Visibility},
        visitor::{walk, Visitor},
    },
    lexer::tokens::Lexeme,
    Location, MK_NODE,
};

fn identifier(name: &str, column: u32) -> Node {
    MK_NODE!(
        Expr,
        ExprKind::Identifier(name.to_string()),
        Location::new(0, column)
    )
}

/// `a + (missing)` inside an expression statement.
fn sample() -> Node {
    let sum = MK_NODE!(
        Expr,
        ExprKind::Binary(Lexeme::Plus),
        Location::new(0, 0),
        vec![identifier("a", 0), Node::Missing(Location::new(0, 3))]
    );
    MK_NODE!(Stmt, StmtKind::Expression, Location::new(0, 0), vec![sum])
}

#[test]
fn test_node_accessors() {
    let node = sample();

    assert_eq!(node.stmt_kind(), Some(&StmtKind::Expression));
    assert_eq!(node.location(), Some(Location::new(0, 0)));
    assert_eq!(node.children().len(), 1);

    let sum = node.child(0).unwrap();
    assert_eq!(sum.expr_kind(), Some(&ExprKind::Binary(Lexeme::Plus)));
    assert!(sum.child(1).unwrap().is_missing());
    assert!(sum.as_type().is_none());
}

#[test]
fn test_sentinels() {
    assert!(Node::Empty.is_empty());
    assert_eq!(Node::Empty.location(), None);
    assert!(Node::Empty.children().is_empty());

    let missing = Node::Missing(Location::new(2, 7));
    assert!(missing.is_missing());
    assert!(!missing.is_empty());
    assert_eq!(missing.location(), Some(Location::new(2, 7)));
}

#[test]
fn test_leaf() {
    let leaf = SyntaxNode {
        kind: TypeKind::Infer,
        location: Location::null(),
        children: vec![],
    };
    assert!(leaf.is_leaf());
    assert!(leaf.child(0).is_none());
}

#[test]
fn test_missing_locations() {
    let node = sample();
    assert_eq!(node.missing_locations(), vec![Location::new(0, 3)]);
}

#[test]
fn test_count_nodes() {
    let counts = sample().count_nodes();
    assert_eq!(counts.stmts, 1);
    assert_eq!(counts.exprs, 2);
    assert_eq!(counts.total(), 3);
}

#[test]
fn test_visitor_order_is_grammar_order() {
    #[derive(Default)]
    struct Names(Vec<String>);

    impl Visitor for Names {
        fn visit_expr(&mut self, node: &SyntaxNode<ExprKind>) {
            if let ExprKind::Identifier(name) = &node.kind {
                self.0.push(name.clone());
            }
            crate::ast::visitor::walk_children(self, &node.children);
        }
    }

    let call = MK_NODE!(
        Expr,
        ExprKind::Call,
        Location::null(),
        vec![identifier("f", 0), identifier("x", 2), identifier("y", 5)]
    );

    let mut names = Names::default();
    walk(&mut names, &call);
    assert_eq!(names.0, vec!["f", "x", "y"]);
}

#[test]
fn test_visitor_sees_empty_slots() {
    #[derive(Default)]
    struct Empties(usize);

    impl Visitor for Empties {
        fn visit_empty(&mut self) {
            self.0 += 1;
        }
    }

    let ret = MK_NODE!(Stmt, StmtKind::Return, Location::null(), vec![Node::Empty]);
    let mut empties = Empties::default();
    walk(&mut empties, &ret);
    assert_eq!(empties.0, 1);
}

#[test]
fn test_visibility_from_lexeme() {
    assert_eq!(Visibility::from_lexeme(Lexeme::Pub), Some(Visibility::Public));
    assert_eq!(Visibility::from_lexeme(Lexeme::Prv), Some(Visibility::Private));
    assert_eq!(Visibility::from_lexeme(Lexeme::Fn), None);
    assert_eq!(Visibility::default(), Visibility::Default);
}

#[test]
fn test_literal_equality() {
    let one = MK_NODE!(Expr, ExprKind::Literal(Literal::Integer(1)), Location::null());
    let other = MK_NODE!(Expr, ExprKind::Literal(Literal::Integer(1)), Location::null());
    assert_eq!(one, other);
}
