use crate::{lexer::tokens::Lexeme, Location};

/// A node of the syntax tree.
///
/// Five disjoint families plus two sentinels. `Empty` fills an optional child
/// slot that was not present; `Missing` marks a slot where a production was
/// required but could not be parsed. Both keep positional child layouts intact.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Empty,
    Missing(Location),
    Expr(SyntaxNode<ExprKind>),
    Type(SyntaxNode<TypeKind>),
    Decl(SyntaxNode<DeclKind>),
    Stmt(SyntaxNode<StmtKind>),
    Global(SyntaxNode<GlobalKind>),
}

/// A tagged node: family-specific kind, location of its first token and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode<K> {
    pub kind: K,
    pub location: Location,
    pub children: Vec<Node>,
}

impl<K> SyntaxNode<K> {
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(u64),
    Float(f64),
    String(String),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Identifier(String),
    Literal(Literal),
    Prefix(Lexeme),
    Binary(Lexeme),
    Ternary,
    Tuple,
    Array,
    Record,
    RecordField(String),
    Call,
    Index,
    Try,
    /// Decoded literal segments around the placeholder children.
    String(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Identifier { name: String, fundamental: bool },
    Tuple,
    Array,
    Function,
    Binary(Lexeme),
    GenericArguments,
    Infer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    Identifier { name: String, mutable: bool },
    Tuple,
    GenericParameter(String),
    GenericParameters,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Block,
    Declaration,
    Return,
    Assignment(Lexeme),
    Conditional,
    Loop,
    Match,
    MatchCase,
    Defer,
    Expression,
    Break,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Default,
    Public,
    Private,
}

impl Visibility {
    pub fn from_lexeme(lexeme: Lexeme) -> Option<Visibility> {
        match lexeme {
            Lexeme::Pub => Some(Visibility::Public),
            Lexeme::Prv => Some(Visibility::Private),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GlobalKind {
    Module(Vec<String>),
    Import {
        path: Vec<String>,
        alias: Option<String>,
    },
    ImportGroup,
    FunctionPrototype {
        visibility: Visibility,
        name: String,
    },
    Function,
    TranslationUnit(String),
}

impl Node {
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Node::Missing(_))
    }

    /// Location of the first token of the production; `None` for `Empty`.
    pub fn location(&self) -> Option<Location> {
        match self {
            Node::Empty => None,
            Node::Missing(location) => Some(*location),
            Node::Expr(node) => Some(node.location),
            Node::Type(node) => Some(node.location),
            Node::Decl(node) => Some(node.location),
            Node::Stmt(node) => Some(node.location),
            Node::Global(node) => Some(node.location),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Empty | Node::Missing(_) => &[],
            Node::Expr(node) => &node.children,
            Node::Type(node) => &node.children,
            Node::Decl(node) => &node.children,
            Node::Stmt(node) => &node.children,
            Node::Global(node) => &node.children,
        }
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    pub fn as_expr(&self) -> Option<&SyntaxNode<ExprKind>> {
        match self {
            Node::Expr(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&SyntaxNode<TypeKind>> {
        match self {
            Node::Type(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_decl(&self) -> Option<&SyntaxNode<DeclKind>> {
        match self {
            Node::Decl(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_stmt(&self) -> Option<&SyntaxNode<StmtKind>> {
        match self {
            Node::Stmt(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_global(&self) -> Option<&SyntaxNode<GlobalKind>> {
        match self {
            Node::Global(node) => Some(node),
            _ => None,
        }
    }

    pub fn expr_kind(&self) -> Option<&ExprKind> {
        self.as_expr().map(|node| &node.kind)
    }

    pub fn type_kind(&self) -> Option<&TypeKind> {
        self.as_type().map(|node| &node.kind)
    }

    pub fn decl_kind(&self) -> Option<&DeclKind> {
        self.as_decl().map(|node| &node.kind)
    }

    pub fn stmt_kind(&self) -> Option<&StmtKind> {
        self.as_stmt().map(|node| &node.kind)
    }

    pub fn global_kind(&self) -> Option<&GlobalKind> {
        self.as_global().map(|node| &node.kind)
    }
}
