use crate::lexer::tokens::{Token, TokenKind};

/// Built-in container shapes usable both as literals and as types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    ArrayList,
    LinkedList,
    Map,
    Set,
    UndirectedGraph,
    DirectedGraph,
}

impl ContainerKind {
    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::ArrayList => "ARR",
            ContainerKind::LinkedList => "L_ARR",
            ContainerKind::Map => "MAP",
            ContainerKind::Set => "SET",
            ContainerKind::UndirectedGraph => "UNDIR",
            ContainerKind::DirectedGraph => "DIR",
        }
    }

    pub fn from_opener(kind: TokenKind) -> Option<ContainerKind> {
        match kind {
            TokenKind::ArrOpen => Some(ContainerKind::ArrayList),
            TokenKind::LArrOpen => Some(ContainerKind::LinkedList),
            TokenKind::ScopeOpen => Some(ContainerKind::Map),
            TokenKind::SetOpen => Some(ContainerKind::Set),
            TokenKind::UndirOpen => Some(ContainerKind::UndirectedGraph),
            TokenKind::DirOpen => Some(ContainerKind::DirectedGraph),
            _ => None,
        }
    }

    pub fn from_shorthand(kind: TokenKind) -> Option<ContainerKind> {
        match kind {
            TokenKind::ArrType => Some(ContainerKind::ArrayList),
            TokenKind::LArrType => Some(ContainerKind::LinkedList),
            TokenKind::MapType => Some(ContainerKind::Map),
            TokenKind::SetType => Some(ContainerKind::Set),
            TokenKind::UndirType => Some(ContainerKind::UndirectedGraph),
            TokenKind::DirType => Some(ContainerKind::DirectedGraph),
            _ => None,
        }
    }

    pub fn closer(&self) -> TokenKind {
        match self {
            ContainerKind::ArrayList | ContainerKind::LinkedList => TokenKind::ArrClose,
            ContainerKind::Map => TokenKind::ScopeClose,
            ContainerKind::Set => TokenKind::SetClose,
            ContainerKind::UndirectedGraph => TokenKind::UndirClose,
            ContainerKind::DirectedGraph => TokenKind::DirClose,
        }
    }
}

/// A type annotation such as `int`, `*Node` or `[str]`.
///
/// Container types carry their element types in `types`; shorthand
/// container tokens (`[]`, `{}`, ...) produce a container with none.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub token: Token,
    pub is_pointer: bool,
    pub container: Option<ContainerKind>,
    pub types: Vec<TypeExpr>,
}

impl TypeExpr {
    pub fn named(token: Token, is_pointer: bool) -> Self {
        TypeExpr {
            token,
            is_pointer,
            container: None,
            types: vec![],
        }
    }

    pub fn container(
        token: Token,
        is_pointer: bool,
        container: ContainerKind,
        types: Vec<TypeExpr>,
    ) -> Self {
        TypeExpr {
            token,
            is_pointer,
            container: Some(container),
            types,
        }
    }
}
