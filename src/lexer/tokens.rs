//! The lexeme catalog: every token kind, its canonical spelling, its
//! classification groups and, for operators, its precedence rank.

use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Span, TOKEN_CATALOG};

/// A fixed set of classification flags attached to a token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Groups(u16);

impl Groups {
    pub const NONE: Groups = Groups(0);
    pub const LIT: Groups = Groups(1 << 0);
    pub const RSD: Groups = Groups(1 << 1);
    pub const OPR: Groups = Groups(1 << 2);
    pub const MDF: Groups = Groups(1 << 3);
    pub const TYP: Groups = Groups(1 << 4);
    pub const CNS: Groups = Groups(1 << 5);
    pub const DIR: Groups = Groups(1 << 6);
    pub const CNT: Groups = Groups(1 << 7);
    pub const ASN: Groups = Groups(1 << 8);

    pub const fn with(self, other: Groups) -> Groups {
        Groups(self.0 | other.0)
    }

    pub const fn contains(self, other: Groups) -> bool {
        self.0 & other.0 == other.0
    }
}

TOKEN_CATALOG! {
    Eol => "EOL", ";", [];
    Eof => "EOF", "", [];
    Comma => "COMMA", ",", [];
    Colon => "COLON", ":", [];
    Direct => "DIRECT", "=>", [];
    Annotation => "ANNOTATION", "@", [];
    Ternary => "TERNARY", "?", [];
    Period => "PERIOD", ".", [];

    Deref => "DEREF", "&", [OPR];
    TotalRef => "TOTAL_REF", "#", [OPR];

    Assign => "ASSIGN", "=", [];
    CastAssign => "CAST_ASSIGN", ":=", [];
    Equal => "EQUAL", "==", [OPR];
    CastEqual => "CAST_EQUAL", ":==", [OPR];
    NotEqual => "NOT_EQUAL", "!=", [OPR];
    CastNotEqual => "CAST_NOT_EQUAL", ":!=", [OPR];

    Var => "VAR", "", [];
    RealVal => "REAL_VAL", "", [LIT];
    IntVal => "INT_VAL", "", [LIT];
    StrVal => "STR_VAL", "", [LIT];
    True => "TRUE", "true", [RSD | LIT];
    False => "FALSE", "false", [RSD | LIT];

    Add => "ADD", "+", [OPR];
    Subtract => "SUBTRACT", "-", [OPR];
    Multiply => "MULTIPLY", "*", [OPR];
    Divide => "DIVIDE", "/", [OPR];
    Mod => "MOD", "%", [OPR];
    Floor => "FLOOR", "-/", [OPR];
    Exp => "EXP", "**", [OPR];
    Round => "ROUND", "`", [OPR];
    Increment => "INCREMENT", "++", [OPR];
    Decrement => "DECREMENT", "--", [OPR];
    Point => "POINT", "*", [OPR];

    LAnd => "L_AND", "&&", [OPR];
    LOr => "L_OR", "||", [OPR];
    LNot => "L_NOT", "!", [OPR];
    LXor => "L_XOR", "^^", [OPR];
    BAnd => "B_AND", "&", [OPR];
    BOr => "B_OR", "|", [OPR];
    BNot => "B_NOT", "~", [OPR];
    BXor => "B_XOR", "^", [OPR];

    LessThan => "LESS_THAN", "<", [OPR];
    GreaterThan => "GREATER_THAN", ">", [OPR];
    LessThanEq => "LESS_THAN_EQ", "<=", [OPR];
    GreaterThanEq => "GREATER_THAN_EQ", ">=", [OPR];
    ShiftRight => "SHIFT_RIGHT", ">>", [OPR];
    ShiftLeft => "SHIFT_LEFT", "<<", [OPR];

    AddEq => "ADD_EQ", "+=", [OPR | ASN];
    SubtractEq => "SUBTRACT_EQ", "-=", [OPR | ASN];
    MultiplyEq => "MULTIPLY_EQ", "*=", [OPR | ASN];
    DivideEq => "DIVIDE_EQ", "/=", [OPR | ASN];
    ModEq => "MOD_EQ", "%=", [OPR | ASN];
    FloorEq => "FLOOR_EQ", "-/=", [OPR | ASN];
    RoundEq => "ROUND_EQ", "`=", [OPR | ASN];
    ExpEq => "EXP_EQ", "**=", [OPR | ASN];
    LAndEq => "L_AND_EQ", "&&=", [OPR | ASN];
    LOrEq => "L_OR_EQ", "||=", [OPR | ASN];
    LXorEq => "L_XOR_EQ", "^^=", [OPR | ASN];
    BAndEq => "B_AND_EQ", "&=", [OPR | ASN];
    BOrEq => "B_OR_EQ", "|=", [OPR | ASN];
    BXorEq => "B_XOR_EQ", "^=", [OPR | ASN];
    ShiftRightEq => "SHIFT_RIGHT_EQ", ">>=", [OPR | ASN];
    ShiftLeftEq => "SHIFT_LEFT_EQ", "<<=", [OPR | ASN];

    NullCoalesce => "NULL_COALESCE", "??", [OPR];
    Pipeline => "PIPELINE", "|>", [OPR];
    OptChain => "OPT_CHAIN", "?.", [];

    ParOpen => "PAR_OPEN", "(", [];
    ParClose => "PAR_CLOSE", ")", [];

    ArrOpen => "ARR_OPEN", "[", [CNT];
    LArrOpen => "L_ARR_OPEN", "-[", [CNT];
    ArrClose => "ARR_CLOSE", "]", [CNT];
    ScopeOpen => "SCOPE_OPEN", "{", [CNT];
    ScopeClose => "SCOPE_CLOSE", "}", [CNT];
    SetOpen => "SET_OPEN", "{<", [CNT];
    SetClose => "SET_CLOSE", "<}", [CNT];
    UndirOpen => "UNDIR_OPEN", "*-", [CNT | OPR];
    UndirClose => "UNDIR_CLOSE", "-*", [CNT | OPR];
    DirOpen => "DIR_OPEN", "*->", [CNT];
    DirClose => "DIR_CLOSE", "<-*", [CNT];
    DirEdge => "DIR_EDGE", "->", [OPR];
    Dir2Edge => "DIR_2_EDGE", "<->", [OPR];

    ArrType => "ARR_TYPE", "[]", [CNT | TYP];
    LArrType => "L_ARR_TYPE", "-[]", [CNT | TYP];
    UndirType => "UNDIR_TYPE", "*-*", [CNT | TYP];
    DirType => "DIR_TYPE", "*->*", [CNT | TYP];
    MapType => "MAP_TYPE", "{}", [CNT | TYP];
    SetType => "SET_TYPE", "{><}", [CNT | TYP];
    StrBound => "STR_BOUND", "", [];

    Int => "INT", "int", [RSD | TYP];
    Real => "REAL", "real", [RSD | TYP];
    Char => "CHAR", "char", [RSD | TYP];
    Bool => "BOOL", "bool", [RSD | TYP];
    Str => "STR", "str", [RSD | TYP];
    Null => "NULL", "null", [RSD | TYP | LIT];
    Any => "ANY", "any", [RSD | TYP];
    Atom => "ATOM", "atom", [RSD | TYP];
    Container => "CONTAINER", "contain", [RSD | TYP];

    If => "IF", "if", [RSD | DIR];
    Else => "ELSE", "else", [RSD | DIR];
    Switch => "SWITCH", "switch", [RSD | DIR];
    Case => "CASE", "case", [RSD | DIR];
    Default => "DEFAULT", "default", [RSD | DIR];
    Select => "SELECT", "select", [RSD | DIR];
    Try => "TRY", "try", [RSD | DIR];
    Catch => "CATCH", "catch", [RSD | DIR];

    Print => "PRINT", "print", [RSD];
    Size => "SIZE", "size", [RSD];
    Hash => "HASH", "hash", [RSD];
    Loop => "LOOP", "loop", [RSD | DIR];

    Func => "FUNC", "func", [RSD | CNS | TYP];
    Class => "CLASS", "class", [RSD | CNS | TYP];
    Enum => "ENUM", "enum", [RSD | CNS | TYP];
    Interface => "INTERFACE", "interface", [RSD | CNS | TYP];
    Struct => "STRUCT", "struct", [RSD | CNS | TYP];
    Extend => "EXTEND", "extend", [RSD | CNS];

    Super => "SUPER", "super", [RSD];
    This => "THIS", "this", [RSD];

    Static => "STATIC", "static", [RSD | MDF];
    Public => "PUBLIC", "public", [RSD | MDF];
    Private => "PRIVATE", "private", [RSD | MDF];
    Property => "PROPERTY", "property", [RSD | MDF];
    Abstract => "ABSTRACT", "abstract", [RSD | MDF];
    Module => "MODULE", "module", [RSD | MDF];
    Final => "FINAL", "final", [RSD | MDF];

    Break => "BREAK", "break", [RSD];
    Continue => "CONTINUE", "continue", [RSD];
    Pass => "PASS", "pass", [RSD];
    Defer => "DEFER", "defer", [RSD];
    Return => "RETURN", "return", [RSD];
}

lazy_static! {
    /// Operator rank: lower binds tighter. Kinds without an entry are not
    /// subject to rebalancing.
    pub static ref PRECEDENCE: HashMap<TokenKind, u8> = {
        use TokenKind::*;

        let tiers: [&[TokenKind]; 20] = [
            &[ArrType, ParOpen, Period, OptChain],
            &[Point],
            &[Increment, Decrement],
            &[LNot, BNot],
            &[Round, Exp],
            &[Multiply, Divide, Mod, Floor],
            &[Add, Subtract],
            &[ShiftLeft, ShiftRight],
            &[LessThan, GreaterThan, LessThanEq, GreaterThanEq],
            &[Equal, NotEqual, CastEqual, CastNotEqual],
            &[BAnd],
            &[BOr],
            &[BXor],
            &[LAnd],
            &[LOr],
            &[LXor],
            &[Ternary],
            &[NullCoalesce],
            &[Pipeline],
            &[
                AddEq, SubtractEq, MultiplyEq, DivideEq, ModEq, FloorEq, RoundEq, ExpEq,
                LAndEq, LOrEq, LXorEq, BAndEq, BOrEq, BXorEq, ShiftRightEq, ShiftLeftEq,
            ],
        ];

        let mut map = HashMap::new();
        for (rank, kinds) in tiers.iter().enumerate() {
            for kind in kinds.iter() {
                map.insert(*kind, rank as u8);
            }
        }
        map
    };
}

impl TokenKind {
    pub fn is_literal(&self) -> bool {
        self.groups().contains(Groups::LIT)
    }

    pub fn is_reserved(&self) -> bool {
        self.groups().contains(Groups::RSD)
    }

    pub fn is_operator(&self) -> bool {
        self.groups().contains(Groups::OPR)
    }

    pub fn is_modifier(&self) -> bool {
        self.groups().contains(Groups::MDF)
    }

    pub fn is_type(&self) -> bool {
        self.groups().contains(Groups::TYP)
    }

    pub fn is_construct(&self) -> bool {
        self.groups().contains(Groups::CNS)
    }

    pub fn is_direct(&self) -> bool {
        self.groups().contains(Groups::DIR)
    }

    pub fn is_container(&self) -> bool {
        self.groups().contains(Groups::CNT)
    }

    pub fn is_assignment(&self) -> bool {
        self.groups().contains(Groups::ASN)
    }

    pub fn precedence(&self) -> Option<u8> {
        PRECEDENCE.get(self).copied()
    }

    /// Kinds that join two operands inside an expression weave.
    pub fn is_binary_operator(&self) -> bool {
        use TokenKind::*;

        self.is_assignment()
            || matches!(
                self,
                Exp | Multiply
                    | Divide
                    | Mod
                    | Floor
                    | Add
                    | Subtract
                    | ShiftLeft
                    | ShiftRight
                    | LessThan
                    | GreaterThan
                    | LessThanEq
                    | GreaterThanEq
                    | Equal
                    | NotEqual
                    | CastEqual
                    | CastNotEqual
                    | BAnd
                    | BOr
                    | BXor
                    | LAnd
                    | LOr
                    | LXor
                    | NullCoalesce
                    | Pipeline
            )
    }

    /// Kinds produced only by the parser from context, never by the lexer.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, TokenKind::Deref | TokenKind::Point | TokenKind::StrBound)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: String, span: Span) -> Self {
        Token { kind, value, span }
    }

    /// A token of `kind` carrying its canonical spelling.
    pub fn canonical(kind: TokenKind, span: Span) -> Self {
        Token::new(kind, String::from(kind.spelling()), span)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value == self.kind.spelling() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}({})", self.kind, self.value)
        }
    }
}
