use lazy_static::lazy_static;
use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use crate::{errors::errors::ErrorImpl, Span};

lazy_static! {
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, Operator> = {
        let mut map = HashMap::new();
        for operator in Operator::ALL {
            map.insert(operator.as_str(), operator);
        }
        map
    };
    pub static ref KEYWORD_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert(":", Keyword::TypeSeparator);
        map.insert("=", Keyword::Assign);
        map.insert(",", Keyword::Comma);
        map.insert(";", Keyword::Semicolon);
        map.insert("let", Keyword::Let);
        map
    };
    pub static ref TYPE_LOOKUP: HashMap<&'static str, TypeLiteral> = {
        let mut map = HashMap::new();
        map.insert("i32", TypeLiteral::I32);
        map.insert("f32", TypeLiteral::F32);
        map.insert("bool", TypeLiteral::Bool);
        map.insert("string", TypeLiteral::String);
        map.insert("rune", TypeLiteral::Rune);
        map.insert("tuple", TypeLiteral::Tuple);
        map
    };
    /// Every rune used by some operator spelling.
    pub static ref OPERATOR_CHARSET: HashSet<char> =
        OPERATOR_LOOKUP.keys().flat_map(|spelling| spelling.chars()).collect();
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Arity {
    Unary,
    Binary,
}

impl Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Unary => write!(f, "unary"),
            Arity::Binary => write!(f, "binary"),
        }
    }
}

impl Arity {
    /// Number of operands an operator of this arity folds.
    pub fn operands(self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Operator {
    Add,    // +
    Sub,    // -
    Mul,    // *
    Div,    // /
    Mod,    // %
    Comma,  // ,
    Dot,    // .
    Type,   // :
    Eq,     // ==
    NotEq,  // !=
    Gt,     // >
    GtEq,   // >=
    Lt,     // <
    LtEq,   // <=

    Not,    // !
}

impl Operator {
    pub const ALL: [Operator; 15] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
        Operator::Comma,
        Operator::Dot,
        Operator::Type,
        Operator::Eq,
        Operator::NotEq,
        Operator::Gt,
        Operator::GtEq,
        Operator::Lt,
        Operator::LtEq,
        Operator::Not,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Comma => ",",
            Operator::Dot => ".",
            Operator::Type => ":",
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Not => "!",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Operator::Not => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    /// Higher binds tighter. Operators without an entry bind tightest.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Comma => 1,
            Operator::Add | Operator::Sub => 2,
            Operator::Mul | Operator::Div | Operator::Mod => 3,
            Operator::Dot => 4,
            _ => 15,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            Operator::Not => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn binding(self) -> Binding {
        Binding {
            precedence: self.precedence(),
            associativity: self.associativity(),
            arity: self.arity(),
        }
    }

    /// Resolves `spelling` against the operators of the given arity.
    pub fn lookup(spelling: &str, arity: Arity) -> Result<Operator, ErrorImpl> {
        match OPERATOR_LOOKUP.get(spelling) {
            Some(operator) if operator.arity() == arity => Ok(*operator),
            _ => Err(ErrorImpl::NotAnOperator {
                operator: spelling.to_string(),
                arity: arity.to_string(),
            }),
        }
    }

    /// Whether some operator of the given arity is spelled starting with `prefix`.
    pub fn is_prefix(prefix: &str, arity: Arity) -> bool {
        OPERATOR_LOOKUP
            .iter()
            .any(|(spelling, operator)| operator.arity() == arity && spelling.starts_with(prefix))
    }
}

/// How the parser folds a token that acts as an operator.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Binding {
    pub precedence: u8,
    pub associativity: Associativity,
    pub arity: Arity,
}

impl Binding {
    /// Whether an operator bound like `self`, already waiting on the stack,
    /// must be folded before `incoming` is pushed.
    pub fn folds_before(&self, incoming: &Binding) -> bool {
        match incoming.associativity {
            Associativity::Left => self.precedence >= incoming.precedence,
            Associativity::Right => self.precedence > incoming.precedence,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    TypeSeparator, // :
    Assign,        // =
    Comma,         // ,
    Semicolon,     // ;
    Let,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::TypeSeparator => ":",
            Keyword::Assign => "=",
            Keyword::Comma => ",",
            Keyword::Semicolon => ";",
            Keyword::Let => "let",
        }
    }

    pub fn lookup(spelling: &str) -> Result<Keyword, ErrorImpl> {
        KEYWORD_LOOKUP
            .get(spelling)
            .copied()
            .ok_or_else(|| ErrorImpl::NotAKeyword {
                keyword: spelling.to_string(),
            })
    }

    /// Keywords the parser folds like infix operators.
    pub fn binding(self) -> Option<Binding> {
        match self {
            Keyword::Comma => Some(Operator::Comma.binding()),
            Keyword::TypeSeparator => Some(Operator::Type.binding()),
            // Joins a `let` target to its value after everything else is folded.
            Keyword::Assign => Some(Binding {
                precedence: 0,
                associativity: Associativity::Right,
                arity: Arity::Binary,
            }),
            Keyword::Semicolon | Keyword::Let => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TypeLiteral {
    I32,
    F32,
    Bool,
    String,
    Rune,
    Tuple,
}

impl TypeLiteral {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeLiteral::I32 => "i32",
            TypeLiteral::F32 => "f32",
            TypeLiteral::Bool => "bool",
            TypeLiteral::String => "string",
            TypeLiteral::Rune => "rune",
            TypeLiteral::Tuple => "tuple",
        }
    }

    pub fn lookup(spelling: &str) -> Result<TypeLiteral, ErrorImpl> {
        TYPE_LOOKUP
            .get(spelling)
            .copied()
            .ok_or_else(|| ErrorImpl::NotAType {
                type_: spelling.to_string(),
            })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Error,
    Invalid,
    /// The empty tuple `()`, produced by the parser.
    Empty,

    OpenParen,
    CloseParen,

    Identifier,
    /// Identifier immediately followed by `(`.
    Function,

    String,
    Char,
    Integer,
    Float,

    Operator(Operator),
    Keyword(Keyword),
    Type(TypeLiteral),
}

impl TokenKind {
    pub fn binding(&self) -> Option<Binding> {
        match self {
            TokenKind::Operator(operator) => Some(operator.binding()),
            TokenKind::Keyword(keyword) => keyword.binding(),
            _ => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Token {
    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::String | TokenKind::Char | TokenKind::Integer | TokenKind::Float
        )
    }

    pub fn debug(&self) {
        if self.is_literal()
            || matches!(
                self.kind,
                TokenKind::Identifier | TokenKind::Function | TokenKind::Error
            )
        {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
