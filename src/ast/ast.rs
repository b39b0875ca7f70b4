use std::fmt::Display;

use crate::{
    lexer::tokens::{Keyword, Token, TokenKind},
    Span,
};

/// Syntax Tree
///
/// A node of the parser's output. Operators hold their operands as
/// children (left then right for binary operators), function names hold
/// their argument list as a single child, and literals are leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    pub value: Token,
    pub children: Vec<SyntaxTree>,
    /// Set on every link of a comma chain closed by its own parentheses
    pub tuple: bool,
}

impl SyntaxTree {
    pub fn new(value: Token, children: Vec<SyntaxTree>) -> Self {
        SyntaxTree {
            value,
            children,
            tuple: false,
        }
    }

    pub fn leaf(value: Token) -> Self {
        SyntaxTree {
            value,
            children: vec![],
            tuple: false,
        }
    }

    /// The empty tuple `()`.
    pub fn empty(span: Span) -> Self {
        SyntaxTree::leaf(Token {
            kind: TokenKind::Empty,
            value: String::from("()"),
            span,
        })
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_empty_tuple(&self) -> bool {
        self.value.kind == TokenKind::Empty
    }

    fn is_comma(&self) -> bool {
        self.value.kind == TokenKind::Keyword(Keyword::Comma) && self.children.len() == 2
    }

    /// A comma that still separates the elements of an argument list.
    fn is_separator(&self) -> bool {
        self.is_comma() && !self.tuple
    }

    /// A comma chain closed by its own parentheses, such as `(1, 2)`.
    pub fn is_tuple(&self) -> bool {
        self.is_comma() && self.tuple
    }

    /// Marks the comma chain rooted here as a tuple value. Elements that are
    /// tuples of their own are left alone.
    pub fn close_tuple(&mut self) {
        let mut link = self;

        while link.is_separator() {
            link.tuple = true;
            link = &mut link.children[0];
        }
    }

    /// Flattens the argument list of a function node into its arguments,
    /// in source order. `f()` has no arguments and a parenthesized tuple
    /// counts as one argument.
    pub fn arguments(&self) -> Vec<&SyntaxTree> {
        let mut arguments = vec![];

        if let Some(list) = self.children.first() {
            if !list.is_empty_tuple() {
                list.collect_comma_chain(&mut arguments);
            }
        }

        arguments
    }

    fn collect_comma_chain<'a>(&'a self, out: &mut Vec<&'a SyntaxTree>) {
        if self.is_separator() {
            self.children[0].collect_comma_chain(out);
            out.push(&self.children[1]);
        } else {
            out.push(self);
        }
    }
}

impl Display for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_leaf() {
            return write!(f, "{}", self.value.value);
        }

        write!(f, "({}", self.value.value)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}
