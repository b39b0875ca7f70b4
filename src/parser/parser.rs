//! Shunting-yard parser for building syntax trees.
//!
//! The parser keeps two stacks: the operands, which are completed
//! syntax tree fragments, and the pending markers, which hold operators,
//! open parentheses, function names and `let` statements that are still
//! waiting for their operands. Tokens are fed one at a time, so the parser
//! can drain a lexer as it produces tokens.
//!
//! Operator precedence and associativity come from the token model's
//! `Binding` table; the parser never ranks operators on its own.

use std::mem;

use crate::{
    ast::ast::SyntaxTree,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Arity, Binding, Keyword, Token, TokenKind, TypeLiteral},
    Position,
};

/// A marker on the pending stack.
#[derive(Debug)]
enum Pending {
    Operator { token: Token, binding: Binding },
    /// Remembers how many operands existed when the parenthesis opened.
    Paren { token: Token, operands: usize },
    Function(Token),
    Let(Token),
}

/// The shunting-yard state.
///
/// Holds the operand stack, the pending marker stack and the lexical
/// errors reported so far.
#[derive(Debug, Default)]
pub struct Parser {
    /// Completed syntax tree fragments
    operands: Vec<SyntaxTree>,
    /// Operators and scope markers waiting to be folded
    pending: Vec<Pending>,
    /// Error and invalid tokens seen in the token stream
    diagnostics: Vec<Error>,
    /// Operand count when the current statement began
    statement_start: usize,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    /// Returns the lexical errors and invalid tokens reported so far.
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Returns the fragments completed so far.
    ///
    /// After a `;` these are whole statements.
    pub fn operands(&self) -> &[SyntaxTree] {
        &self.operands
    }

    /// Performs one shunting step for `token`.
    ///
    /// # Arguments
    ///
    /// * `token` - The next token of the stream
    ///
    /// # Returns
    ///
    /// Returns an Error when the token makes the input unparseable, such as a
    /// closing parenthesis without an opener. Error tokens are recorded as
    /// diagnostics and do not stop the scan.
    pub fn push(&mut self, token: Token) -> Result<(), Error> {
        match token.kind {
            TokenKind::Error => {
                self.diagnostics.push(Error::new(
                    ErrorImpl::LexicalError {
                        message: token.value.clone(),
                    },
                    token.span.start.clone(),
                ));
                Ok(())
            }
            TokenKind::Invalid => {
                self.diagnostics.push(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                ));
                Ok(())
            }
            TokenKind::EOF => Ok(()),
            TokenKind::Integer
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::Char
            | TokenKind::Identifier
            | TokenKind::Empty => {
                self.operands.push(SyntaxTree::leaf(token));
                Ok(())
            }
            TokenKind::Type(TypeLiteral::Tuple) | TokenKind::Function => {
                self.pending.push(Pending::Function(token));
                Ok(())
            }
            TokenKind::Type(_) => {
                self.operands.push(SyntaxTree::leaf(token));
                Ok(())
            }
            TokenKind::OpenParen => {
                let operands = self.operands.len();
                self.pending.push(Pending::Paren { token, operands });
                Ok(())
            }
            TokenKind::CloseParen => self.close_paren(token),
            TokenKind::Keyword(Keyword::Let) => {
                self.pending.push(Pending::Let(token));
                Ok(())
            }
            TokenKind::Keyword(Keyword::Semicolon) => self.drain(),
            TokenKind::Operator(_) | TokenKind::Keyword(_) => match token.kind.binding() {
                Some(binding) => self.push_operator(token, binding),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            },
        }
    }

    /// Drains the pending stack and returns every completed tree, in
    /// encounter order.
    ///
    /// # Returns
    ///
    /// Returns an Error if a parenthesis or call was never closed, or an
    /// operator is left without operands.
    pub fn finish(&mut self) -> Result<Vec<SyntaxTree>, Error> {
        self.drain()?;
        self.statement_start = 0;
        Ok(mem::take(&mut self.operands))
    }

    fn push_operator(&mut self, token: Token, binding: Binding) -> Result<(), Error> {
        // Prefix operators have nothing to their left to fold.
        if binding.arity == Arity::Binary {
            while let Some(top) = self.pending.pop() {
                match top {
                    Pending::Operator {
                        token: top_token,
                        binding: top_binding,
                    } if top_binding.folds_before(&binding) => {
                        self.reduce(top_token, top_binding)?;
                    }
                    other => {
                        self.pending.push(other);
                        break;
                    }
                }
            }
        }

        self.pending.push(Pending::Operator { token, binding });
        Ok(())
    }

    /// The operands an operator may fold: those pushed since the innermost
    /// open parenthesis, or since the statement began.
    fn available(&self) -> usize {
        let floor = self
            .pending
            .iter()
            .rev()
            .find_map(|pending| match pending {
                Pending::Paren { operands, .. } => Some(*operands),
                _ => None,
            })
            .unwrap_or(self.statement_start);

        self.operands.len().saturating_sub(floor)
    }

    /// Folds the most recent operands into a node for `token`.
    fn reduce(&mut self, token: Token, binding: Binding) -> Result<(), Error> {
        let arity = binding.arity.operands();

        if self.available() < arity {
            return Err(Error::new(
                ErrorImpl::MissingOperand {
                    operator: token.value.clone(),
                },
                token.span.start.clone(),
            ));
        }

        let children = self.operands.split_off(self.operands.len() - arity);
        self.operands.push(SyntaxTree::new(token, children));
        Ok(())
    }

    fn close_paren(&mut self, token: Token) -> Result<(), Error> {
        let grouped = loop {
            match self.pending.pop() {
                Some(Pending::Operator { token, binding }) => self.reduce(token, binding)?,
                Some(Pending::Paren { operands, .. }) => break self.operands.len() > operands,
                Some(Pending::Function(_)) | Some(Pending::Let(_)) | None => {
                    return Err(mismatched(token.span.start.clone()));
                }
            }
        };

        if !grouped {
            self.operands.push(SyntaxTree::empty(token.span.clone()));
        }

        if matches!(self.pending.last(), Some(Pending::Function(_))) {
            if let Some(Pending::Function(function)) = self.pending.pop() {
                let arguments = self.pop_operand(&function)?;
                self.operands.push(SyntaxTree::new(function, vec![arguments]));
            }
        } else if let Some(group) = self.operands.last_mut() {
            group.close_tuple();
        }

        Ok(())
    }

    /// Folds everything pending. Used at statement ends and end of input.
    fn drain(&mut self) -> Result<(), Error> {
        while let Some(pending) = self.pending.pop() {
            match pending {
                Pending::Operator { token, binding } => self.reduce(token, binding)?,
                Pending::Let(token) => {
                    let statement = self.pop_operand(&token)?;
                    self.operands.push(SyntaxTree::new(token, vec![statement]));
                }
                Pending::Paren { token, .. } | Pending::Function(token) => {
                    return Err(mismatched(token.span.start.clone()));
                }
            }
        }

        self.statement_start = self.operands.len();
        Ok(())
    }

    fn pop_operand(&mut self, owner: &Token) -> Result<SyntaxTree, Error> {
        let missing = || {
            Error::new(
                ErrorImpl::MissingOperand {
                    operator: owner.value.clone(),
                },
                owner.span.start.clone(),
            )
        };

        if self.available() == 0 {
            return Err(missing());
        }
        self.operands.pop().ok_or_else(missing)
    }
}

fn mismatched(position: Position) -> Error {
    Error::new(ErrorImpl::MismatchedParenthesis, position)
}

/// Parses a stream of tokens into syntax trees.
///
/// This is the main entry point for parsing. It feeds every token to a
/// fresh parser and drains it once the stream ends. `tokens` may be any
/// iterator, including a lexer or the receiving end of a channel, in which
/// case parsing proceeds as tokens arrive.
///
/// # Arguments
///
/// * `tokens` - The token stream to parse
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with its diagnostics)
/// - Result containing either the completed trees or the first Error
pub fn parse<T>(tokens: T) -> (Parser, Result<Vec<SyntaxTree>, Error>)
where
    T: IntoIterator<Item = Token>,
{
    let mut parser = Parser::new();

    for token in tokens {
        if let Err(error) = parser.push(token) {
            return (parser, Err(error));
        }
    }

    let trees = parser.finish();

    // A reported lexical error is the root cause of whatever followed it.
    let result = match parser.diagnostics.first() {
        Some(diagnostic) => Err(diagnostic.clone()),
        None => trees,
    };

    (parser, result)
}
