//! Lexer states, named by the grammatical context they resolve.
//!
//! Each state consumes zero or more runes, emits zero or more tokens and
//! returns the next state. `None` ends the token stream.

use crate::errors::errors::ErrorImpl;

use super::{
    lexer::{
        is_char_body, is_digit, is_identifier_continue, is_identifier_start, is_number_body,
        is_operator_body, is_string_body, Lexer,
    },
    tokens::{Arity, Keyword, Operator, TokenKind, TypeLiteral},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum State {
    Start,
    Keyword,
    LetIdent,
    LetType,
    LetTypeTuple,
    LetInsideTuple,
    LetAssignment,
    Expression,
    Identifier,
    Number,
    Float,
    PostValue,
    BinaryOperator,
    UnaryOperator,
    RightParen,
    Comma,
    Semicolon,
}

pub type StateHandler<I> = fn(&mut Lexer<I>) -> Option<State>;

impl State {
    pub fn handler<I: Iterator<Item = char>>(self) -> StateHandler<I> {
        match self {
            State::Start => Lexer::lex_start,
            State::Keyword => Lexer::lex_keyword,
            State::LetIdent => Lexer::lex_let_ident,
            State::LetType => Lexer::lex_let_type,
            State::LetTypeTuple => Lexer::lex_let_type_tuple,
            State::LetInsideTuple => Lexer::lex_let_inside_tuple,
            State::LetAssignment => Lexer::lex_let_assignment,
            State::Expression => Lexer::lex_expression,
            State::Identifier => Lexer::lex_identifier,
            State::Number => Lexer::lex_number,
            State::Float => Lexer::lex_float,
            State::PostValue => Lexer::lex_post_value,
            State::BinaryOperator => Lexer::lex_binary_operator,
            State::UnaryOperator => Lexer::lex_unary_operator,
            State::RightParen => Lexer::lex_right_paren,
            State::Comma => Lexer::lex_comma,
            State::Semicolon => Lexer::lex_semicolon,
        }
    }
}

fn unexpected(found: Option<char>, context: &str) -> ErrorImpl {
    match found {
        Some(rune) => ErrorImpl::UnexpectedRune {
            rune,
            context: context.to_string(),
        },
        None => ErrorImpl::UnexpectedEndOfInput {
            expected: context.to_string(),
        },
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub(super) fn step(&mut self, state: State) -> Option<State> {
        state.handler()(self)
    }

    fn lex_start(&mut self) -> Option<State> {
        match self.skip_whitespace()? {
            c if is_identifier_start(c) => Some(State::Keyword),
            _ => Some(State::Expression),
        }
    }

    fn lex_keyword(&mut self) -> Option<State> {
        self.accept_run(is_identifier_continue);

        match Keyword::lookup(&self.lexed) {
            Ok(Keyword::Let) => {
                self.emit(TokenKind::Keyword(Keyword::Let));
                Some(State::LetIdent)
            }
            // Not a keyword, the lexeme carries over into the identifier.
            _ => Some(State::Identifier),
        }
    }

    fn lex_let_ident(&mut self) -> Option<State> {
        match self.skip_whitespace() {
            Some(c) if is_identifier_start(c) => {}
            other => return self.fail(unexpected(other, "a name after `let`")),
        }

        self.accept_run(is_identifier_continue);
        self.emit(TokenKind::Identifier);

        if self.skip_whitespace() == Some(':') {
            self.next_char();
            self.emit(TokenKind::Keyword(Keyword::TypeSeparator));
            return Some(State::LetType);
        }

        Some(State::LetAssignment)
    }

    fn lex_let_type(&mut self) -> Option<State> {
        match self.skip_whitespace() {
            Some(c) if is_identifier_start(c) => {}
            other => return self.fail(unexpected(other, "a type")),
        }

        self.accept_run(is_identifier_continue);
        let type_ = match TypeLiteral::lookup(&self.lexed) {
            Ok(type_) => type_,
            Err(error) => return self.fail(error),
        };
        self.emit(TokenKind::Type(type_));

        if type_ == TypeLiteral::Tuple {
            Some(State::LetTypeTuple)
        } else if self.paren_depth > 0 {
            Some(State::LetInsideTuple)
        } else {
            Some(State::LetAssignment)
        }
    }

    fn lex_let_type_tuple(&mut self) -> Option<State> {
        match self.skip_whitespace() {
            Some('(') => {
                self.next_char();
                self.paren_depth += 1;
                self.emit(TokenKind::OpenParen);
                Some(State::LetType)
            }
            other => self.fail(unexpected(other, "the element types of a tuple")),
        }
    }

    fn lex_let_inside_tuple(&mut self) -> Option<State> {
        match self.skip_whitespace() {
            Some(')') => {
                self.next_char();
                self.paren_depth -= 1;
                self.emit(TokenKind::CloseParen);
                if self.paren_depth > 0 {
                    Some(State::LetInsideTuple)
                } else {
                    Some(State::LetAssignment)
                }
            }
            Some(',') => {
                self.next_char();
                self.emit(TokenKind::Keyword(Keyword::Comma));
                Some(State::LetType)
            }
            other => self.fail(unexpected(other, "a tuple type")),
        }
    }

    fn lex_let_assignment(&mut self) -> Option<State> {
        match self.skip_whitespace() {
            Some('=') => {
                self.next_char();
                self.emit(TokenKind::Keyword(Keyword::Assign));
                Some(State::Expression)
            }
            other => self.fail(unexpected(other, "a `let` declaration")),
        }
    }

    fn lex_expression(&mut self) -> Option<State> {
        match self.skip_whitespace()? {
            '(' => {
                self.next_char();
                self.emit(TokenKind::OpenParen);
                self.paren_depth += 1;
                Some(State::Expression)
            }
            ')' => {
                self.next_char();
                Some(State::RightParen)
            }
            c if is_identifier_start(c) => Some(State::Identifier),
            c if is_digit(c) => Some(State::Number),
            '"' => self.lex_quoted('"', is_string_body, TokenKind::String),
            '\'' => self.lex_quoted('\'', is_char_body, TokenKind::Char),
            c if Operator::is_prefix(&c.to_string(), Arity::Unary) => Some(State::UnaryOperator),
            c => self.fail(unexpected(Some(c), "an expression")),
        }
    }

    /// Lexes a literal enclosed in `quote`, keeping the quotes in its text.
    fn lex_quoted(&mut self, quote: char, body: fn(char) -> bool, kind: TokenKind) -> Option<State> {
        self.next_char();

        if self.accept_run(body) == Some(quote) {
            self.next_char();
            self.emit(kind);
            return Some(State::PostValue);
        }

        let literal = self.lexed.clone();
        self.fail(ErrorImpl::UnterminatedLiteral { literal })
    }

    fn lex_identifier(&mut self) -> Option<State> {
        self.accept_run(is_identifier_continue);

        if self.skip_whitespace() == Some('(') {
            self.emit(TokenKind::Function);
            self.next_char();
            self.emit(TokenKind::OpenParen);
            // Arguments get a bracket scope of their own.
            self.func_depth.push(self.paren_depth);
            self.paren_depth = 0;
            return Some(State::Expression);
        }

        self.emit(TokenKind::Identifier);
        Some(State::PostValue)
    }

    fn lex_number(&mut self) -> Option<State> {
        if self.accept_run(is_number_body) == Some('.') {
            self.next_char();
            return Some(State::Float);
        }

        self.emit(TokenKind::Integer);
        Some(State::PostValue)
    }

    fn lex_float(&mut self) -> Option<State> {
        let fraction = self.lexed.len();

        if self.accept_run(is_number_body) == Some('e') && self.lexed.len() > fraction {
            self.next_char();
            let exponent = self.lexed.len();
            self.accept_run(is_number_body);

            if self.lexed.len() > exponent {
                self.emit(TokenKind::Float);
                return Some(State::PostValue);
            }
        }

        let literal = self.lexed.clone();
        self.fail(ErrorImpl::MalformedFloat { literal })
    }

    fn lex_post_value(&mut self) -> Option<State> {
        match self.skip_whitespace()? {
            ')' => {
                self.next_char();
                Some(State::RightParen)
            }
            ',' => {
                self.next_char();
                Some(State::Comma)
            }
            ';' => {
                self.next_char();
                Some(State::Semicolon)
            }
            _ => Some(State::BinaryOperator),
        }
    }

    fn lex_binary_operator(&mut self) -> Option<State> {
        self.lex_operator(Arity::Binary)
    }

    fn lex_unary_operator(&mut self) -> Option<State> {
        self.lex_operator(Arity::Unary)
    }

    /// Consumes the longest run of operator runes that still spells the
    /// start of some operator of `arity`, then resolves it.
    fn lex_operator(&mut self, arity: Arity) -> Option<State> {
        match self.peek() {
            Some(c) if is_operator_body(c) => {}
            other => return self.fail(unexpected(other, "an operator position")),
        }

        while let Some(c) = self.next_char() {
            if !is_operator_body(c) || !Operator::is_prefix(&self.lexed, arity) {
                self.back_up();
                break;
            }
        }

        match Operator::lookup(&self.lexed, arity) {
            Ok(operator) => {
                self.emit(TokenKind::Operator(operator));
                Some(State::Expression)
            }
            Err(error) => self.fail(error),
        }
    }

    fn lex_right_paren(&mut self) -> Option<State> {
        if self.paren_depth > 0 {
            self.paren_depth -= 1;
        } else if let Some(depth) = self.func_depth.pop() {
            self.paren_depth = depth;
        } else {
            return self.fail(ErrorImpl::ExtraneousParenthesis);
        }

        self.emit(TokenKind::CloseParen);
        Some(State::PostValue)
    }

    fn lex_comma(&mut self) -> Option<State> {
        if self.paren_depth == 0 && self.func_depth.is_empty() {
            return self.fail(ErrorImpl::MisplacedComma);
        }

        self.emit(TokenKind::Keyword(Keyword::Comma));
        Some(State::Expression)
    }

    fn lex_semicolon(&mut self) -> Option<State> {
        if self.paren_depth > 0 || !self.func_depth.is_empty() {
            return self.fail(ErrorImpl::UnbalancedStatement);
        }

        self.emit(TokenKind::Keyword(Keyword::Semicolon));
        Some(State::Start)
    }
}
