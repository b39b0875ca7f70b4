use std::{collections::VecDeque, iter::Fuse, sync::Arc};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_SPAN, MK_TOKEN,
};

use super::{
    states::State,
    tokens::{Token, TokenKind, OPERATOR_CHARSET},
};

pub type RunePredicate = fn(char) -> bool;

pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

pub fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub fn is_digit(c: char) -> bool {
    c.is_numeric()
}

pub fn is_number_body(c: char) -> bool {
    c.is_numeric() || c == '_'
}

pub fn is_string_body(c: char) -> bool {
    !c.is_control() && c != '"'
}

pub fn is_char_body(c: char) -> bool {
    !c.is_control() && c != '\''
}

pub fn is_operator_body(c: char) -> bool {
    OPERATOR_CHARSET.contains(&c)
}

/// A state machine turning a stream of runes into tokens.
///
/// The lexer pulls runes from `input` only as fast as tokens are pulled
/// from it, so it never lexes ahead of its consumer by more than the
/// tokens a single state emits.
pub struct Lexer<I: Iterator<Item = char>> {
    input: Fuse<I>,
    /// Runes consumed for the token being built
    pub(super) lexed: String,
    /// Single rune of pushback
    back: Option<char>,
    pub(super) paren_depth: usize,
    /// Paren depths saved when entering a call's argument list
    pub(super) func_depth: Vec<usize>,
    state: Option<State>,
    emitted: VecDeque<Token>,
    error: Option<Error>,
    pos: u32,
    start: u32,
    end: u32,
    file: Arc<String>,
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn new<S>(input: S, file: Option<String>) -> Lexer<I>
    where
        S: IntoIterator<Item = char, IntoIter = I>,
    {
        let file_name = if let Some(file) = file {
            Arc::new(file)
        } else {
            Arc::new(String::from("shell"))
        };

        Lexer {
            input: input.into_iter().fuse(),
            lexed: String::new(),
            back: None,
            paren_depth: 0,
            func_depth: vec![],
            state: Some(State::Start),
            emitted: VecDeque::new(),
            error: None,
            pos: 0,
            start: 0,
            end: 0,
            file: file_name,
        }
    }

    /// The error behind the error token, once one has been emitted.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn position(&self) -> Position {
        Position(self.pos, Arc::clone(&self.file))
    }

    fn read(&mut self) -> Option<char> {
        let c = match self.back.take() {
            Some(c) => c,
            None => self.input.next()?,
        };
        self.pos += 1;
        Some(c)
    }

    /// Consumes the next rune into the current lexeme.
    pub(super) fn next_char(&mut self) -> Option<char> {
        let c = self.read()?;
        if self.lexed.is_empty() {
            self.start = self.pos - 1;
        }
        self.lexed.push(c);
        self.end = self.pos;
        Some(c)
    }

    /// Consumes the next rune without adding it to the lexeme.
    pub(super) fn ignore(&mut self) -> Option<char> {
        self.read()
    }

    /// Moves the last rune of the lexeme back onto the input.
    pub(super) fn back_up(&mut self) {
        if let Some(c) = self.lexed.pop() {
            self.unread(c);
            self.end = self.pos;
        }
    }

    pub(super) fn unread(&mut self, c: char) {
        debug_assert!(self.back.is_none(), "only one rune of pushback");
        self.back = Some(c);
        self.pos -= 1;
    }

    pub(super) fn peek(&mut self) -> Option<char> {
        let c = self.ignore()?;
        self.unread(c);
        Some(c)
    }

    /// Consumes runes while `predicate` holds and returns the first rune that
    /// does not match, left unread. Returns `None` at end of input.
    pub(super) fn accept_run(&mut self, predicate: RunePredicate) -> Option<char> {
        loop {
            let c = self.next_char()?;
            if !predicate(c) {
                self.back_up();
                return Some(c);
            }
        }
    }

    /// Skips whitespace and returns the next rune, left unread.
    pub(super) fn skip_whitespace(&mut self) -> Option<char> {
        loop {
            let c = self.ignore()?;
            if !is_whitespace(c) {
                self.unread(c);
                return Some(c);
            }
        }
    }

    /// Packages the lexeme as a token of `kind`.
    pub(super) fn emit(&mut self, kind: TokenKind) {
        let value = std::mem::take(&mut self.lexed);
        let span = MK_SPAN!(self.start, self.end, self.file);
        self.emitted.push_back(MK_TOKEN!(kind, value, span));
    }

    /// Emits an error token for `error`. Nothing is lexed afterwards.
    pub(super) fn fail(&mut self, error: ErrorImpl) -> Option<State> {
        // Point at the offending lexeme, or at the next rune if there is none.
        let offset = if self.lexed.is_empty() { self.pos } else { self.start };
        let position = Position(offset, Arc::clone(&self.file));
        let span = Span {
            start: position.clone(),
            end: position.clone(),
        };

        self.lexed.clear();
        self.emitted
            .push_back(MK_TOKEN!(TokenKind::Error, error.to_string(), span));
        self.error = Some(Error::new(error, position));
        None
    }
}

impl<I: Iterator<Item = char>> Iterator for Lexer<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.emitted.pop_front() {
                return Some(token);
            }

            let state = self.state.take()?;
            self.state = self.step(state);
        }
    }
}

/// Lexes a whole string, appending an `EOF` token.
///
/// Stops at the first lexical error and returns it.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source.chars(), file);
    let mut tokens = vec![];

    for token in lex.by_ref() {
        if token.kind == TokenKind::Error {
            break;
        }
        tokens.push(token);
    }

    if let Some(error) = lex.error() {
        return Err(error.clone());
    }

    let position = lex.position();
    tokens.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: position.clone(),
            end: position
        }
    ));
    Ok(tokens)
}
