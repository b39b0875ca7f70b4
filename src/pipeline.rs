//! Threaded lexing and parsing.
//!
//! The rune producer, the lexer and the parser each run on their own
//! thread and hand values over zero-capacity channels, so every stage
//! blocks until the next one takes what it produced. Ending the input
//! closes each channel in turn; dropping a receiver stops the stage
//! feeding it.

use std::{
    sync::mpsc::{sync_channel, Receiver},
    thread::{self, JoinHandle},
};

use crate::{
    ast::ast::SyntaxTree,
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::Lexer, tokens::Token},
    parser::parser::parse,
    Position,
};

/// Feeds the runes of `source` one at a time.
pub fn spawn_source(source: String) -> (Receiver<char>, JoinHandle<()>) {
    let (sender, receiver) = sync_channel(0);

    let handle = thread::spawn(move || {
        for c in source.chars() {
            if sender.send(c).is_err() {
                break;
            }
        }
    });

    (receiver, handle)
}

/// Lexes runes from `input` on a new thread.
///
/// The returned handle yields the error behind the lexer's error token,
/// if it emitted one.
pub fn spawn_lexer(
    input: Receiver<char>,
    file: Option<String>,
) -> (Receiver<Token>, JoinHandle<Option<Error>>) {
    let (sender, receiver) = sync_channel(0);

    let handle = thread::spawn(move || {
        let mut lexer = Lexer::new(input, file);

        for token in lexer.by_ref() {
            if sender.send(token).is_err() {
                break;
            }
        }

        lexer.error().cloned()
    });

    (receiver, handle)
}

/// Parses `source` with the producer, lexer and parser on separate threads.
pub fn parse_source(source: &str, file: Option<String>) -> Result<Vec<SyntaxTree>, Error> {
    let (runes, producer) = spawn_source(source.to_string());
    let (tokens, lexer) = spawn_lexer(runes, file);

    let (_, result) = parse(tokens);

    if producer.join().is_err() {
        return Err(failure("source"));
    }
    let lexed = match lexer.join() {
        Ok(lexed) => lexed,
        Err(_) => return Err(failure("lexer")),
    };

    // The parser only sees the error token's message; the lexer kept the
    // structured error behind it.
    match (result, lexed) {
        (Err(error), Some(lexical))
            if matches!(error.get_error_impl(), ErrorImpl::LexicalError { .. }) =>
        {
            Err(lexical)
        }
        (result, _) => result,
    }
}

fn failure(stage: &str) -> Error {
    Error::new(
        ErrorImpl::PipelineFailure {
            stage: stage.to_string(),
        },
        Position::null(),
    )
}
