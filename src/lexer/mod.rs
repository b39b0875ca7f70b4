//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts a stream of
//! runes into a stream of tokens for parsing. It handles:
//!
//! - A state machine whose states are named by grammatical context
//! - Recognition of keywords, types, identifiers, literals and operators
//! - Parenthesis depth tracking, with a separate scope per call
//! - Token position tracking for error reporting

pub mod lexer;
pub mod states;
pub mod tokens;
