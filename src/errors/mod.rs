//! Error types and error handling for the tokenizer and parser.
//!
//! This module defines the error types used throughout lexing and
//! parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexical, vocabulary and syntax failures
//! - Error categories and helpful suggestions

pub mod errors;
