//! Parser module for building syntax trees.
//!
//! This module contains the shunting-yard parser that transforms a stream
//! of tokens into syntax trees. It handles:
//!
//! - Binary and unary operators, ranked by the token model's bindings
//! - Parenthesized grouping and the empty tuple `()`
//! - Function calls, whose argument list becomes the call's only child
//! - `let` declarations, one tree per `;`-terminated statement

pub mod parser;

#[cfg(test)]
mod tests;
