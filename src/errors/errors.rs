use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedRune { .. } => "UnexpectedRune",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::MalformedFloat { .. } => "MalformedFloat",
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::ExtraneousParenthesis => "ExtraneousParenthesis",
            ErrorImpl::MisplacedComma => "MisplacedComma",
            ErrorImpl::UnbalancedStatement => "UnbalancedStatement",
            ErrorImpl::NotAnOperator { .. } => "NotAnOperator",
            ErrorImpl::NotAKeyword { .. } => "NotAKeyword",
            ErrorImpl::NotAType { .. } => "NotAType",
            ErrorImpl::LexicalError { .. } => "LexicalError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MismatchedParenthesis => "MismatchedParenthesis",
            ErrorImpl::MissingOperand { .. } => "MissingOperand",
            ErrorImpl::PipelineFailure { .. } => "PipelineFailure",
        }
    }

    pub fn get_category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnexpectedRune { .. }
            | ErrorImpl::UnexpectedEndOfInput { .. }
            | ErrorImpl::MalformedFloat { .. }
            | ErrorImpl::UnterminatedLiteral { .. }
            | ErrorImpl::ExtraneousParenthesis
            | ErrorImpl::MisplacedComma
            | ErrorImpl::UnbalancedStatement
            | ErrorImpl::LexicalError { .. } => ErrorCategory::Lexical,
            ErrorImpl::NotAnOperator { .. }
            | ErrorImpl::NotAKeyword { .. }
            | ErrorImpl::NotAType { .. } => ErrorCategory::UnknownVocabulary,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::MismatchedParenthesis
            | ErrorImpl::MissingOperand { .. } => ErrorCategory::Syntax,
            ErrorImpl::PipelineFailure { .. } => ErrorCategory::Pipeline,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedRune { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedEndOfInput { expected } => {
                ErrorTip::Suggestion(format!("Input ended while expecting {}", expected))
            }
            ErrorImpl::MalformedFloat { literal } => ErrorTip::Suggestion(format!(
                "Invalid float: `{}`, floats are written as `1.5e3`",
                literal
            )),
            ErrorImpl::UnterminatedLiteral { literal } => ErrorTip::Suggestion(format!(
                "Literal `{}` is missing its closing quote",
                literal
            )),
            ErrorImpl::ExtraneousParenthesis => {
                ErrorTip::Suggestion(String::from("No open parenthesis to close"))
            }
            ErrorImpl::MisplacedComma => ErrorTip::Suggestion(String::from(
                "Commas separate arguments or tuple elements inside parentheses",
            )),
            ErrorImpl::UnbalancedStatement => ErrorTip::Suggestion(String::from(
                "Close every parenthesis before ending the statement",
            )),
            ErrorImpl::NotAnOperator { operator, .. } => {
                ErrorTip::Suggestion(format!("Unknown operator `{}`", operator))
            }
            ErrorImpl::NotAKeyword { keyword } => {
                ErrorTip::Suggestion(format!("Unknown keyword `{}`", keyword))
            }
            ErrorImpl::NotAType { type_ } => ErrorTip::Suggestion(format!(
                "Unknown type `{}`, expected one of i32, f32, bool, string, rune or tuple",
                type_
            )),
            ErrorImpl::LexicalError { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::MismatchedParenthesis => ErrorTip::Suggestion(String::from(
                "Every `(` needs a matching `)`",
            )),
            ErrorImpl::MissingOperand { operator } => {
                ErrorTip::Suggestion(format!("Operator `{}` is missing an operand", operator))
            }
            ErrorImpl::PipelineFailure { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Coarse grouping of errors by the stage that raises them.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorCategory {
    Lexical,
    UnknownVocabulary,
    Syntax,
    Pipeline,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unexpected rune {rune:?} in {context}")]
    UnexpectedRune { rune: char, context: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
    #[error("not a proper float {literal:?}")]
    MalformedFloat { literal: String },
    #[error("unterminated literal {literal:?}")]
    UnterminatedLiteral { literal: String },
    #[error("extraneous right parenthesis")]
    ExtraneousParenthesis,
    #[error("comma outside of a parenthesized list")]
    MisplacedComma,
    #[error("unbalanced parenthesis before statement end")]
    UnbalancedStatement,
    #[error("{operator:?} is not a {arity} operator")]
    NotAnOperator { operator: String, arity: String },
    #[error("{keyword:?} is not a keyword")]
    NotAKeyword { keyword: String },
    #[error("{type_:?} is not a type")]
    NotAType { type_: String },
    #[error("{message}")]
    LexicalError { message: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("mismatched parenthesis")]
    MismatchedParenthesis,
    #[error("operator {operator:?} is missing an operand")]
    MissingOperand { operator: String },
    #[error("{stage} stage stopped unexpectedly")]
    PipelineFailure { stage: String },
}
