//! Query parsing error types.

use crate::expression::ExpressionError;
use thiserror::Error;

/// Errors raised while turning query text into a pipeline.
///
/// All of these are construction errors: they abort the whole query and
/// are never raised once a query has been built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("invalid number '{text}'")]
    InvalidNumber { text: String },

    #[error("unknown duration unit '{unit}' in '{text}'")]
    UnknownDurationUnit { unit: String, text: String },

    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },

    #[error("query has no pipeline stages")]
    EmptyQuery,

    #[error("invalid filter expression: {0}")]
    InvalidExpression(#[from] ExpressionError),
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
