//! Error types for expression construction and evaluation.

use crate::value::ValueKind;
use thiserror::Error;

/// Errors raised when an expression is built or checked.
///
/// A well-typed expression never produces one of these during evaluation:
/// absent attributes and incomparable operand pairs degrade to a
/// non-match instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("operator {operator} cannot be applied to {left} and {right}")]
    InvalidOperandKinds {
        operator: &'static str,
        left: ValueKind,
        right: ValueKind,
    },

    #[error("operator {operator} cannot be applied to {operand}")]
    InvalidUnaryOperandKind {
        operator: &'static str,
        operand: ValueKind,
    },

    #[error("filter expression must be boolean, got {actual}")]
    NonBooleanPredicate { actual: ValueKind },
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;
