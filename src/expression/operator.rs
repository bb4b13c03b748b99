//! Operator definitions for filter expressions.

use crate::value::ValueKind;

/// Binary operators supported in filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Logical
    And,
    Or,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOperator {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Eq
                | BinaryOperator::Ne
                | BinaryOperator::Lt
                | BinaryOperator::Le
                | BinaryOperator::Gt
                | BinaryOperator::Ge
        )
    }

    /// Get the output kind of this operator given statically-known input
    /// kinds. `None` means the pairing is invalid.
    pub fn output_kind(self, left: ValueKind, right: ValueKind) -> Option<ValueKind> {
        match self {
            BinaryOperator::And | BinaryOperator::Or => match (left, right) {
                (ValueKind::Bool, ValueKind::Bool) => Some(ValueKind::Bool),
                _ => None,
            },

            BinaryOperator::Eq | BinaryOperator::Ne => {
                if kinds_equatable(left, right) {
                    Some(ValueKind::Bool)
                } else {
                    None
                }
            }

            // Ordered comparisons additionally require an ordered kind.
            BinaryOperator::Lt | BinaryOperator::Le | BinaryOperator::Gt | BinaryOperator::Ge => {
                if left == right && left.is_ordered() {
                    Some(ValueKind::Bool)
                } else {
                    None
                }
            }
        }
    }

    /// Get the display string for this operator
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Eq => "=",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
        }
    }
}

/// Check if two kinds can meet in an equality comparison. Same tag is
/// always allowed; status/int is the single cross-tag pairing.
fn kinds_equatable(left: ValueKind, right: ValueKind) -> bool {
    left == right
        || matches!(
            (left, right),
            (ValueKind::Status, ValueKind::Int) | (ValueKind::Int, ValueKind::Status)
        )
}

/// Unary operators supported in filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
}

impl UnaryOperator {
    /// Get the output kind of this operator given a statically-known input
    /// kind. `None` means the pairing is invalid.
    pub fn output_kind(self, operand: ValueKind) -> Option<ValueKind> {
        match self {
            UnaryOperator::Not => match operand {
                ValueKind::Bool => Some(ValueKind::Bool),
                _ => None,
            },
        }
    }

    /// Get the display string for this operator
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
        }
    }
}
