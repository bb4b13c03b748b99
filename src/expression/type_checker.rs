//! Static checks for expressions.
//!
//! Spans carry no schema, so attribute references have unknown kind until
//! runtime; the checker rejects only pairings that are wrong for every
//! possible attribute value. Anything it accepts evaluates totally:
//! mismatches that surface at runtime degrade to a non-match.

use crate::expression::error::{ExpressionError, ExpressionResult};
use crate::expression::expr::Expression;
use crate::value::ValueKind;

/// Infer the statically-known output kind of an expression. `None` means
/// the kind depends on span data.
pub fn check_expression(expr: &Expression) -> ExpressionResult<Option<ValueKind>> {
    match expr {
        Expression::Literal(value) => Ok(Some(value.kind())),

        Expression::Attribute(_) => Ok(None),

        Expression::Binary { op, left, right } => {
            let left_kind = check_expression(left)?;
            let right_kind = check_expression(right)?;

            match (left_kind, right_kind) {
                (Some(lk), Some(rk)) => match op.output_kind(lk, rk) {
                    Some(output) => Ok(Some(output)),
                    None => Err(ExpressionError::InvalidOperandKinds {
                        operator: op.as_str(),
                        left: lk,
                        right: rk,
                    }),
                },
                // An unknown operand resolves at runtime.
                _ => Ok(None),
            }
        }

        Expression::Unary { op, operand } => {
            let operand_kind = check_expression(operand)?;

            match operand_kind {
                Some(kind) => match op.output_kind(kind) {
                    Some(output) => Ok(Some(output)),
                    None => Err(ExpressionError::InvalidUnaryOperandKind {
                        operator: op.as_str(),
                        operand: kind,
                    }),
                },
                None => Ok(None),
            }
        }
    }
}

/// Check that an expression is usable as a filter predicate: its output
/// kind is boolean, or unknown until runtime.
pub fn check_filter_predicate(expr: &Expression) -> ExpressionResult<()> {
    match check_expression(expr)? {
        Some(ValueKind::Bool) | None => Ok(()),
        Some(other) => Err(ExpressionError::NonBooleanPredicate { actual: other }),
    }
}
