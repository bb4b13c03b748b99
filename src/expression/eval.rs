//! Expression evaluation against one span's attributes.

use crate::expression::expr::Expression;
use crate::expression::operator::{BinaryOperator, UnaryOperator};
use crate::span::Span;
use crate::value::Value;
use std::cmp::Ordering;

/// Evaluator for one span.
///
/// Evaluation is pure: it never mutates the span or the tree, and
/// re-running it yields identical results.
pub struct SpanMatcher<'a> {
    span: &'a Span,
}

impl<'a> SpanMatcher<'a> {
    pub fn new(span: &'a Span) -> Self {
        Self { span }
    }

    /// Whether the span satisfies the expression: evaluation produced
    /// boolean `true`. Absent data and non-boolean results exclude the
    /// span rather than erroring.
    pub fn matches(&self, expr: &Expression) -> bool {
        matches!(self.evaluate(expr), Some(Value::Bool(true)))
    }

    /// Evaluate an expression to a value. `None` is the distinguished
    /// absent result, produced by references to attributes the span does
    /// not carry.
    pub fn evaluate(&self, expr: &Expression) -> Option<Value> {
        match expr {
            Expression::Literal(value) => Some(value.clone()),

            Expression::Attribute(attr) => self.span.attribute(attr).cloned(),

            Expression::Unary { op, operand } => match op {
                // Negating absent or non-boolean data must not turn a
                // missing attribute into a match; the result stays absent.
                UnaryOperator::Not => match self.evaluate(operand) {
                    Some(Value::Bool(b)) => Some(Value::Bool(!b)),
                    _ => None,
                },
            },

            Expression::Binary { op, left, right } => self.evaluate_binary(*op, left, right),
        }
    }

    fn evaluate_binary(
        &self,
        op: BinaryOperator,
        left: &Expression,
        right: &Expression,
    ) -> Option<Value> {
        match op {
            // Two-valued logic over sub-results; short-circuiting is legal
            // because sub-evaluation is pure.
            BinaryOperator::And => Some(Value::Bool(self.matches(left) && self.matches(right))),
            BinaryOperator::Or => Some(Value::Bool(self.matches(left) || self.matches(right))),

            BinaryOperator::Eq => self.compare_operands(left, right, |l, r| l.equals(r)),
            BinaryOperator::Ne => self.compare_operands(left, right, |l, r| !l.equals(r)),
            BinaryOperator::Lt => self.compare_operands(left, right, |l, r| {
                matches!(l.compare(r), Some(Ordering::Less))
            }),
            BinaryOperator::Le => self.compare_operands(left, right, |l, r| {
                matches!(l.compare(r), Some(Ordering::Less | Ordering::Equal))
            }),
            BinaryOperator::Gt => self.compare_operands(left, right, |l, r| {
                matches!(l.compare(r), Some(Ordering::Greater))
            }),
            BinaryOperator::Ge => self.compare_operands(left, right, |l, r| {
                matches!(l.compare(r), Some(Ordering::Greater | Ordering::Equal))
            }),
        }
    }

    /// Evaluate both operands and apply a comparison. A comparison with an
    /// absent operand is false, excluding the span.
    fn compare_operands<F>(&self, left: &Expression, right: &Expression, cmp: F) -> Option<Value>
    where
        F: FnOnce(&Value, &Value) -> bool,
    {
        let result = match (self.evaluate(left), self.evaluate(right)) {
            (Some(lhs), Some(rhs)) => cmp(&lhs, &rhs),
            _ => false,
        };
        Some(Value::Bool(result))
    }
}

/// Helper function to check one span against an expression
pub fn span_matches(expr: &Expression, span: &Span) -> bool {
    SpanMatcher::new(span).matches(expr)
}
