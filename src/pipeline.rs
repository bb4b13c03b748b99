//! Query pipeline stages over spansets.
//!
//! A query is an ordered pipeline of stages, each consuming and producing
//! a sequence of spansets. The grammar enumerates a known, finite set of
//! stage kinds, so dispatch is a closed match rather than dynamic.

use crate::expression::{span_matches, Expression, ExpressionResult};
use crate::span::{Span, Spanset};
use anyhow::Result;
use log::debug;

/// Stage that keeps the spans satisfying a boolean expression and prunes
/// spansets left with nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SpansetFilter {
    expression: Expression,
}

impl SpansetFilter {
    /// Build a filter stage. Expressions that cannot be a boolean
    /// predicate are construction errors; anything accepted here
    /// evaluates totally.
    pub fn new(expression: Expression) -> ExpressionResult<Self> {
        crate::expression::check_filter_predicate(&expression)?;
        Ok(Self { expression })
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Apply the filter to every spanset in order.
    ///
    /// Within a spanset, spans that match are kept in their original
    /// relative order. A spanset left with no spans (including one that
    /// arrived empty) contributes no output element. For a well-typed
    /// expression this never fails: absent attributes and incomparable
    /// operands exclude spans instead of erroring.
    pub fn evaluate(&self, spansets: Vec<Spanset>) -> Result<Vec<Spanset>> {
        let input_len = spansets.len();
        let mut output = Vec::with_capacity(input_len);

        for spanset in spansets {
            let retained: Vec<Span> = spanset
                .spans
                .into_iter()
                .filter(|span| span_matches(&self.expression, span))
                .collect();

            if retained.is_empty() {
                continue;
            }
            output.push(Spanset::new(retained));
        }

        debug!(
            "filter {} kept {} of {} spansets",
            self.expression,
            output.len(),
            input_len
        );
        Ok(output)
    }
}

/// One step of a query pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Filter(SpansetFilter),
}

impl Stage {
    pub fn evaluate(&self, spansets: Vec<Spanset>) -> Result<Vec<Spanset>> {
        match self {
            Stage::Filter(filter) => filter.evaluate(spansets),
        }
    }
}

/// Ordered sequence of stages. Spansets flow through the stages in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn evaluate(&self, mut spansets: Vec<Spanset>) -> Result<Vec<Spanset>> {
        for stage in &self.stages {
            spansets = stage.evaluate(spansets)?;
        }
        Ok(spansets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn int_span(id: u8, foo: i64) -> Span {
        Span::new([id]).with_attribute("foo", Value::Int(foo))
    }

    fn string_span(id: u8, foo: &str) -> Span {
        Span::new([id]).with_attribute("foo", Value::string(foo))
    }

    #[test]
    fn test_true_drops_empty_spansets() -> Result<()> {
        let filter = SpansetFilter::new(Expression::literal(Value::Bool(true)))?;

        let input = vec![
            Spanset::new(vec![]),
            Spanset::new(vec![Span::default()]),
        ];
        let output = filter.evaluate(input)?;

        assert_eq!(output, vec![Spanset::new(vec![Span::default()])]);
        Ok(())
    }

    #[test]
    fn test_partial_and_whole_spanset_drops() -> Result<()> {
        let filter = SpansetFilter::new(Expression::eq(
            Expression::attribute("foo"),
            Expression::literal(Value::string("a")),
        ))?;

        let input = vec![
            // Second span is dropped here.
            Spanset::new(vec![string_span(1, "a"), string_span(2, "b")]),
            // This entire spanset is dropped.
            Spanset::new(vec![string_span(3, "b")]),
        ];
        let output = filter.evaluate(input)?;

        assert_eq!(output, vec![Spanset::new(vec![string_span(1, "a")])]);
        Ok(())
    }

    #[test]
    fn test_boundary_conditions() -> Result<()> {
        // { .foo = 1 || (.foo >= 4 && .foo < 6) }
        let filter = SpansetFilter::new(Expression::or(
            Expression::eq(
                Expression::attribute("foo"),
                Expression::literal(Value::Int(1)),
            ),
            Expression::and(
                Expression::ge(
                    Expression::attribute("foo"),
                    Expression::literal(Value::Int(4)),
                ),
                Expression::lt(
                    Expression::attribute("foo"),
                    Expression::literal(Value::Int(6)),
                ),
            ),
        ))?;

        let input = vec![
            Spanset::new(vec![int_span(1, 1), int_span(2, 2)]),
            Spanset::new(vec![int_span(3, 3), int_span(4, 4), int_span(5, 5)]),
            // 6 is excluded by the strict upper bound; the whole spanset goes.
            Spanset::new(vec![int_span(6, 6), int_span(7, 7)]),
        ];
        let output = filter.evaluate(input)?;

        assert_eq!(
            output,
            vec![
                Spanset::new(vec![int_span(1, 1)]),
                Spanset::new(vec![int_span(4, 4), int_span(5, 5)]),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_filtering_is_idempotent() -> Result<()> {
        let filter = SpansetFilter::new(Expression::gt(
            Expression::attribute("foo"),
            Expression::literal(Value::Int(2)),
        ))?;

        let input = vec![
            Spanset::new(vec![int_span(1, 1), int_span(2, 3), int_span(3, 5)]),
            Spanset::new(vec![int_span(4, 2)]),
        ];
        let once = filter.evaluate(input)?;
        let twice = filter.evaluate(once.clone())?;

        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn test_order_preservation() -> Result<()> {
        let filter = SpansetFilter::new(Expression::ne(
            Expression::attribute("foo"),
            Expression::literal(Value::Int(0)),
        ))?;

        let input = vec![
            Spanset::new(vec![int_span(9, 1), int_span(3, 0), int_span(7, 2)]),
            Spanset::new(vec![int_span(5, 0)]),
            Spanset::new(vec![int_span(2, 3), int_span(8, 4)]),
        ];
        let output = filter.evaluate(input)?;

        assert_eq!(
            output,
            vec![
                Spanset::new(vec![int_span(9, 1), int_span(7, 2)]),
                Spanset::new(vec![int_span(2, 3), int_span(8, 4)]),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_matching_nothing_is_not_an_error() -> Result<()> {
        let filter = SpansetFilter::new(Expression::literal(Value::Bool(false)))?;
        let input = vec![Spanset::new(vec![int_span(1, 1)])];
        assert_eq!(filter.evaluate(input)?, vec![]);
        Ok(())
    }

    #[test]
    fn test_non_boolean_expression_is_a_construction_error() {
        assert!(SpansetFilter::new(Expression::literal(Value::Int(1))).is_err());
        assert!(SpansetFilter::new(Expression::lt(
            Expression::literal(Value::duration_secs(1)),
            Expression::literal(Value::Int(1)),
        ))
        .is_err());
    }

    #[test]
    fn test_pipeline_folds_stages() -> Result<()> {
        let keep_positive = Stage::Filter(SpansetFilter::new(Expression::gt(
            Expression::attribute("foo"),
            Expression::literal(Value::Int(0)),
        ))?);
        let keep_small = Stage::Filter(SpansetFilter::new(Expression::lt(
            Expression::attribute("foo"),
            Expression::literal(Value::Int(10)),
        ))?);
        let pipeline = Pipeline::new(vec![keep_positive, keep_small]);

        let input = vec![Spanset::new(vec![
            int_span(1, -1),
            int_span(2, 5),
            int_span(3, 12),
        ])];
        let output = pipeline.evaluate(input)?;

        assert_eq!(output, vec![Spanset::new(vec![int_span(2, 5)])]);
        Ok(())
    }
}
