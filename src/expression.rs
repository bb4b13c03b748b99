//! Filter expressions over span attributes.
//!
//! This module provides:
//! - Expression AST representation
//! - Static checks run at query construction time
//! - Expression evaluation against one span's attributes

pub mod error;
pub mod eval;
pub mod expr;
pub mod operator;
pub mod type_checker;

pub use error::{ExpressionError, ExpressionResult};
pub use eval::{span_matches, SpanMatcher};
pub use expr::Expression;
pub use operator::{BinaryOperator, UnaryOperator};
pub use type_checker::{check_expression, check_filter_predicate};
