// Query parser - builds a pipeline of stages from query text

use crate::expression::{BinaryOperator, Expression};
use crate::pipeline::{Pipeline, SpansetFilter, Stage};
use crate::query::error::{ParseError, ParseResult};
use crate::query::lexer::Lexer;
use crate::query::token::Token;
use crate::value::{Status, Value};

/// A parsed query: an ordered pipeline of stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub pipeline: Pipeline,
}

/// Parse query text into a [`Query`].
///
/// Every filter expression is statically checked before the query is
/// returned: a malformed or type-incompatible query aborts whole here and
/// is never partially applied.
pub fn parse(input: &str) -> ParseResult<Query> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::new(tokens).parse()
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn parse(&mut self) -> ParseResult<Query> {
        let mut stages = Vec::new();
        while self.match_token(&Token::LeftBrace) {
            stages.push(self.parse_filter_stage()?);
        }

        if stages.is_empty() {
            if self.match_token(&Token::Eof) {
                return Err(ParseError::EmptyQuery);
            }
            return Err(self.unexpected("'{'"));
        }

        self.expect_token(Token::Eof)?;
        Ok(Query {
            pipeline: Pipeline::new(stages),
        })
    }

    /// Parse one `{ <boolean-expr> }` filter stage
    fn parse_filter_stage(&mut self) -> ParseResult<Stage> {
        self.expect_token(Token::LeftBrace)?;
        let expression = self.parse_expression()?;
        self.expect_token(Token::RightBrace)?;

        let filter = SpansetFilter::new(expression)?;
        Ok(Stage::Filter(filter))
    }

    /// Parse expression
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_or()
    }

    /// Parse `||` expression
    fn parse_or(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_and()?;

        while self.match_token(&Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expression::or(left, right);
        }

        Ok(left)
    }

    /// Parse `&&` expression
    fn parse_and(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_comparison()?;

        while self.match_token(&Token::And) {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expression::and(left, right);
        }

        Ok(left)
    }

    /// Parse comparison expression. Comparisons do not chain.
    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        let left = self.parse_unary()?;

        let op = match self.current_token() {
            Token::Equal => Some(BinaryOperator::Eq),
            Token::NotEqual => Some(BinaryOperator::Ne),
            Token::Less => Some(BinaryOperator::Lt),
            Token::LessEqual => Some(BinaryOperator::Le),
            Token::Greater => Some(BinaryOperator::Gt),
            Token::GreaterEqual => Some(BinaryOperator::Ge),
            _ => None,
        };

        match op {
            Some(op) => {
                self.advance();
                let right = self.parse_unary()?;
                Ok(Expression::binary(op, left, right))
            }
            None => Ok(left),
        }
    }

    /// Parse `!` expression
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if self.match_token(&Token::Not) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::not(operand));
        }
        self.parse_primary()
    }

    /// Parse a literal, attribute reference, or parenthesized expression
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let expr = match self.current_token().clone() {
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(Token::RightParen)?;
                return Ok(expr);
            }
            Token::Integer(i) => Expression::literal(Value::Int(i)),
            Token::Float(x) => Expression::literal(Value::Float(x)),
            Token::Duration(ns) => Expression::literal(Value::Duration(ns)),
            Token::String(s) => Expression::literal(Value::String(s)),
            Token::True => Expression::literal(Value::Bool(true)),
            Token::False => Expression::literal(Value::Bool(false)),
            Token::StatusOk => Expression::literal(Value::Status(Status::Ok)),
            Token::StatusError => Expression::literal(Value::Status(Status::Error)),
            Token::StatusUnset => Expression::literal(Value::Status(Status::Unset)),
            Token::Attribute(name) => Expression::attribute(name),
            _ => return Err(self.unexpected("a literal, attribute, or '('")),
        };

        self.advance();
        Ok(expr)
    }

    /// Get the current token without advancing
    fn current_token(&self) -> &Token {
        static EOF: Token = Token::Eof;
        self.tokens.get(self.position).unwrap_or(&EOF)
    }

    /// Advance to the next token
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Check the current token without advancing
    fn match_token(&self, token: &Token) -> bool {
        self.current_token() == token
    }

    /// Consume the expected token or fail
    fn expect_token(&mut self, expected: Token) -> ParseResult<()> {
        if *self.current_token() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", expected)))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current_token().to_string(),
        }
    }
}
