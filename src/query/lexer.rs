// Query lexer - tokenizes filter query text

use crate::query::error::{ParseError, ParseResult};
use crate::query::token::Token;

const NANOS_PER_UNIT: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("us", 1e3),
    ("ms", 1e6),
    ("s", 1e9),
    ("m", 60e9),
    ("h", 3600e9),
];

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let current_char = input.first().copied();
        Lexer {
            input,
            position: 0,
            current_char,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();

        let ch = match self.current_char {
            Some(ch) => ch,
            None => return Ok(Token::Eof),
        };

        match ch {
            '{' => {
                self.advance();
                Ok(Token::LeftBrace)
            }
            '}' => {
                self.advance();
                Ok(Token::RightBrace)
            }
            '(' => {
                self.advance();
                Ok(Token::LeftParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RightParen)
            }
            '=' => {
                self.advance();
                Ok(Token::Equal)
            }
            '!' => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Ok(Token::NotEqual)
                } else {
                    Ok(Token::Not)
                }
            }
            '<' => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Ok(Token::LessEqual)
                } else {
                    Ok(Token::Less)
                }
            }
            '>' => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Ok(Token::GreaterEqual)
                } else {
                    Ok(Token::Greater)
                }
            }
            '&' => {
                let position = self.position;
                self.advance();
                if self.current_char == Some('&') {
                    self.advance();
                    Ok(Token::And)
                } else {
                    Err(ParseError::UnexpectedCharacter { ch: '&', position })
                }
            }
            '|' => {
                let position = self.position;
                self.advance();
                if self.current_char == Some('|') {
                    self.advance();
                    Ok(Token::Or)
                } else {
                    Err(ParseError::UnexpectedCharacter { ch: '|', position })
                }
            }
            '.' => {
                self.advance();
                self.read_attribute()
            }
            '"' => self.read_string('"'),
            '`' => self.read_string('`'),
            '-' => self.read_number(),
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_alphabetic() || c == '_' => Ok(self.read_identifier()),
            c => {
                let position = self.position;
                self.advance();
                Err(ParseError::UnexpectedCharacter { ch: c, position })
            }
        }
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::keyword_from_str(&identifier).unwrap_or(Token::Identifier(identifier))
    }

    /// Read an attribute name following `.`. Names may contain dots, so
    /// `.http.status` is one attribute.
    fn read_attribute(&mut self) -> ParseResult<Token> {
        let mut name = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                name.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if name.is_empty() {
            return Err(ParseError::UnexpectedCharacter {
                ch: '.',
                position: self.position.saturating_sub(1),
            });
        }
        Ok(Token::Attribute(name))
    }

    /// Read a string literal delimited by `"` or backticks
    fn read_string(&mut self, quote: char) -> ParseResult<Token> {
        let start = self.position;
        self.advance(); // skip opening quote
        let mut string = String::new();

        loop {
            match self.current_char {
                Some(ch) if ch == quote => {
                    self.advance(); // skip closing quote
                    return Ok(Token::String(string));
                }
                Some(ch) => {
                    string.push(ch);
                    self.advance();
                }
                None => return Err(ParseError::UnterminatedString { position: start }),
            }
        }
    }

    /// Read a number: integer, float, or duration when a unit suffix
    /// follows the digits directly (e.g. `100ms`, `1.5s`).
    fn read_number(&mut self) -> ParseResult<Token> {
        let mut number = String::new();
        let mut has_dot = false;

        if self.current_char == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if !number.chars().any(|c| c.is_ascii_digit()) {
            return Err(ParseError::InvalidNumber { text: number });
        }

        // A unit suffix turns the number into a duration literal.
        let mut unit = String::new();
        while let Some(ch) = self.current_char {
            if ch.is_alphabetic() {
                unit.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if !unit.is_empty() {
            return self.duration_token(&number, &unit);
        }

        if has_dot {
            let value: f64 = number
                .parse()
                .map_err(|_| ParseError::InvalidNumber { text: number })?;
            Ok(Token::Float(value))
        } else {
            let value: i64 = number
                .parse()
                .map_err(|_| ParseError::InvalidNumber { text: number })?;
            Ok(Token::Integer(value))
        }
    }

    fn duration_token(&self, number: &str, unit: &str) -> ParseResult<Token> {
        let scale = NANOS_PER_UNIT
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| ParseError::UnknownDurationUnit {
                unit: unit.to_string(),
                text: format!("{}{}", number, unit),
            })?;

        let value: f64 = number.parse().map_err(|_| ParseError::InvalidNumber {
            text: number.to_string(),
        })?;
        Ok(Token::Duration((value * scale).round() as i64))
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }
}
