use crate::op::Operator;
use regex::Regex;
use std::fmt;
use std::iter::Iterator;
use thiserror::Error;

/// A byte range `(start, end)` in the source text.
pub type Span = (usize, usize);

/// Matches every character that is neither a digit nor an operator.
pub const DEFAULT_IGNORED: &str = r"[^0-9+*/-]+";

const OPERAND_REGEX: &str = "[0-9]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A single-digit operand.
    Digit(char),
    Op(Operator),
    /// A character that is not ignored, but is not a digit or operator either.
    LexError(char),
}

/// One "word" in the stream returned by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
}

#[derive(Debug, Clone, Error)]
pub enum LexerError {
    #[error("{0}")]
    InvalidRegex(#[from] regex::Error),
}

#[derive(Debug, Clone)]
pub struct Lexer {
    ignored: Regex,
    operand: Regex,
    operators: Vec<(String, Operator)>,
}

#[derive(Debug, Clone)]
pub struct LexerBuilder {
    ignored: String,
    operators: Vec<(String, Operator)>,
}

#[derive(Debug)]
pub struct Lex<'s> {
    lexer: &'s Lexer,
    source: &'s str,
    index: usize,
}

impl LexerBuilder {
    /// Start building a lexer that skips everything matched by `ignored`.
    pub fn new(ignored: &str) -> LexerBuilder {
        LexerBuilder {
            ignored: ignored.to_owned(),
            operators: vec![],
        }
    }

    pub fn operator(&mut self, constant: &str, op: Operator) -> &mut LexerBuilder {
        self.operators.push((constant.to_owned(), op));
        self
    }

    pub fn build(&self) -> Result<Lexer, LexerError> {
        Lexer::new(&self.ignored, self.operators.clone())
    }
}

impl Lexer {
    pub fn new(ignored: &str, operators: Vec<(String, Operator)>) -> Result<Lexer, LexerError> {
        Ok(Lexer {
            ignored: Regex::new(&format!("^({})", ignored))?,
            operand: Regex::new(&format!("^({})", OPERAND_REGEX))?,
            operators,
        })
    }

    /// A lexer for the four arithmetic operators, ignoring everything except digits.
    pub fn arithmetic() -> Result<Lexer, LexerError> {
        Lexer::arithmetic_ignoring(DEFAULT_IGNORED)
    }

    /// Like `arithmetic`, but only skips what `ignored` matches. Any other unknown character
    /// lexes as a `Token::LexError`.
    pub fn arithmetic_ignoring(ignored: &str) -> Result<Lexer, LexerError> {
        let mut builder = LexerBuilder::new(ignored);
        for op in Operator::ALL {
            builder.operator(&op.as_char().to_string(), op);
        }
        builder.build()
    }

    pub fn lex<'s>(&'s self, source: &'s str) -> Lex<'s> {
        Lex {
            lexer: self,
            source,
            index: 0,
        }
    }
}

impl<'s> Iterator for Lex<'s> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        self.eat_ignored();
        let remaining = self.remaining();
        let ch = remaining.chars().next()?;
        if let Some(matched) = self.lexer.operand.find(remaining) {
            return Some(self.eat_token(Token::Digit(ch), matched.end()));
        }
        for (constant, op) in &self.lexer.operators {
            if remaining.starts_with(constant.as_str()) {
                let (op, len) = (*op, constant.len());
                return Some(self.eat_token(Token::Op(op), len));
            }
        }
        Some(self.eat_token(Token::LexError(ch), ch.len_utf8()))
    }
}

impl<'s> Lex<'s> {
    pub fn remaining(&self) -> &'s str {
        &self.source[self.index..]
    }

    fn eat_ignored(&mut self) {
        if let Some(matched) = self.lexer.ignored.find(self.remaining()) {
            self.index += matched.end();
        }
    }

    fn eat_token(&mut self, token: Token, len: usize) -> Lexeme {
        let span = (self.index, self.index + len);
        self.index += len;
        Lexeme { token, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Digit(ch) | Token::LexError(ch) => write!(f, "{}", ch),
            Token::Op(op) => write!(f, "{}", op),
        }
    }
}
