use crate::lexer::Span;
use crate::op::Operator;
use crate::source::Source;
use colored::Colorize;
use std::error;
use std::fmt;
use thiserror::Error;

/// The expression could not be built into a tree. Nothing is produced when this happens: there
/// are no partial trees.
#[derive(Debug, Clone)]
pub struct ParseError {
    source: Source,
    cause: ParseErrorCause,
    span: Option<Span>,
}

/// Why an expression was malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorCause {
    #[error("expression is empty")]
    Empty,
    #[error("operator '{0}' is missing an operand")]
    MissingOperand(Operator),
    #[error("missing operator between operands")]
    MissingOperator,
    #[error("unrecognized character '{0}'")]
    Unrecognized(char),
}

/// A builder failure that hasn't been attached to its source text yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShuntError {
    pub(crate) cause: ParseErrorCause,
    pub(crate) span: Option<Span>,
}

impl ShuntError {
    pub(crate) fn new(cause: ParseErrorCause, span: Option<Span>) -> ShuntError {
        ShuntError { cause, span }
    }
}

impl ParseError {
    pub(crate) fn from_shunt_error(source: &Source, err: ShuntError) -> ParseError {
        ParseError {
            source: source.clone(),
            cause: err.cause,
            span: err.span,
        }
    }

    pub fn cause(&self) -> ParseErrorCause {
        self.cause
    }

    /// The byte range of the offending text, if the error has a location.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Display this error, forcing colors on or off. `Display` itself decides based on the
    /// terminal and the `NO_COLOR`/`CLICOLOR_FORCE` environment variables.
    pub fn display_with_color_override(&self, color: bool) -> impl fmt::Display + '_ {
        ColoredParseError { error: self, color }
    }

    fn label(&self) -> &'static str {
        match self.cause {
            ParseErrorCause::Empty => "nothing to parse",
            ParseErrorCause::MissingOperand(_) => "missing operand",
            ParseErrorCause::MissingOperator => "extra operand",
            ParseErrorCause::Unrecognized(_) => "unrecognized character",
        }
    }

    fn show(&self, f: &mut fmt::Formatter, color: bool) -> fmt::Result {
        let heading = "invalid expression:";
        if color {
            writeln!(f, "{} {}", heading.red().bold(), self.cause)?;
        } else {
            writeln!(f, "{} {}", heading, self.cause)?;
        }

        let span = match self.span {
            Some(span) => span,
            None => return writeln!(f, " --> {}", self.source.filename()),
        };
        let (line, col) = self.source.line_col(span.0);
        let line_num = (line + 1).to_string();
        let margin = " ".repeat(line_num.len());
        let line_text = self.source.line_contents(line);
        // Spans of leftover subtrees may run past the end of the line.
        let len = self
            .source
            .substr(span)
            .chars()
            .count()
            .min(line_text.chars().count().saturating_sub(col))
            .max(1);
        let carets = format!("{}{} {}", " ".repeat(col), "^".repeat(len), self.label());

        writeln!(
            f,
            "{}--> {}:{}:{}",
            margin,
            self.source.filename(),
            line + 1,
            col + 1
        )?;
        writeln!(f, "{} |", margin)?;
        writeln!(f, "{} |{}", line_num, line_text)?;
        if color {
            writeln!(f, "{} |{}", margin, carets.red().bold())
        } else {
            writeln!(f, "{} |{}", margin, carets)
        }
    }
}

struct ColoredParseError<'e> {
    error: &'e ParseError,
    color: bool,
}

impl<'e> fmt::Display for ColoredParseError<'e> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.show(f, self.color)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let color = colored::control::SHOULD_COLORIZE.should_colorize();
        self.show(f, color)
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.cause)
    }
}
