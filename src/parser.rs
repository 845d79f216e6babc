use crate::lexer::{Lexeme, Lexer, LexerError, DEFAULT_IGNORED};
use crate::node::Node;
use crate::parse_error::ParseError;
use crate::shunter::shunt;
use crate::source::Source;
use tracing::debug;

/// Builds expression trees. Construct one and reuse it; it holds the compiled lexer.
#[derive(Debug, Clone)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    /// A parser that ignores every character other than digits and `+ - * /`.
    pub fn new() -> Result<Parser, LexerError> {
        Parser::with_ignored(DEFAULT_IGNORED)
    }

    /// A parser that only ignores what the regex `ignored` matches, such as `\s+`. Any other
    /// unknown character is reported as an error instead of being skipped.
    pub fn with_ignored(ignored: &str) -> Result<Parser, LexerError> {
        Ok(Parser {
            lexer: Lexer::arithmetic_ignoring(ignored)?,
        })
    }

    /// Build the expression tree for `source`. Runs in linear time.
    pub fn parse(&self, source: &Source) -> Result<Node, ParseError> {
        #[cfg(feature = "debug_mode")]
        fn print_lexemes(message: &str, source: &Source, lexemes: &[Lexeme]) {
            print!("{}", message);
            for lexeme in lexemes {
                print!("{} ", source.substr(lexeme.span));
            }
            println!();
        }

        debug!(filename = source.filename(), source = source.source(), "parse");
        let lexemes = self.lexer.lex(source.source()).collect::<Vec<Lexeme>>();
        #[cfg(feature = "debug_mode")]
        print_lexemes("Lexed:   ", source, &lexemes);
        let tree = shunt(lexemes).map_err(|err| ParseError::from_shunt_error(source, err))?;
        #[cfg(feature = "debug_mode")]
        println!("Shunted: {}", tree);
        Ok(tree)
    }
}
