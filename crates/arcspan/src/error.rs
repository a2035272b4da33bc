use thiserror::Error;

use crate::location::Location;

/// Outcome of a tokenize or parse step.
pub type ParseResult<T> = Result<T, ParseError>;

/// A parse failure: a [`SyntaxError`] leaf wrapped in zero or more context
/// frames, one per parser frame that was active when the leaf was raised.
///
/// Rendering a context frame yields `"{context} at location {loc}: {inner}"`,
/// so the full `Display` form reads outermost-first and ends with the
/// innermost cause:
///
/// ```text
/// Failed parsing list 'pairs' at location Ln:2, Col:1, Pos:11: Invalid number literal character '+' at location Ln:2, Col:7, Pos:17
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("{context} at location {location}: {source}")]
    Context {
        context: String,
        location: Location,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Wraps `self` in one more context frame.
    #[must_use]
    pub fn context(self, context: impl Into<String>, location: Location) -> Self {
        Self::Context {
            context: context.into(),
            location,
            source: Box::new(self),
        }
    }

    /// The innermost syntax error, with all context frames peeled off.
    #[must_use]
    pub fn innermost(&self) -> &SyntaxError {
        let mut err = self;
        loop {
            match err {
                Self::Syntax(syntax) => return syntax,
                Self::Context { source, .. } => err = source,
            }
        }
    }
}

/// The leaf failure raised by the tokenizer or by a single parser frame.
///
/// Lexical variants come out of the tokenizer; the `Expected*`/`Unexpected*`
/// variants are raised by the parser when the token stream itself is sound
/// but not what the grammar calls for.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SyntaxError {
    #[error("Invalid character '{ch}' at location {location}")]
    InvalidCharacter { ch: char, location: Location },

    #[error("Invalid number literal character '{ch}' at location {location}")]
    InvalidNumberLiteral { ch: char, location: Location },

    #[error("Invalid escape sequence '\\{ch}' in string at location {location}")]
    InvalidEscape { ch: char, location: Location },

    #[error("Unescaped whitespace byte in string at location {location}")]
    WhitespaceInString { location: Location },

    #[error("Unterminated string starting at location {location}")]
    UnterminatedString { location: Location },

    #[error("Unknown keyword '{found}' at location {location}")]
    UnknownKeyword { found: String, location: Location },

    #[error("Unexpected end of input at location {location}")]
    UnexpectedEndOfInput { location: Location },

    #[error("Expected string key in object at location {location}, found {found}")]
    ExpectedKey { found: String, location: Location },

    #[error("Expected ':' after object key at location {location}, found {found}")]
    ExpectedAssign { found: String, location: Location },

    #[error("Unexpected list token {found} at location {location}")]
    UnexpectedListToken { found: String, location: Location },

    #[error("Unexpected {found} token at location {location}")]
    UnexpectedToken { found: String, location: Location },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(position: usize, line: usize, column: usize) -> Location {
        Location {
            position,
            line,
            column,
        }
    }

    #[test]
    fn context_frames_render_outermost_first() {
        let leaf = SyntaxError::InvalidNumberLiteral {
            ch: '+',
            location: loc(17, 2, 7),
        };
        let err = ParseError::from(leaf.clone())
            .context("Failed parsing child element 'x0'", loc(12, 2, 2))
            .context("Failed parsing list 'pairs'", loc(11, 2, 1));

        assert_eq!(
            err.to_string(),
            "Failed parsing list 'pairs' at location Ln:2, Col:1, Pos:11: \
             Failed parsing child element 'x0' at location Ln:2, Col:2, Pos:12: \
             Invalid number literal character '+' at location Ln:2, Col:7, Pos:17"
        );
        assert_eq!(err.innermost(), &leaf);
    }
}
