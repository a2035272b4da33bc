//! The lexer: turns a byte buffer into [`Token`]s with source locations.
//!
//! The tokenizer owns all location arithmetic. Whitespace is skipped before
//! each token under the column rules in [`crate::location`]; inside string
//! and number literals the column advances by raw byte length. One token of
//! lookahead is kept for the parser's peek-then-consume pattern.

use crate::error::{ParseResult, SyntaxError};
use crate::location::Location;
use crate::token::{Token, TokenValue};

/// Bytes treated as whitespace between tokens. The same set is illegal
/// unescaped inside a string literal.
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x08)
}

pub struct Tokenizer<'a> {
    bytes: &'a [u8],
    loc: Location,
    peeked: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            loc: Location::start(),
            peeked: None,
        }
    }

    /// The location of the next unconsumed byte. When a token has been
    /// peeked, this is the location *after* it, so callers wanting the
    /// token's own position should use `token.start`.
    #[must_use]
    pub fn location(&self) -> Location {
        self.loc
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.loc.position).copied()
    }

    /// Skips whitespace up to the next token byte. A no-op while a peeked
    /// token is pending.
    pub fn skip_whitespace(&mut self) {
        if self.peeked.is_some() {
            return;
        }
        while let Some(byte) = self.peek_byte() {
            if !is_whitespace(byte) {
                break;
            }
            self.loc.advance_whitespace(byte);
        }
    }

    /// Lexes the next token without consuming it.
    pub fn peek_token(&mut self) -> ParseResult<&Token> {
        if self.peeked.is_none() {
            let token = self.lex_token()?;
            self.peeked = Some(token);
        }
        Ok(self.peeked.as_ref().expect("just peeked"))
    }

    /// Returns the next token, or an end-of-stream / invalid-input error.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        self.lex_token()
    }

    fn lex_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();
        let start = self.loc;
        let Some(byte) = self.peek_byte() else {
            return Err(SyntaxError::UnexpectedEndOfInput { location: start }.into());
        };

        let value = match byte {
            b'{' | b'}' | b'[' | b']' | b':' | b',' => {
                self.loc.advance_byte();
                match byte {
                    b'{' => TokenValue::OpenObject,
                    b'}' => TokenValue::CloseObject,
                    b'[' => TokenValue::OpenArray,
                    b']' => TokenValue::CloseArray,
                    b':' => TokenValue::Assign,
                    _ => TokenValue::Separator,
                }
            }
            b'"' => self.lex_string(start)?,
            b'-' | b'+' | b'0'..=b'9' => self.lex_number()?,
            b if b.is_ascii_alphabetic() => self.lex_keyword(start)?,
            b => {
                return Err(SyntaxError::InvalidCharacter {
                    ch: b as char,
                    location: start,
                }
                .into());
            }
        };

        Ok(Token {
            value,
            start,
            end: self.loc,
        })
    }

    /// Decodes a number literal: optional `-`, integer digits, optional `.`
    /// plus fraction digits. The mantissa accumulates across all digits; a
    /// leading `-` sets the factor to -1 and every fraction digit divides it
    /// by 10, so the decoded value is `mantissa * factor`. No exponents, no
    /// leading `+`.
    fn lex_number(&mut self) -> ParseResult<TokenValue> {
        let mut factor = 1.0f64;
        let mut mantissa = 0.0f64;

        if self.peek_byte() == Some(b'+') {
            return Err(SyntaxError::InvalidNumberLiteral {
                ch: '+',
                location: self.loc,
            }
            .into());
        }
        if self.peek_byte() == Some(b'-') {
            factor = -1.0;
            self.loc.advance_byte();
        }

        let digits = self.lex_digits(&mut mantissa);
        if digits == 0 {
            return self.number_error();
        }

        if self.peek_byte() != Some(b'.') {
            return Ok(TokenValue::Integer(mantissa * factor));
        }
        self.loc.advance_byte();

        let before = self.loc;
        while let Some(digit @ b'0'..=b'9') = self.peek_byte() {
            mantissa = mantissa * 10.0 + f64::from(digit - b'0');
            factor /= 10.0;
            self.loc.advance_byte();
        }
        if self.loc == before {
            return self.number_error();
        }
        Ok(TokenValue::Decimal(mantissa * factor))
    }

    fn lex_digits(&mut self, mantissa: &mut f64) -> usize {
        let mut count = 0;
        while let Some(digit @ b'0'..=b'9') = self.peek_byte() {
            *mantissa = *mantissa * 10.0 + f64::from(digit - b'0');
            self.loc.advance_byte();
            count += 1;
        }
        count
    }

    fn number_error(&self) -> ParseResult<TokenValue> {
        let location = self.loc;
        match self.peek_byte() {
            Some(byte) => Err(SyntaxError::InvalidNumberLiteral {
                ch: byte as char,
                location,
            }
            .into()),
            None => Err(SyntaxError::UnexpectedEndOfInput { location }.into()),
        }
    }

    /// Decodes a string literal. Raw bytes are copied through; the only
    /// escapes are `\b \f \n \r \t \" \\`, and an unescaped whitespace byte
    /// is an error.
    fn lex_string(&mut self, start: Location) -> ParseResult<TokenValue> {
        self.loc.advance_byte(); // opening quote
        let mut buf = Vec::new();

        loop {
            let Some(byte) = self.peek_byte() else {
                return Err(SyntaxError::UnterminatedString { location: start }.into());
            };
            match byte {
                b'"' => {
                    self.loc.advance_byte();
                    let text = String::from_utf8_lossy(&buf).into_owned();
                    return Ok(TokenValue::String(text));
                }
                b'\\' => {
                    self.loc.advance_byte();
                    let Some(escaped) = self.peek_byte() else {
                        return Err(SyntaxError::UnterminatedString { location: start }.into());
                    };
                    let decoded = match escaped {
                        b'b' => 0x08,
                        b'f' => 0x0C,
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        b'"' => b'"',
                        b'\\' => b'\\',
                        other => {
                            return Err(SyntaxError::InvalidEscape {
                                ch: other as char,
                                location: self.loc,
                            }
                            .into());
                        }
                    };
                    buf.push(decoded);
                    self.loc.advance_byte();
                }
                b if is_whitespace(b) => {
                    return Err(SyntaxError::WhitespaceInString { location: self.loc }.into());
                }
                b => {
                    buf.push(b);
                    self.loc.advance_byte();
                }
            }
        }
    }

    /// Matches `true`, `false` or `null` exactly. Anything else reports the
    /// alphabetic run that was actually found.
    fn lex_keyword(&mut self, start: Location) -> ParseResult<TokenValue> {
        let from = self.loc.position;
        while let Some(byte) = self.peek_byte() {
            if !byte.is_ascii_alphabetic() {
                break;
            }
            self.loc.advance_byte();
        }
        let word = &self.bytes[from..self.loc.position];
        match word {
            b"true" => Ok(TokenValue::True),
            b"false" => Ok(TokenValue::False),
            b"null" => Ok(TokenValue::Null),
            other => Err(SyntaxError::UnknownKeyword {
                found: String::from_utf8_lossy(other).into_owned(),
                location: start,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    /// Lexes the whole input, panicking on the first error.
    fn tokenize(src: &str) -> Vec<TokenValue> {
        let mut tokenizer = Tokenizer::new(src.as_bytes());
        let mut values = Vec::new();
        loop {
            tokenizer.skip_whitespace();
            if tokenizer.location().position == src.len() {
                return values;
            }
            values.push(tokenizer.next_token().unwrap().value);
        }
    }

    fn first_error(src: &str) -> ParseError {
        let mut tokenizer = Tokenizer::new(src.as_bytes());
        loop {
            match tokenizer.next_token() {
                Ok(_) => {}
                Err(err) => return err,
            }
        }
    }

    #[test]
    fn object_with_negative_decimal() {
        assert_eq!(
            tokenize("{\"a\":-12.5}"),
            vec![
                TokenValue::OpenObject,
                TokenValue::String("a".into()),
                TokenValue::Assign,
                TokenValue::Decimal(-12.5),
                TokenValue::CloseObject,
            ]
        );
    }

    #[test]
    fn whitespace_only_moves_locations() {
        let bare = tokenize("[1,2]");
        let spaced = tokenize(" [\n\t1 ,\r\n 2 ]\n");
        assert_eq!(bare, spaced);
    }

    #[test]
    fn operator_tokens_span_one_column() {
        let mut tokenizer = Tokenizer::new(b"{}");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.value.operator_byte(), Some(b'{'));
        assert_eq!(token.start.column, 0);
        assert_eq!(token.end.column, 1);
    }

    #[test]
    fn integer_and_decimal_kinds() {
        assert_eq!(tokenize("42"), vec![TokenValue::Integer(42.0)]);
        assert_eq!(tokenize("-7"), vec![TokenValue::Integer(-7.0)]);
        assert_eq!(tokenize("0.5"), vec![TokenValue::Decimal(0.5)]);
        assert_eq!(tokenize("-0.25"), vec![TokenValue::Decimal(-0.25)]);
    }

    #[test]
    fn leading_plus_is_a_number_error() {
        let err = first_error("+1");
        assert_eq!(
            err.to_string(),
            "Invalid number literal character '+' at location Ln:1, Col:0, Pos:0"
        );
    }

    #[test]
    fn dangling_sign_and_dot_are_errors() {
        assert!(matches!(
            first_error("-").innermost(),
            SyntaxError::UnexpectedEndOfInput { .. }
        ));
        assert!(matches!(
            first_error("1.x").innermost(),
            SyntaxError::InvalidNumberLiteral { ch: 'x', .. }
        ));
        assert!(matches!(
            first_error("-.5").innermost(),
            SyntaxError::InvalidNumberLiteral { ch: '.', .. }
        ));
    }

    #[test]
    fn full_escape_table() {
        assert_eq!(
            tokenize(r#""\b\f\n\r\t\"\\""#),
            vec![TokenValue::String("\u{8}\u{c}\n\r\t\"\\".into())]
        );
    }

    #[test]
    fn unsupported_escape_is_an_error() {
        assert!(matches!(
            first_error(r#""\u0041""#).innermost(),
            SyntaxError::InvalidEscape { ch: 'u', .. }
        ));
        assert!(matches!(
            first_error(r#""\q""#).innermost(),
            SyntaxError::InvalidEscape { ch: 'q', .. }
        ));
    }

    #[test]
    fn raw_whitespace_in_string_is_an_error() {
        assert!(matches!(
            first_error("\"a b\"").innermost(),
            SyntaxError::WhitespaceInString { .. }
        ));
        assert!(matches!(
            first_error("\"a\tb\"").innermost(),
            SyntaxError::WhitespaceInString { .. }
        ));
    }

    #[test]
    fn unterminated_string_points_at_its_start() {
        match first_error("  \"abc").innermost() {
            SyntaxError::UnterminatedString { location } => assert_eq!(location.position, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn keywords_and_near_misses() {
        assert_eq!(
            tokenize("true false null"),
            vec![TokenValue::True, TokenValue::False, TokenValue::Null]
        );
        match first_error("nul").innermost() {
            SyntaxError::UnknownKeyword { found, .. } => assert_eq!(found, "nul"),
            other => panic!("unexpected error: {other:?}"),
        }
        match first_error("truey").innermost() {
            SyntaxError::UnknownKeyword { found, .. } => assert_eq!(found, "truey"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_leading_byte() {
        assert_eq!(
            first_error("@").to_string(),
            "Invalid character '@' at location Ln:1, Col:0, Pos:0"
        );
    }

    #[test]
    fn empty_input_is_end_of_stream() {
        assert!(matches!(
            first_error("   ").innermost(),
            SyntaxError::UnexpectedEndOfInput { .. }
        ));
    }

    #[test]
    fn string_columns_advance_by_byte_length() {
        let mut tokenizer = Tokenizer::new(b"\"abc\" 1");
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.start.column, 0);
        assert_eq!(token.end.column, 5);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut tokenizer = Tokenizer::new(b"[1]");
        assert_eq!(tokenizer.peek_token().unwrap().value, TokenValue::OpenArray);
        assert_eq!(tokenizer.peek_token().unwrap().value, TokenValue::OpenArray);
        assert_eq!(tokenizer.next_token().unwrap().value, TokenValue::OpenArray);
        assert_eq!(
            tokenizer.next_token().unwrap().value,
            TokenValue::Integer(1.0)
        );
    }
}
