//! The recursive-descent parser.
//!
//! [`parse`] consumes tokens lazily through the tokenizer and builds a
//! [`JsonElement`] tree. Both container shapes go through one list routine;
//! every frame that fails wraps the inner error with a location-bearing
//! context, so the final message chains from the outermost frame down to
//! the lexical cause.

use crate::element::{JsonElement, JsonValue};
use crate::error::{ParseResult, SyntaxError};
use crate::location::Location;
use crate::token::TokenValue;
use crate::tokenizer::Tokenizer;

/// Parses one document from `bytes` and returns the root element. Bytes
/// after the first complete element are not inspected.
pub fn parse(bytes: &[u8]) -> ParseResult<JsonElement> {
    let mut tokenizer = Tokenizer::new(bytes);
    parse_element(&mut tokenizer, None)
}

fn parse_element(tokenizer: &mut Tokenizer<'_>, label: Option<String>) -> ParseResult<JsonElement> {
    let token = tokenizer.next_token()?;
    let start = token.start;
    let value = match token.value {
        TokenValue::OpenObject => {
            return parse_list(tokenizer, label, start, ListShape::Object);
        }
        TokenValue::OpenArray => {
            return parse_list(tokenizer, label, start, ListShape::Array);
        }
        TokenValue::String(s) => JsonValue::String(s),
        TokenValue::Integer(n) | TokenValue::Decimal(n) => JsonValue::Number(n),
        TokenValue::True => JsonValue::Boolean(true),
        TokenValue::False => JsonValue::Boolean(false),
        TokenValue::Null => JsonValue::Null,
        other => {
            return Err(SyntaxError::UnexpectedToken {
                found: other.describe().into(),
                location: start,
            }
            .into());
        }
    };
    Ok(JsonElement::new(label, start, value))
}

#[derive(Clone, Copy, PartialEq)]
enum ListShape {
    Object,
    Array,
}

impl ListShape {
    fn closer(self) -> TokenValue {
        match self {
            Self::Object => TokenValue::CloseObject,
            Self::Array => TokenValue::CloseArray,
        }
    }
}

/// Parses the remainder of a container after its opener was consumed.
///
/// Objects require a string key and an `:` before every child; arrays
/// forbid them. The closer is accepted either immediately (empty list) or
/// after any child; a separator demands another child, so leading and
/// trailing commas both fail.
fn parse_list(
    tokenizer: &mut Tokenizer<'_>,
    label: Option<String>,
    start: Location,
    shape: ListShape,
) -> ParseResult<JsonElement> {
    let children = parse_children(tokenizer, shape).map_err(|err| {
        let context = match &label {
            Some(name) => format!("Failed parsing list '{name}'"),
            None => String::from("Failed parsing list"),
        };
        err.context(context, start)
    })?;

    let value = match shape {
        ListShape::Object => JsonValue::Object(children),
        ListShape::Array => JsonValue::Array(children),
    };
    Ok(JsonElement::new(label, start, value))
}

fn parse_children(
    tokenizer: &mut Tokenizer<'_>,
    shape: ListShape,
) -> ParseResult<Vec<JsonElement>> {
    let closer = shape.closer();
    let mut children = Vec::new();

    tokenizer.skip_whitespace();
    if tokenizer.peek_token()?.value == closer {
        tokenizer.next_token()?;
        return Ok(children);
    }

    loop {
        let child_label = if shape == ListShape::Object {
            let key = tokenizer.next_token()?;
            let name = match key.value {
                TokenValue::String(name) => name,
                other => {
                    return Err(SyntaxError::ExpectedKey {
                        found: other.describe().into(),
                        location: key.start,
                    }
                    .into());
                }
            };
            let assign = tokenizer.next_token()?;
            if assign.value != TokenValue::Assign {
                return Err(SyntaxError::ExpectedAssign {
                    found: assign.value.describe().into(),
                    location: assign.start,
                }
                .into());
            }
            tokenizer.skip_whitespace();
            Some(name)
        } else {
            None
        };

        let child_start = tokenizer.peek_token()?.start;
        let context_label = child_label.clone();
        let child = parse_element(tokenizer, child_label).map_err(|err| {
            let context = match &context_label {
                Some(name) => format!("Failed parsing child element '{name}'"),
                None => String::from("Failed parsing child element"),
            };
            err.context(context, child_start)
        })?;
        children.push(child);

        let next = tokenizer.next_token()?;
        if next.value == closer {
            return Ok(children);
        }
        if next.value != TokenValue::Separator {
            return Err(SyntaxError::UnexpectedListToken {
                found: next.value.describe().into(),
                location: next.start,
            }
            .into());
        }
    }
}
