//! The parsed element tree.
//!
//! [`JsonElement`] is the tagged tree node the parser builds: a kind, the
//! source location of the element's first byte, a label assigned by the
//! enclosing object (absent for array children and the root), and ordered
//! children for containers. The parser is the only builder; elements never
//! mutate after construction.

use core::fmt;

use crate::location::Location;

/// The payload of an element. Containers own their children in source
/// order; scalars carry their decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Object(Vec<JsonElement>),
    Array(Vec<JsonElement>),
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// The kind tag of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

/// One node of the parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonElement {
    location: Location,
    label: Option<String>,
    value: JsonValue,
}

impl JsonElement {
    pub(crate) fn new(label: Option<String>, location: Location, value: JsonValue) -> Self {
        Self {
            location,
            label,
            value,
        }
    }

    /// Location of the element's first byte in the source buffer.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// The label the enclosing object assigned, if any. Array children and
    /// the root have none.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> JsonKind {
        match self.value {
            JsonValue::Object(_) => JsonKind::Object,
            JsonValue::Array(_) => JsonKind::Array,
            JsonValue::String(_) => JsonKind::String,
            JsonValue::Number(_) => JsonKind::Number,
            JsonValue::Boolean(_) => JsonKind::Boolean,
            JsonValue::Null => JsonKind::Null,
        }
    }

    #[must_use]
    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    /// The first child whose label equals `name`, in insertion order.
    /// Returns `None` when no child matches or when the element is not an
    /// object. Labels may repeat; only the first match is reachable here.
    #[must_use]
    pub fn find_by_label(&self, name: &str) -> Option<&JsonElement> {
        match &self.value {
            JsonValue::Object(children) => {
                children.iter().find(|child| child.label() == Some(name))
            }
            _ => None,
        }
    }

    /// Number of direct children; zero for scalars.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Direct children in source order; empty for scalars.
    #[must_use]
    pub fn children(&self) -> &[JsonElement] {
        match &self.value {
            JsonValue::Object(children) | JsonValue::Array(children) => children,
            _ => &[],
        }
    }

    /// The decoded text of a string element.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The decoded value of a number element.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            JsonValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The value of a boolean element.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            JsonValue::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// Returns `true` if the element is an object.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.value, JsonValue::Object(_))
    }

    /// Returns `true` if the element is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.value, JsonValue::Array(_))
    }
}

/// Writes `src` as the body of a JSON string literal, escaping exactly the
/// set this crate's tokenizer decodes.
fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl fmt::Display for JsonElement {
    /// Serializes the element compactly, labels included for object
    /// children. Duplicate labels are written as-is.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            JsonValue::Null => f.write_str("null"),
            JsonValue::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            JsonValue::Number(n) => write!(f, "{n}"),
            JsonValue::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            JsonValue::Array(children) => {
                f.write_str("[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str("]")
            }
            JsonValue::Object(children) => {
                f.write_str("{")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str("\"")?;
                    write_escaped_string(child.label().unwrap_or_default(), f)?;
                    f.write_str("\":")?;
                    write!(f, "{child}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn find_by_label_returns_first_match() {
        let root = parse(br#"{"a":1,"b":2,"a":3}"#).unwrap();
        assert_eq!(root.find_by_label("a").unwrap().as_number(), Some(1.0));
        assert_eq!(root.find_by_label("b").unwrap().as_number(), Some(2.0));
        assert!(root.find_by_label("c").is_none());
        assert_eq!(root.child_count(), 3);
    }

    #[test]
    fn find_by_label_on_non_objects_is_absent() {
        let root = parse(b"[1,2]").unwrap();
        assert!(root.find_by_label("0").is_none());
        let scalar = parse(b"12").unwrap();
        assert!(scalar.find_by_label("x").is_none());
        assert_eq!(scalar.child_count(), 0);
    }

    #[test]
    fn typed_accessors() {
        let root = parse(br#"{"s":"txt","n":4,"b":true,"z":null}"#).unwrap();
        assert_eq!(root.find_by_label("s").unwrap().as_str(), Some("txt"));
        assert_eq!(root.find_by_label("n").unwrap().as_number(), Some(4.0));
        assert_eq!(root.find_by_label("b").unwrap().as_bool(), Some(true));
        assert_eq!(root.find_by_label("z").unwrap().kind(), JsonKind::Null);
        assert_eq!(root.find_by_label("s").unwrap().as_number(), None);
        assert_eq!(root.find_by_label("n").unwrap().as_str(), None);
    }

    #[test]
    fn display_round_trips_compact_documents() {
        for src in [
            r#"{}"#,
            r#"[]"#,
            r#"{"a":1,"b":[true,null,false],"c":"x"}"#,
            r#"[-5,0.5,"y\n",{"k":null}]"#,
            r#"{"dup":1,"dup":2}"#,
        ] {
            let root = parse(src.as_bytes()).unwrap();
            assert_eq!(root.to_string(), src);
        }
    }
}
