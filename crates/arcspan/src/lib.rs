//! Byte-buffer JSON parsing and an instrumented cycle profiler for the
//! haversine workbench.
//!
//! The crate has two independent cores. The first is a JSON tokenizer and
//! recursive-descent parser that operate directly on a byte buffer and
//! produce a [`JsonElement`] tree in which every node carries its source
//! [`Location`]; parse failures are plain [`ParseError`] values whose
//! messages chain outward frame by frame. The second is a process-wide
//! profiler that records section begin/end timestamps from a high-resolution
//! cycle counter into a preallocated ring and, on shutdown, replays the ring
//! into a call tree with per-node cycle totals, call counts and percentages.
//!
//! Around those cores sit the thin collaborators the workbench needs: the
//! reference haversine distance, the coordinate-pair corpus walk, and the
//! binary answer-file codec.
//!
//! # Examples
//!
//! ```
//! use arcspan::parse;
//!
//! let root = parse(br#"{"x": 1, "y": [true, null]}"#).unwrap();
//! assert_eq!(root.find_by_label("x").unwrap().as_number(), Some(1.0));
//! assert_eq!(root.find_by_label("y").unwrap().child_count(), 2);
//! ```

mod element;
mod error;
mod location;
mod parser;
mod token;
mod tokenizer;

pub mod answers;
pub mod haversine;
pub mod pairs;
pub mod profiler;

pub use element::{JsonElement, JsonKind, JsonValue};
pub use error::{ParseError, ParseResult, SyntaxError};
pub use location::Location;
pub use parser::parse;
pub use token::{Token, TokenValue};
pub use tokenizer::Tokenizer;
