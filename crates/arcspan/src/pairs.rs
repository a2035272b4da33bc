//! Consumer-side walk of the coordinate-pair corpus.
//!
//! The parser hands back a plain element tree; this module knows the
//! workbench layout — a top-level object with a `pairs` array of
//! `{x0, y0, x1, y1}` objects plus optional `avg` and `count` fields — and
//! raises the structural errors the core parser deliberately does not.

use thiserror::Error;

use crate::element::JsonElement;
use crate::error::ParseError;
use crate::haversine::reference_haversine;
use crate::parser::parse;

/// One coordinate pair: `(x0, y0)` to `(x1, y1)`, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pair {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// Why a structurally well-formed JSON document is not a usable corpus.
#[derive(Debug, Error, PartialEq)]
pub enum CorpusError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("corpus root is not an object")]
    RootNotObject,

    #[error("corpus has no 'pairs' field")]
    MissingPairs,

    #[error("corpus 'pairs' field is not an array")]
    PairsNotArray,

    #[error("pair {index} is not an object")]
    PairNotObject { index: usize },

    #[error("pair {index} is missing component '{component}'")]
    MissingComponent {
        index: usize,
        component: &'static str,
    },

    #[error("corpus declares count {declared} but contains {actual} pairs")]
    CountMismatch { declared: u64, actual: usize },
}

/// The extracted corpus, with whatever summary fields the document carried.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    pub pairs: Vec<Pair>,
    pub declared_average: Option<f64>,
    pub declared_count: Option<u64>,
}

/// Parses `bytes` and extracts the corpus in one step.
pub fn parse_corpus(bytes: &[u8]) -> Result<Corpus, CorpusError> {
    let root = parse(bytes)?;
    extract_corpus(&root)
}

/// Walks an already parsed root element into a [`Corpus`]. When the
/// document declares a `count`, it must match the number of pairs.
pub fn extract_corpus(root: &JsonElement) -> Result<Corpus, CorpusError> {
    if !root.is_object() {
        return Err(CorpusError::RootNotObject);
    }
    let pairs_element = root.find_by_label("pairs").ok_or(CorpusError::MissingPairs)?;
    if !pairs_element.is_array() {
        return Err(CorpusError::PairsNotArray);
    }

    let mut pairs = Vec::with_capacity(pairs_element.child_count());
    for (index, element) in pairs_element.children().iter().enumerate() {
        pairs.push(extract_pair(element, index)?);
    }

    let declared_average = root.find_by_label("avg").and_then(JsonElement::as_number);
    let declared_count = root
        .find_by_label("count")
        .and_then(JsonElement::as_number)
        .map(|n| n as u64);

    if let Some(declared) = declared_count {
        if declared != pairs.len() as u64 {
            return Err(CorpusError::CountMismatch {
                declared,
                actual: pairs.len(),
            });
        }
    }

    Ok(Corpus {
        pairs,
        declared_average,
        declared_count,
    })
}

fn extract_pair(element: &JsonElement, index: usize) -> Result<Pair, CorpusError> {
    if !element.is_object() {
        return Err(CorpusError::PairNotObject { index });
    }
    let component = |name: &'static str| {
        element
            .find_by_label(name)
            .and_then(JsonElement::as_number)
            .ok_or(CorpusError::MissingComponent {
                index,
                component: name,
            })
    };
    Ok(Pair {
        x0: component("x0")?,
        y0: component("y0")?,
        x1: component("x1")?,
        y1: component("y1")?,
    })
}

impl Pair {
    /// Great-circle distance of this pair on a sphere of `radius`.
    #[must_use]
    pub fn distance(&self, radius: f64) -> f64 {
        reference_haversine(self.x0, self.y0, self.x1, self.y1, radius)
    }
}

/// Mean pair distance; zero for an empty corpus.
#[must_use]
pub fn average_distance(pairs: &[Pair], radius: f64) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    let sum: f64 = pairs.iter().map(|pair| pair.distance(radius)).sum();
    sum / pairs.len() as f64
}
