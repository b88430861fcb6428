//! Source positions attached to AST nodes.

use std::fmt;

/// Where a node came from: source name plus 1-based line.
///
/// Line `0` means the parser did not record a position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ParsingContext {
    pub source: String,
    pub line: u32,
}

impl ParsingContext {
    pub fn new(source: impl Into<String>, line: u32) -> Self {
        Self {
            source: source.into(),
            line,
        }
    }

    pub fn is_known(&self) -> bool {
        !self.source.is_empty() || self.line != 0
    }
}

impl fmt::Display for ParsingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)
    }
}
