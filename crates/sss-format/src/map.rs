//! Generated-to-original position maps.

use sss_tokenizer::Position;

/// One generated position and the source position it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub generated: Position,
    pub original: Position,
}

/// Mappings collected while stringifying, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    /// Input identifier of the parsed root, if it was parsed.
    pub input: Option<String>,
    pub mappings: Vec<Mapping>,
    pub inline: bool,
    pub annotation: bool,
}

impl SourceMap {
    /// The original position recorded for `generated`, if any.
    pub fn original(&self, generated: Position) -> Option<Position> {
        self.mappings
            .iter()
            .find(|m| m.generated == generated)
            .map(|m| m.original)
    }
}
