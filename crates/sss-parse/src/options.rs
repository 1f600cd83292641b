//! Parser options.

use crate::error::DEFAULT_INPUT;

/// Options for [`parse`](crate::parse).
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Input identifier reported in errors and recorded on the root
    /// (default: `<css input>`).
    pub from: Option<String>,
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the input.
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// The input identifier to report.
    pub fn input(&self) -> &str {
        self.from.as_deref().unwrap_or(DEFAULT_INPUT)
    }
}
