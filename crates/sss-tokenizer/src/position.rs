//! Byte offset to line/column translation.

use std::fmt;

use crate::Span;

/// A 1-based line/column location in the source text.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Maps byte offsets of one source text to [`Position`]s.
#[derive(Debug, Clone)]
pub struct LineIndex<'src> {
    source: &'src str,
    /// Byte offset of the first character of every line.
    line_starts: Vec<u32>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .match_indices('\n')
                .map(|(offset, _)| offset as u32 + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    /// Position of the character starting at `offset`.
    ///
    /// Offsets past the end of the input are clamped to the end.
    pub fn position(&self, offset: u32) -> Position {
        let offset = offset.min(self.source.len() as u32);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let column = self.source[line_start..offset as usize].chars().count() + 1;
        Position::new(line as u32 + 1, column as u32)
    }

    /// Position of the first character of `span`.
    pub fn start(&self, span: Span) -> Position {
        self.position(span.start)
    }

    /// Position of the last character of `span`.
    ///
    /// For an empty span this is the span start.
    pub fn last_char(&self, span: Span) -> Position {
        match span.slice(self.source).chars().next_back() {
            Some(c) => self.position(span.end - c.len_utf8() as u32),
            None => self.position(span.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_character() {
        let index = LineIndex::new("a\n  b: 1\n");
        assert_eq!(index.position(0), Position::new(1, 1));
    }

    #[test]
    fn test_after_newline() {
        let index = LineIndex::new("a\n  b: 1\n");
        assert_eq!(index.position(2), Position::new(2, 1));
        assert_eq!(index.position(7), Position::new(2, 6));
        assert_eq!(index.position(9), Position::new(3, 1));
    }

    #[test]
    fn test_columns_count_characters() {
        let index = LineIndex::new("a: \"é\" b");
        // `é` is two bytes but one column.
        assert_eq!(index.position(7), Position::new(1, 7));
        assert_eq!(index.position(8), Position::new(1, 8));
    }

    #[test]
    fn test_last_char() {
        let source = "color: black";
        let index = LineIndex::new(source);
        assert_eq!(index.last_char(Span::new(7, 12)), Position::new(1, 12));
        assert_eq!(index.last_char(Span::empty(3)), Position::new(1, 4));
    }

    #[test]
    fn test_crlf_counts_one_line() {
        let index = LineIndex::new("a\r\nb");
        assert_eq!(index.position(1), Position::new(1, 2));
        assert_eq!(index.position(3), Position::new(2, 1));
        assert_eq!(index.position(4), Position::new(2, 2));
    }

    #[test]
    fn test_clamps_past_end() {
        let index = LineIndex::new("ab");
        assert_eq!(index.position(10), Position::new(1, 3));
    }
}
