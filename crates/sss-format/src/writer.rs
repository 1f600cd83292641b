//! Output buffer that knows where it is.
//!
//! Tracks the 1-based line and column of the next character so that
//! mappings can be recorded as text is written.

use sss_tokenizer::Position;

use crate::map::Mapping;

pub(crate) struct Writer {
    out: String,
    /// Position of the next character.
    next: Position,
    /// Position of the last character written.
    last: Option<Position>,
    /// `None` when no map was requested.
    mappings: Option<Vec<Mapping>>,
}

impl Writer {
    pub fn new(track: bool) -> Self {
        Self {
            out: String::new(),
            next: Position::default(),
            last: None,
            mappings: track.then(Vec::new),
        }
    }

    pub fn write(&mut self, text: &str) {
        if self.mappings.is_some() {
            for c in text.chars() {
                self.last = Some(self.next);
                if c == '\n' {
                    self.next = Position::new(self.next.line + 1, 1);
                } else {
                    self.next.column += 1;
                }
            }
        }
        self.out.push_str(text);
    }

    /// Map the next character to `original`.
    pub fn mark_next(&mut self, original: Position) {
        let generated = self.next;
        self.push(generated, original);
    }

    /// Map the last character written to `original`.
    pub fn mark_last(&mut self, original: Position) {
        if let Some(generated) = self.last {
            self.push(generated, original);
        }
    }

    fn push(&mut self, generated: Position, original: Position) {
        if let Some(mappings) = &mut self.mappings {
            mappings.push(Mapping {
                generated,
                original,
            });
        }
    }

    pub fn finish(self) -> (String, Option<Vec<Mapping>>) {
        (self.out, self.mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_lines_and_columns() {
        let mut writer = Writer::new(true);
        writer.write("ab\n");
        writer.mark_next(Position::new(7, 1));
        writer.write("cd");
        writer.mark_last(Position::new(7, 2));
        let (out, mappings) = writer.finish();
        assert_eq!(out, "ab\ncd");
        assert_eq!(
            mappings.unwrap(),
            [
                Mapping {
                    generated: Position::new(2, 1),
                    original: Position::new(7, 1),
                },
                Mapping {
                    generated: Position::new(2, 2),
                    original: Position::new(7, 2),
                },
            ]
        );
    }

    #[test]
    fn test_columns_count_characters() {
        let mut writer = Writer::new(true);
        writer.write("äö");
        writer.mark_next(Position::default());
        let (_, mappings) = writer.finish();
        assert_eq!(mappings.unwrap()[0].generated, Position::new(1, 3));
    }

    #[test]
    fn test_untracked_writer_collects_nothing() {
        let mut writer = Writer::new(false);
        writer.write("a");
        writer.mark_next(Position::default());
        assert_eq!(writer.finish(), ("a".to_string(), None));
    }
}
