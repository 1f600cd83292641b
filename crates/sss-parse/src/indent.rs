//! Indentation state machine.
//!
//! Open nesting levels are kept as a stack of `(width, container)` pairs.
//! The bottom level is the root at width 0. A line may stay at the current
//! width, go exactly one unit deeper, or return to any open width; returning
//! closes every level above it.

use sss_tokenizer::Span;
use sss_tree::NodeId;
use tracing::debug;

use crate::error::{ExpectedIndent, ParseErrorKind, Spanned};

#[derive(Debug, Clone, Copy)]
struct Level {
    width: usize,
    /// Node that receives children at this level, `None` for the root.
    container: Option<NodeId>,
}

/// How a line's indentation relates to the previous node line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shift {
    /// Same level, or the first line of the document.
    Same,
    /// One unit deeper. The caller must [`open`](Indentation::open) the level.
    Deeper {
        width: usize,
        /// This line fixed the indent unit.
        first: bool,
    },
    /// Back to an enclosing level; the levels above it are closed.
    Shallower,
}

#[derive(Debug)]
pub(crate) struct Indentation {
    levels: Vec<Level>,
    unit: Option<usize>,
    /// Indent character of the document, from the first indented line.
    style: Option<char>,
    started: bool,
}

impl Indentation {
    pub fn new() -> Self {
        Self {
            levels: vec![Level {
                width: 0,
                container: None,
            }],
            unit: None,
            style: None,
            started: false,
        }
    }

    /// The indent unit in characters, once known.
    #[cfg(test)]
    pub fn unit(&self) -> Option<usize> {
        self.unit
    }

    /// Container of the innermost open level.
    pub fn container(&self) -> Option<NodeId> {
        self.top().container
    }

    fn top(&self) -> Level {
        self.levels[self.levels.len() - 1]
    }

    /// Check the indentation of a line that starts a node.
    ///
    /// `span` is the indentation itself; errors point at its start (column 1)
    /// except mixed indentation, which points at the offending character.
    pub fn enter(&mut self, indent: &str, span: Span) -> Result<Shift, Spanned> {
        let width = indent.chars().count();

        if !self.started {
            self.started = true;
            if width != 0 {
                return Err(Spanned::new(ParseErrorKind::FirstLineIndent, span));
            }
            return Ok(Shift::Same);
        }

        self.check_style(indent, span)?;

        let top = self.top().width;
        if width > top {
            let first = self.unit.is_none();
            let unit = *self.unit.get_or_insert(width - top);
            if width - top != unit {
                return Err(wrong(ExpectedIndent::Exactly(top + unit), width, span));
            }
            debug!("Indent {} opens a level (unit {})", width, unit);
            return Ok(Shift::Deeper { width, first });
        }

        if width == top {
            return Ok(Shift::Same);
        }

        let mut closed = top;
        while self.top().width > width {
            closed = self.top().width;
            self.levels.pop();
        }
        let reached = self.top().width;
        if reached != width {
            return Err(wrong(ExpectedIndent::Either(reached, closed), width, span));
        }
        debug!("Indent {} closes back to depth {}", width, self.levels.len() - 1);
        Ok(Shift::Shallower)
    }

    /// Open the level announced by [`Shift::Deeper`].
    pub fn open(&mut self, width: usize, container: Option<NodeId>) {
        self.levels.push(Level { width, container });
    }

    fn check_style(&mut self, indent: &str, span: Span) -> Result<(), Spanned> {
        let Some(first) = indent.chars().next() else {
            return Ok(());
        };
        let style = *self.style.get_or_insert(first);
        match indent.char_indices().find(|(_, c)| *c != style) {
            Some((offset, c)) => {
                let start = span.start + offset as u32;
                let span = Span::new(start, start + c.len_utf8() as u32);
                Err(Spanned::new(ParseErrorKind::MixedIndent, span))
            }
            None => Ok(()),
        }
    }
}

fn wrong(expected: ExpectedIndent, actual: usize, span: Span) -> Spanned {
    Spanned::new(ParseErrorKind::WrongIndent { expected, actual }, span)
}
