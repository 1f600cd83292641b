//! Parse errors and their rendering.

use std::fmt;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use sss_tokenizer::{LineIndex, Span};
use sss_tree::TreeError;

/// Source identifier used when the caller does not name the input.
pub const DEFAULT_INPUT: &str = "<css input>";

/// Spans are byte offsets, so labels must be placed by byte.
fn ariadne_config() -> Config {
    let config = Config::default().with_index_type(IndexType::Byte);
    if std::env::var("NO_COLOR").is_ok() {
        config.with_color(false)
    } else {
        config
    }
}

/// Indentation the parser would have accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedIndent {
    /// One step deeper than the enclosing level.
    Exactly(usize),
    /// The nearest open levels below and above the line.
    Either(usize, usize),
}

impl fmt::Display for ExpectedIndent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedIndent::Exactly(width) => write!(f, "{}", width),
            ExpectedIndent::Either(lower, upper) => write!(f, "{} or {}", lower, upper),
        }
    }
}

/// Parse error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The first line is indented.
    FirstLineIndent,
    /// Indentation is not a valid continuation of the open levels.
    WrongIndent {
        expected: ExpectedIndent,
        actual: usize,
    },
    /// An indent uses tabs where the document indents with spaces, or the reverse.
    MixedIndent,
    /// Declaration starts with its colon.
    UnnamedDecl,
    /// Whitespace inside a property name.
    PropertySeparator,
    /// `;` where the line break already ends the statement.
    UnnecessarySemicolon,
    /// `{` or `}` where indentation already delimits the block.
    UnnecessaryCurly,
    /// `@` with no name.
    UnnamedAtRule,
    /// String without its closing quote.
    UnclosedString,
    /// `/*` without `*/`.
    UnclosedComment,
    /// `(` without `)`.
    UnclosedBracket,
    /// The tree refused a node.
    ///
    /// Lines are only attached to rules, at-rules or the root, so no input
    /// produces this; it carries a failed [`Root::append`](sss_tree::Root::append)
    /// out of the parser instead of panicking.
    Tree(TreeError),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::FirstLineIndent => write!(f, "First line should not have indent"),
            ParseErrorKind::WrongIndent { expected, actual } => {
                write!(f, "Expected {} indent, but get {}", expected, actual)
            }
            ParseErrorKind::MixedIndent => write!(f, "Mixed tabs and spaces are not allowed"),
            ParseErrorKind::UnnamedDecl => write!(f, "Declaration without name"),
            ParseErrorKind::PropertySeparator => write!(f, "Unexpected separator in property"),
            ParseErrorKind::UnnecessarySemicolon => write!(f, "Unnecessary semicolon"),
            ParseErrorKind::UnnecessaryCurly => write!(f, "Unnecessary curly bracket"),
            ParseErrorKind::UnnamedAtRule => write!(f, "At-rule without name"),
            ParseErrorKind::UnclosedString => write!(f, "Unclosed string"),
            ParseErrorKind::UnclosedComment => write!(f, "Unclosed comment"),
            ParseErrorKind::UnclosedBracket => write!(f, "Unclosed bracket"),
            ParseErrorKind::Tree(err) => write!(f, "{}", err),
        }
    }
}

/// An error kind anchored to the source, before line/column resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spanned {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl Spanned {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// A fatal parse error with its location.
///
/// Displays as `<input>:<line>:<column>: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input identifier (`from` option, or [`DEFAULT_INPUT`]).
    pub input: String,
    /// 1-based line.
    pub line: u32,
    /// 1-based column, in characters.
    pub column: u32,
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Byte range of the offending text.
    pub span: Span,
}

impl ParseError {
    pub(crate) fn new(input: &str, index: &LineIndex<'_>, spanned: Spanned) -> Self {
        let position = index.start(spanned.span);
        Self {
            input: input.to_string(),
            line: position.line,
            column: position.column,
            kind: spanned.kind,
            span: spanned.span,
        }
    }

    /// The message without the location prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, source: &str, writer: W) {
        let filename = self.input.as_str();
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range: std::ops::Range<usize> = self.span.into();
        let report = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_config(ariadne_config())
            .with_message(self.message());

        match &self.kind {
            ParseErrorKind::FirstLineIndent => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("document starts indented")
                        .with_color(Color::Red),
                )
                .with_help("top-level nodes start at column 1"),

            ParseErrorKind::WrongIndent { expected, .. } => report
                .with_label(
                    Label::new((filename, range))
                        .with_message(format!("indent this line by {}", expected))
                        .with_color(Color::Red),
                )
                .with_help("every nesting level is indented by the same unit as the first indented line"),

            ParseErrorKind::MixedIndent => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("different indent character")
                        .with_color(Color::Red),
                )
                .with_help("indent with either spaces or tabs, not both"),

            ParseErrorKind::UnnamedDecl => report.with_label(
                Label::new((filename, range))
                    .with_message("property name expected before the colon")
                    .with_color(Color::Red),
            ),

            ParseErrorKind::PropertySeparator => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("second word in property")
                        .with_color(Color::Red),
                )
                .with_help("property names cannot contain whitespace"),

            ParseErrorKind::UnnecessarySemicolon => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("remove this semicolon")
                        .with_color(Color::Red),
                )
                .with_help("the end of the line ends the statement"),

            ParseErrorKind::UnnecessaryCurly => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("remove this bracket")
                        .with_color(Color::Red),
                )
                .with_help("nest with indentation instead of curly brackets"),

            ParseErrorKind::UnnamedAtRule => report.with_label(
                Label::new((filename, range))
                    .with_message("at-rule name expected after `@`")
                    .with_color(Color::Red),
            ),

            ParseErrorKind::UnclosedString => report.with_label(
                Label::new((filename, range))
                    .with_message("string opened here")
                    .with_color(Color::Red),
            ),

            ParseErrorKind::UnclosedComment => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("comment opened here")
                        .with_color(Color::Red),
                )
                .with_help("add a closing '*/'"),

            ParseErrorKind::UnclosedBracket => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("bracket opened here")
                        .with_color(Color::Red),
                )
                .with_help("add a closing ')'"),

            ParseErrorKind::Tree(_) => report.with_label(
                Label::new((filename, range))
                    .with_message("node cannot be attached here")
                    .with_color(Color::Red),
            ),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.input, self.line, self.column, self.kind)
    }
}

impl std::error::Error for ParseError {}
