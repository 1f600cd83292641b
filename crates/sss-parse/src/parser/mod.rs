//! Line classification and tree building.

use sss_tokenizer::{LineIndex, Position, Span, Token, TokenKind, tokenize};
use sss_tree::{
    AtRule, AtRuleRaws, Comment, CommentRaws, DeclRaws, Declaration, Node, NodeId, NodeKind,
    RawValue, Root, RootSource, Rule, RuleRaws, Source,
};
use tracing::{debug, trace};

use crate::decl;
use crate::error::{ParseError, ParseErrorKind, Spanned};
use crate::indent::{Indentation, Shift};
use crate::lines::{self, Lines, Part};
use crate::options::ParseOptions;

/// Parse a whole document.
pub(crate) fn parse(source: &str, options: &ParseOptions) -> Result<Root, ParseError> {
    let index = LineIndex::new(source);
    let input = options.input();
    Parser::new(source, &index)
        .and_then(|parser| parser.run(input))
        .map_err(|err| {
            debug!("Parse failed at {:?}: {}", err.span, err.kind);
            ParseError::new(input, &index, err)
        })
}

struct Parser<'a, 'src> {
    source: &'src str,
    index: &'a LineIndex<'src>,
    parts: Vec<Part<'src>>,
    /// Text after the last part.
    after: Span,
    /// Next part to read.
    pos: usize,
    indent: Indentation,
    root: Root,
}

impl<'a, 'src> Parser<'a, 'src> {
    fn new(source: &'src str, index: &'a LineIndex<'src>) -> Result<Self, Spanned> {
        let Lines { parts, after } = lines::split(source, index, tokenize(source))?;
        Ok(Self {
            source,
            index,
            parts,
            after,
            pos: 0,
            indent: Indentation::new(),
            root: Root::new(),
        })
    }

    fn run(mut self, input: &str) -> Result<Root, Spanned> {
        while let Some(part) = self.parts.get(self.pos).cloned() {
            self.pos += 1;
            let parent = self.place(&part)?;
            if part.comment {
                self.comment(parent, &part)?;
            } else if part.at_rule {
                self.at_rule(parent, &part)?;
            } else if part.colon && !self.nests_rule(&part) {
                self.decl(parent, &part)?;
            } else {
                self.rule(parent, &part)?;
            }
        }

        self.root.raws.after = self.after.slice(self.source).to_string();
        let content = self.source.trim_end();
        self.root.source = Some(RootSource {
            input: input.to_string(),
            start: Position::default(),
            end: (!content.is_empty())
                .then(|| self.index.last_char(Span::new(0, content.len() as u32))),
        });
        debug!(
            "Parsed {} nodes, indent {:?}",
            self.root.len(),
            self.root.raws.indent
        );
        Ok(self.root)
    }

    /// Run the indentation check for `part` and find the node it belongs to.
    fn place(&mut self, part: &Part<'src>) -> Result<Option<NodeId>, Spanned> {
        match self.indent.enter(part.indent, part.indent_span)? {
            Shift::Deeper { width, first } => {
                if first {
                    self.root.raws.indent = Some(part.indent.to_string());
                }
                let current = self.indent.container();
                let owner = match self.root.children_of(current).last() {
                    Some(&last) if self.root[last].kind.is_container() => Some(last),
                    _ => current,
                };
                self.indent.open(width, owner);
                Ok(owner)
            }
            Shift::Same | Shift::Shallower => Ok(self.indent.container()),
        }
    }

    /// A colon line is a rule when the next non-comment line is nested
    /// deeper and is itself a declaration.
    fn nests_rule(&self, part: &Part<'src>) -> bool {
        match self.parts[self.pos..].iter().find(|next| !next.comment) {
            Some(next) => !next.at_rule && next.colon && next.width() > part.width(),
            None => false,
        }
    }

    /// Tokens of the current part plus every following part that `accept`
    /// allows, glued with the line breaks between them.
    fn absorb(&mut self, accept: impl Fn(&Part<'src>, &Part<'src>) -> bool) -> Vec<Token<'src>> {
        let mut tokens = self.parts[self.pos - 1].tokens.clone();
        while let Some(next) = self.parts.get(self.pos) {
            if !accept(&self.parts[self.pos - 1], next) {
                break;
            }
            trace!("Line {} continues the previous line", next.number);
            tokens.push(next.joint(self.source));
            tokens.extend(next.tokens.iter().copied());
            self.pos += 1;
        }
        tokens
    }

    fn comment(&mut self, parent: Option<NodeId>, part: &Part<'src>) -> Result<NodeId, Spanned> {
        let token = part.head();
        let inline = token.kind == TokenKind::InlineComment;
        let body = if inline {
            &token.text[2..]
        } else {
            &token.text[2..token.text.len() - 2]
        };
        let text = body.trim();
        let (left, right) = if text.is_empty() {
            (body, "")
        } else {
            let left = body.len() - body.trim_start().len();
            (&body[..left], &body[left + text.len()..])
        };
        let sss_between =
            (!inline).then(|| part.tokens[1..].iter().map(|t| t.text).collect::<String>());

        debug!("Comment {:?} at line {}", text, part.number);
        let node = Node::new(NodeKind::Comment(Comment {
            text: text.to_string(),
            raws: CommentRaws {
                inline,
                left: Some(left.to_string()),
                right: Some(right.to_string()),
                sss_between,
            },
        }));
        self.attach(parent, part, &part.tokens, node)
    }

    fn at_rule(&mut self, parent: Option<NodeId>, part: &Part<'src>) -> Result<NodeId, Spanned> {
        let mut tokens = self.absorb(|prev, _| prev.last_comma);
        forbid_semicolon(&tokens)?;
        forbid_curly(&tokens)?;

        let head = tokens.remove(0);
        let name = &head.text[1..];
        if name.is_empty() {
            return Err(Spanned::new(ParseErrorKind::UnnamedAtRule, head.span));
        }

        let mut content = vec![head];
        content.extend(tokens.iter().copied());
        let sss_between = trailing_spaces(&mut tokens);
        let after_name = leading_spaces(&mut tokens);
        let (params, raw) = clean(&tokens);

        debug!("At-rule @{} {:?} at line {}", name, params, part.number);
        let node = Node::new(NodeKind::AtRule(AtRule {
            name: name.to_string(),
            params,
            raws: AtRuleRaws {
                after_name: Some(after_name),
                params: raw,
                sss_between: Some(sss_between),
            },
        }));
        self.attach(parent, part, &content, node)
    }

    fn rule(&mut self, parent: Option<NodeId>, part: &Part<'src>) -> Result<NodeId, Spanned> {
        let width = part.width();
        let mut tokens = self.absorb(|prev, next| {
            prev.last_comma
                || (next.width() == width && !next.comment && !next.at_rule && !next.colon)
        });
        forbid_curly(&tokens)?;

        let content = tokens.clone();
        let sss_between = trailing_spaces(&mut tokens);
        let (selector, raw) = clean(&tokens);

        debug!("Rule {:?} at line {}", selector, part.number);
        let node = Node::new(NodeKind::Rule(Rule {
            selector,
            raws: RuleRaws {
                selector: raw,
                sss_between: Some(sss_between),
            },
        }));
        self.attach(parent, part, &content, node)
    }

    fn decl(&mut self, parent: Option<NodeId>, part: &Part<'src>) -> Result<NodeId, Spanned> {
        let width = part.width();
        let tokens = self.absorb(|_, next| {
            next.width() > width && !next.at_rule && !next.colon && !next.comment
        });
        forbid_semicolon(&tokens)?;
        forbid_curly(&tokens)?;

        let head = decl::split(&tokens)?;
        let (value, raw) = clean(&head.value);
        let content = if head.value.is_empty() {
            vec![head.colon]
        } else {
            head.value.clone()
        };

        debug!("Decl {}: {:?} at line {}", head.prop, value, part.number);
        let node = Node::new(NodeKind::Decl(Declaration {
            prop: head.prop,
            value,
            raws: DeclRaws {
                between: Some(head.between),
                value: raw,
            },
        }));
        self.attach(parent, part, &content, node)
    }

    /// Fill in `before` and the source location, then append.
    ///
    /// The node ends at the last non-whitespace character of `content`.
    fn attach(
        &mut self,
        parent: Option<NodeId>,
        part: &Part<'src>,
        content: &[Token<'src>],
        node: Node,
    ) -> Result<NodeId, Spanned> {
        let head = part.head();
        let start = self.index.start(head.span);
        let end = self.content_end(content).unwrap_or(start);
        let node = node
            .with_before(part.joint(self.source).text)
            .with_source(Source { start, end });
        self.root
            .append(parent, node)
            .map_err(|err| Spanned::new(ParseErrorKind::Tree(err), head.span))
    }

    fn content_end(&self, tokens: &[Token<'src>]) -> Option<Position> {
        let token = tokens.iter().rev().find(|t| !t.kind.is_whitespace())?;
        let len = token.text.trim_end().len() as u32;
        Some(
            self.index
                .last_char(Span::new(token.span.start, token.span.start + len)),
        )
    }
}

fn forbid_semicolon(tokens: &[Token<'_>]) -> Result<(), Spanned> {
    match tokens.iter().find(|t| t.kind == TokenKind::Semicolon) {
        Some(token) => Err(Spanned::new(
            ParseErrorKind::UnnecessarySemicolon,
            token.span,
        )),
        None => Ok(()),
    }
}

fn forbid_curly(tokens: &[Token<'_>]) -> Result<(), Spanned> {
    match tokens
        .iter()
        .find(|t| matches!(t.kind, TokenKind::LBrace | TokenKind::RBrace))
    {
        Some(token) => Err(Spanned::new(ParseErrorKind::UnnecessaryCurly, token.span)),
        None => Ok(()),
    }
}

/// Remove trailing whitespace tokens and return their text.
fn trailing_spaces(tokens: &mut Vec<Token<'_>>) -> String {
    let keep = tokens
        .iter()
        .rposition(|t| !t.kind.is_whitespace())
        .map_or(0, |i| i + 1);
    tokens.drain(keep..).map(|t| t.text).collect()
}

/// Remove leading whitespace tokens and return their text.
fn leading_spaces(tokens: &mut Vec<Token<'_>>) -> String {
    let skip = tokens
        .iter()
        .position(|t| !t.kind.is_whitespace())
        .unwrap_or(tokens.len());
    tokens.drain(..skip).map(|t| t.text).collect()
}

/// The value of `tokens` with comments and outer whitespace removed, plus
/// the literal text when it differs.
fn clean(tokens: &[Token<'_>]) -> (String, Option<RawValue>) {
    let raw: String = tokens.iter().map(|t| t.text).collect();
    let value: String = tokens
        .iter()
        .filter(|t| !t.kind.is_comment())
        .map(|t| t.text)
        .collect();
    let value = value.trim().to_string();
    let raw = (raw != value).then(|| RawValue::new(value.clone(), raw));
    (value, raw)
}
