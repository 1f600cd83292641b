//! Writing a tree back to indentation-based text.
//!
//! Every captured raw is emitted as-is, so a parsed tree reproduces its
//! input exactly. Missing raws (nodes built or edited in code, or every raw
//! in normalize mode) fall back to canonical spacing.

use std::borrow::Cow;

use sss_tokenizer::{TokenKind, tokenize};
use sss_tree::{AtRule, Comment, Declaration, NodeId, NodeKind, RawValue, Root, Rule};
use tracing::debug;

use crate::map::SourceMap;
use crate::options::StringifyOptions;
use crate::writer::Writer;

/// Indent unit used when the root has none.
pub const DEFAULT_INDENT: &str = "  ";

/// Output of [`stringify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringifyResult {
    pub css: String,
    /// Present when [`StringifyOptions::map`] was set.
    pub map: Option<SourceMap>,
}

/// Write `root` as text.
pub fn stringify(root: &Root, options: &StringifyOptions) -> StringifyResult {
    let mut stringifier = Stringifier {
        root,
        normalize: options.normalize,
        unit: match &root.raws.indent {
            Some(indent) if !options.normalize => indent.as_str(),
            _ => DEFAULT_INDENT,
        },
        writer: Writer::new(options.map.is_some()),
        started: false,
    };
    stringifier.body(None, 0);

    let after = if options.normalize {
        if root.is_empty() { "" } else { "\n" }
    } else {
        root.raws.after.as_str()
    };
    stringifier.writer.write(after);

    let (css, mappings) = stringifier.writer.finish();
    debug!("Stringified {} nodes into {} bytes", root.len(), css.len());
    let map = options.map.map(|map| SourceMap {
        input: root.source.as_ref().map(|source| source.input.clone()),
        mappings: mappings.unwrap_or_default(),
        inline: map.inline,
        annotation: map.annotation,
    });
    StringifyResult { css, map }
}

struct Stringifier<'a> {
    root: &'a Root,
    normalize: bool,
    unit: &'a str,
    writer: Writer,
    /// Some node has been written.
    started: bool,
}

impl<'a> Stringifier<'a> {
    fn body(&mut self, parent: Option<NodeId>, depth: usize) {
        let root = self.root;
        for &id in root.children_of(parent) {
            self.node(id, depth);
        }
    }

    fn node(&mut self, id: NodeId, depth: usize) {
        let root = self.root;
        let node = &root[id];
        match node.before.as_deref() {
            Some(before) if !self.normalize => self.writer.write(before),
            _ if self.started => {
                self.writer.write("\n");
                self.writer.write(&self.unit.repeat(depth));
            }
            _ => {}
        }
        self.started = true;

        if let Some(source) = node.source {
            self.writer.mark_next(source.start);
        }
        match &node.kind {
            NodeKind::AtRule(at_rule) => self.at_rule(at_rule, depth),
            NodeKind::Rule(rule) => self.rule(rule, depth),
            NodeKind::Decl(decl) => self.decl(decl, depth),
            NodeKind::Comment(comment) => self.comment(comment),
        }
        if !node.kind.is_container() {
            if let Some(source) = node.source {
                self.writer.mark_last(source.end);
            }
        }

        self.body(Some(id), depth + 1);
    }

    /// `raw` unless in normalize mode, else `default`.
    fn raw<'b>(&self, raw: Option<&'b str>, default: &'b str) -> &'b str {
        match raw {
            Some(raw) if !self.normalize => raw,
            _ => default,
        }
    }

    /// A selector, params or value. In normalize mode its continuation lines
    /// are indented by `depth` units.
    fn value<'b>(
        &self,
        raw: Option<&'b RawValue>,
        current: &'b str,
        depth: usize,
    ) -> Cow<'b, str> {
        if self.normalize {
            reindent(current, &self.unit.repeat(depth))
        } else {
            Cow::Borrowed(RawValue::resolve(raw, current))
        }
    }

    fn at_rule(&mut self, at_rule: &AtRule, depth: usize) {
        let after_name = self.raw(
            at_rule.raws.after_name.as_deref(),
            if at_rule.params.is_empty() { "" } else { " " },
        );
        let params = self.value(at_rule.raws.params.as_ref(), &at_rule.params, depth + 1);
        let between = self.raw(at_rule.raws.sss_between.as_deref(), "");
        self.writer.write("@");
        self.writer.write(&at_rule.name);
        self.writer.write(after_name);
        self.writer.write(&params);
        self.writer.write(between);
    }

    fn rule(&mut self, rule: &Rule, depth: usize) {
        // Same-width continuation lines stay at the rule's own depth.
        let selector = self.value(rule.raws.selector.as_ref(), &rule.selector, depth);
        let between = self.raw(rule.raws.sss_between.as_deref(), "");
        self.writer.write(&selector);
        self.writer.write(between);
    }

    fn decl(&mut self, decl: &Declaration, depth: usize) {
        let between = self.raw(
            decl.raws.between.as_deref(),
            if decl.value.is_empty() { ":" } else { ": " },
        );
        let value = self.value(decl.raws.value.as_ref(), &decl.value, depth + 1);
        self.writer.write(&decl.prop);
        self.writer.write(between);
        self.writer.write(&value);
    }

    fn comment(&mut self, comment: &Comment) {
        let pad = if comment.text.is_empty() { "" } else { " " };
        let left = self.raw(comment.raws.left.as_deref(), pad);
        if comment.raws.inline {
            let right = self.raw(comment.raws.right.as_deref(), "");
            self.writer.write("//");
            self.writer.write(left);
            self.writer.write(&comment.text);
            self.writer.write(right);
        } else {
            let right = self.raw(comment.raws.right.as_deref(), pad);
            let between = self.raw(comment.raws.sss_between.as_deref(), "");
            self.writer.write("/*");
            self.writer.write(left);
            self.writer.write(&comment.text);
            self.writer.write(right);
            self.writer.write("*/");
            self.writer.write(between);
        }
    }
}

/// Replace every whitespace run holding a line break with `\n` + `indent`.
///
/// Line breaks inside strings and comments are kept.
fn reindent<'a>(text: &'a str, indent: &str) -> Cow<'a, str> {
    if !text.contains('\n') {
        return Cow::Borrowed(text);
    }
    let tokens = tokenize(text);
    let mut out = String::with_capacity(text.len());
    let mut rest = tokens.as_slice();
    while let Some((token, tail)) = rest.split_first() {
        let run = rest.iter().take_while(|t| t.kind.is_whitespace()).count();
        if rest[..run].iter().any(|t| t.kind == TokenKind::Newline) {
            out.push('\n');
            out.push_str(indent);
            rest = &rest[run..];
        } else {
            out.push_str(token.text);
            rest = tail;
        }
    }
    Cow::Owned(out)
}
