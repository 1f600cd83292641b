//! Compiling a tree to brace-delimited CSS.

use sss_tree::{NodeId, NodeKind, Root};

/// Indentation of the generated CSS.
const CSS_INDENT: &str = "    ";

/// Write `root` as plain CSS.
///
/// Containers open a `{` block, declarations end with `;`, an at-rule with
/// no children ends with `;`, and every comment becomes `/* ... */`. Raws are
/// not used; the output is indented by four spaces per level.
pub fn to_css(root: &Root) -> String {
    let mut out = String::new();
    block(root, None, 0, &mut out);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn block(root: &Root, parent: Option<NodeId>, depth: usize, out: &mut String) {
    let indent = CSS_INDENT.repeat(depth);
    for &id in root.children_of(parent) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&indent);

        let node = &root[id];
        match &node.kind {
            NodeKind::Decl(decl) => {
                out.push_str(&decl.prop);
                out.push_str(": ");
                out.push_str(&decl.value);
                out.push(';');
            }
            NodeKind::Comment(comment) => {
                out.push_str("/* ");
                out.push_str(&comment.text);
                out.push_str(" */");
            }
            NodeKind::AtRule(at_rule) => {
                out.push('@');
                out.push_str(&at_rule.name);
                if !at_rule.params.is_empty() {
                    out.push(' ');
                    out.push_str(&at_rule.params);
                }
                if node.children().is_empty() {
                    out.push(';');
                } else {
                    children(root, id, depth, &indent, out);
                }
            }
            NodeKind::Rule(rule) => {
                out.push_str(&rule.selector);
                if node.children().is_empty() {
                    out.push_str(" {}");
                } else {
                    children(root, id, depth, &indent, out);
                }
            }
        }
    }
}

fn children(root: &Root, id: NodeId, depth: usize, indent: &str, out: &mut String) {
    out.push_str(" {");
    block(root, Some(id), depth + 1, out);
    out.push('\n');
    out.push_str(indent);
    out.push('}');
}
