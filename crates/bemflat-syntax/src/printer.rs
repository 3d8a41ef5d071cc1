//! Stylesheet printer.
//!
//! Replays a tree and its [`Raws`](crate::Raws) back into text. For a tree
//! produced by the parser and not modified since, the output is the input.

use core::fmt;

use crate::tree::{NodeId, NodeKind, Stylesheet};

/// Serialize the subtree rooted at `id`.
#[must_use]
pub fn stringify(sheet: &Stylesheet, id: NodeId) -> String {
    let mut printer = Printer {
        sheet,
        out: String::new(),
    };
    printer.node(id, false);
    printer.out
}

struct Printer<'a> {
    sheet: &'a Stylesheet,
    out: String,
}

impl Printer<'_> {
    fn node(&mut self, id: NodeId, semicolon: bool) {
        let sheet = self.sheet;
        let Some(node) = sheet.get(id) else {
            return;
        };
        let raws = &node.raws;

        match &node.kind {
            NodeKind::Root => {
                self.body(id);
                self.out.push_str(&raws.after);
            }
            NodeKind::Comment(comment) => {
                self.out.push_str(&raws.before);
                self.out.push_str("/*");
                self.out.push_str(&raws.left);
                self.out.push_str(&comment.text);
                self.out.push_str(&raws.right);
                self.out.push_str("*/");
            }
            NodeKind::Declaration(decl) => {
                self.out.push_str(&raws.before);
                self.out.push_str(&decl.prop);
                self.out.push_str(&raws.between);
                self.out.push_str(&decl.value);
                if semicolon {
                    self.out.push(';');
                }
            }
            NodeKind::Rule(rule) => {
                self.out.push_str(&raws.before);
                self.out.push_str(&rule.selector);
                self.out.push_str(&raws.between);
                self.block(id);
            }
            NodeKind::AtRule(at_rule) => {
                self.out.push_str(&raws.before);
                self.out.push('@');
                self.out.push_str(&at_rule.name);
                if !at_rule.params.is_empty() {
                    self.out.push_str(&raws.after_name);
                    self.out.push_str(&at_rule.params);
                }
                self.out.push_str(&raws.between);
                if at_rule.has_body {
                    self.block(id);
                } else if semicolon {
                    self.out.push(';');
                }
            }
        }
    }

    /// `{` children after `}`
    fn block(&mut self, id: NodeId) {
        self.out.push('{');
        self.body(id);
        if let Some(raws) = self.sheet.raws(id) {
            self.out.push_str(&raws.after);
        }
        self.out.push('}');
    }

    fn body(&mut self, id: NodeId) {
        let sheet = self.sheet;
        let children = sheet.children(id);
        let trailing_semicolon = sheet.raws(id).is_some_and(|r| r.semicolon);
        // Comments after the last declaration do not take its semicolon away.
        let last = children
            .iter()
            .rposition(|&c| !matches!(sheet.kind(c), Some(NodeKind::Comment(_))));

        for (i, &child) in children.iter().enumerate() {
            self.node(child, Some(i) != last || trailing_semicolon);
        }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stringify(self, self.root()))
    }
}
