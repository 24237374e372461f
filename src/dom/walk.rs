//! Tree walks: document-order text iteration and subtree text collection

use crate::dom::node::{node_text, DomNode};
use regex::Regex;
use scraper::Html;

/// Iterates every text node of the document, in document order.
pub fn text_nodes(doc: &Html) -> impl Iterator<Item = DomNode<'_>> {
    doc.tree.root().descendants().filter(|n| n.value().is_text())
}

/// Iterates the text nodes strictly after `from` in document order.
///
/// Descendants of `from` come after it in document order and are included;
/// `from` itself is not. This mirrors a "find all next" walk anchored on
/// either a text node or an element.
pub fn text_nodes_after<'a>(doc: &'a Html, from: DomNode<'a>) -> impl Iterator<Item = DomNode<'a>> {
    let from_id = from.id();
    doc.tree
        .root()
        .descendants()
        .skip_while(move |n| n.id() != from_id)
        .skip(1)
        .filter(|n| n.value().is_text())
}

/// Finds the first text node beneath `scope` whose raw text matches `pattern`.
///
/// Raw text, not normalized: the patterns this crate anchors on tolerate
/// whitespace themselves.
pub fn find_text<'a>(scope: DomNode<'a>, pattern: &Regex) -> Option<DomNode<'a>> {
    scope
        .descendants()
        .find(|n| node_text(*n).is_some_and(|t| pattern.is_match(t)))
}

/// Collects the visible-and-hidden text of a subtree into one string.
///
/// Each fragment is trimmed, empty fragments are dropped, and the rest are
/// joined with single spaces. Used for scoring candidate blocks and for
/// reading table cells, where the fragment boundaries are markup noise.
pub fn subtree_text(node: DomNode<'_>) -> String {
    let mut parts = Vec::new();
    for n in node.descendants() {
        if let Some(t) = node_text(n) {
            let t = t.trim();
            if !t.is_empty() {
                parts.push(t);
            }
        }
    }
    parts.join(" ")
}
