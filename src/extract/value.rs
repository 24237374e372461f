//! Shared label/value extraction primitive
//!
//! Site markup is inconsistent across listing templates, so the extractor
//! tries the most structurally reliable interpretation first and degrades:
//!
//! 1. label and value share a table row — return the cell after the label,
//!    or the last non-empty cell of the row;
//! 2. label and value are adjacent children of the same container;
//! 3. nearest visible text after the label in document order;
//! 4. give up with a typed failure.

use crate::dom::{self, DomNode};
use crate::text;
use crate::{ExtractError, ExtractResult};
use regex::Regex;
use scraper::Html;

/// A compiled label pattern: a substring search form for locating the label
/// text node, and an anchored form for the exact-match tests that separate
/// labels from values.
pub struct LabelPattern {
    name: &'static str,
    search: Regex,
    exact: Regex,
}

impl LabelPattern {
    /// Compiles the case-insensitive search and exact forms of `pattern`.
    ///
    /// Label patterns are compile-time constants; an invalid one is a
    /// programming error.
    pub fn new(name: &'static str, pattern: &str) -> Self {
        let search = Regex::new(&format!("(?i){pattern}")).expect("valid label pattern");
        let exact = Regex::new(&format!("(?i)^(?:{pattern})$")).expect("valid label pattern");
        Self { name, search, exact }
    }

    /// The label name used in failure reasons.
    pub fn name(&self) -> &str {
        self.name
    }

    pub(crate) fn search(&self) -> &Regex {
        &self.search
    }

    pub(crate) fn exact(&self) -> &Regex {
        &self.exact
    }
}

/// Extracts the value associated with a label anywhere beneath `scope`.
///
/// Fails with [`ExtractError::LabelNotFound`] when no text matches the label
/// pattern, and with [`ExtractError::ValueNotFound`] when the label exists
/// but every fallback comes up empty.
pub fn extract_value(doc: &Html, scope: DomNode<'_>, label: &LabelPattern) -> ExtractResult<String> {
    let label_node = dom::find_text(scope, label.search())
        .ok_or_else(|| ExtractError::LabelNotFound(label.name().to_string()))?;

    if let Some(label_el) = dom::parent_element(label_node) {
        if let Some(row) = dom::ancestor_table_row(label_el) {
            if let Some(value) = row_value(row, label) {
                return Ok(value);
            }
        }

        if let Some(value) = sibling_value(label_el, label) {
            return Ok(value);
        }

        if let Some(value) = forward_value(doc, label_el, label) {
            return Ok(value);
        }
    }

    Err(ExtractError::ValueNotFound(label.name().to_string()))
}

/// Table-row interpretation: the cell after an exact label cell, otherwise
/// the last non-empty cell (label and value share the row, the value is the
/// other cell).
fn row_value(row: DomNode<'_>, label: &LabelPattern) -> Option<String> {
    let texts: Vec<String> = dom::table_cells(row)
        .into_iter()
        .map(|cell| text::normalize(&dom::subtree_text(cell)))
        .collect();

    for (i, t) in texts.iter().enumerate() {
        if label.exact().is_match(t) && i + 1 < texts.len() {
            return Some(texts[i + 1].clone());
        }
    }

    texts.into_iter().rev().find(|t| !t.is_empty())
}

/// Adjacent-sibling interpretation: the first non-empty element sibling
/// after the label inside the same container, skipping anything that is
/// itself just the label.
fn sibling_value(label_el: DomNode<'_>, label: &LabelPattern) -> Option<String> {
    let parent = label_el.parent()?;
    let children: Vec<DomNode<'_>> = parent
        .children()
        .filter(|c| c.value().is_element())
        .collect();
    let pos = children.iter().position(|c| c.id() == label_el.id())?;

    for child in &children[pos + 1..] {
        let cand = text::normalize(&dom::subtree_text(*child));
        if !cand.is_empty() && !label.exact().is_match(&cand) {
            return Some(cand);
        }
    }
    None
}

/// Last-resort proximity interpretation: the first visible non-empty text
/// after the label element in document order that is not the label itself.
fn forward_value(doc: &Html, label_el: DomNode<'_>, label: &LabelPattern) -> Option<String> {
    for node in dom::text_nodes_after(doc, label_el) {
        if !dom::is_visible(node) {
            continue;
        }
        let Some(raw) = dom::node_text(node) else {
            continue;
        };
        let txt = text::normalize(raw);
        if !txt.is_empty() && !label.exact().is_match(&txt) {
            return Some(txt);
        }
    }
    None
}
