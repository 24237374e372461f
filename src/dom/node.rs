//! Single-node queries: text access, visibility, ancestor lookups

use scraper::Node;

/// A node of a parsed document tree.
pub type DomNode<'a> = ego_tree::NodeRef<'a, Node>;

/// Returns the raw text of a text node, or None for any other node kind.
pub fn node_text(node: DomNode<'_>) -> Option<&str> {
    match node.value() {
        Node::Text(t) => Some(&*t.text),
        _ => None,
    }
}

/// Returns true if the node's text would be rendered.
///
/// Text under `<script>`, `<style>` or `<noscript>` matches price- and
/// locality-shaped patterns all the time (JSON-LD payloads especially), so
/// the extractors skip it.
pub fn is_visible(node: DomNode<'_>) -> bool {
    for ancestor in node.ancestors() {
        if let Some(el) = ancestor.value().as_element() {
            if matches!(el.name(), "script" | "style" | "noscript") {
                return false;
            }
        }
    }
    true
}

/// Returns the nearest element ancestor, if any.
pub fn parent_element(node: DomNode<'_>) -> Option<DomNode<'_>> {
    node.ancestors().find(|a| a.value().is_element())
}

/// Returns the nearest `<tr>` ancestor, if any.
pub fn ancestor_table_row(node: DomNode<'_>) -> Option<DomNode<'_>> {
    node.ancestors()
        .find(|a| a.value().as_element().is_some_and(|e| e.name() == "tr"))
}

/// Collects the `<td>`/`<th>` cells beneath a table row, in tree order.
pub fn table_cells(row: DomNode<'_>) -> Vec<DomNode<'_>> {
    row.descendants()
        .filter(|n| {
            n.value()
                .as_element()
                .is_some_and(|e| matches!(e.name(), "td" | "th"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::find_text;
    use once_cell::sync::Lazy;
    use regex::Regex;
    use scraper::Html;

    static WORD: Lazy<Regex> = Lazy::new(|| Regex::new("valeur").unwrap());

    #[test]
    fn test_node_text() {
        let doc = Html::parse_document("<p>valeur</p>");
        let node = find_text(doc.tree.root(), &WORD).unwrap();
        assert_eq!(node_text(node), Some("valeur"));
        assert_eq!(node_text(doc.tree.root()), None);
    }

    #[test]
    fn test_is_visible() {
        let doc = Html::parse_document(
            r#"<body><p>valeur</p><script>var x = "valeur";</script></body>"#,
        );
        let visible = find_text(doc.tree.root(), &WORD).unwrap();
        assert!(is_visible(visible));

        let hidden = crate::dom::text_nodes(&doc)
            .find(|n| node_text(*n).is_some_and(|t| t.contains("var x")))
            .unwrap();
        assert!(!is_visible(hidden));
    }

    #[test]
    fn test_parent_element() {
        let doc = Html::parse_document("<p>valeur</p>");
        let node = find_text(doc.tree.root(), &WORD).unwrap();
        let parent = parent_element(node).unwrap();
        assert_eq!(parent.value().as_element().unwrap().name(), "p");
    }

    #[test]
    fn test_ancestor_table_row_and_cells() {
        let doc = Html::parse_document(
            "<table><tr><th>Type</th><td>valeur</td></tr></table>",
        );
        let node = find_text(doc.tree.root(), &WORD).unwrap();
        let row = ancestor_table_row(node).unwrap();
        let cells = table_cells(row);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].value().as_element().unwrap().name(), "th");
        assert_eq!(cells[1].value().as_element().unwrap().name(), "td");
    }

    #[test]
    fn test_no_table_row() {
        let doc = Html::parse_document("<div><span>valeur</span></div>");
        let node = find_text(doc.tree.root(), &WORD).unwrap();
        assert!(ancestor_table_row(node).is_none());
    }
}
