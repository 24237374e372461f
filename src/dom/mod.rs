//! Document-tree helpers over [`scraper::Html`]
//!
//! The extraction heuristics need queries the CSS selector API does not
//! offer: text-node iteration in document order, nearest-ancestor lookups,
//! table-row cell collection, and a visibility filter that excludes text
//! rendered inside `<script>`, `<style>` and `<noscript>`. These helpers
//! work directly on the `ego_tree` backing the parsed document.

mod node;
mod walk;

pub use node::{ancestor_table_row, is_visible, node_text, parent_element, table_cells, DomNode};
pub use walk::{find_text, subtree_text, text_nodes, text_nodes_after};
