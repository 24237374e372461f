//! Characteristics-block locator
//!
//! Listing templates vary, but the labeled attribute table always sits near
//! a header reading "Caractéristiques" or "Détails De La Propriété". The
//! locator anchors on that header text and walks up the tree until the
//! surrounding subtree mentions enough attribute keywords to plausibly be
//! the whole block.

use crate::dom::{self, DomNode};
use crate::text;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

static HEADER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"Détails\s+De\s+La\s+Propriété", r"Caractéristiques"]
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("valid header pattern"))
        .collect()
});

/// Keywords counted (as substrings of the lower-cased subtree text) when
/// scoring a candidate ancestor.
const BLOCK_KEYWORDS: [&str; 7] = [
    "type",
    "surface",
    "nb. de pièces",
    "nb. de chambres",
    "nb. de salles de bains",
    "dep",
    "dpe",
];

/// Maximum ancestor levels climbed from the header text.
const MAX_ANCESTOR_LEVELS: usize = 7;

/// Minimum keyword score for an ancestor to be accepted as the block.
const MIN_KEYWORD_SCORE: usize = 3;

/// Finds the subtree most likely to hold the labeled attribute table.
///
/// First match wins: the header phrases are tried in order and the first
/// ancestor reaching the score threshold is returned immediately. When no
/// header or no scoring ancestor exists, the whole document is returned as
/// a low-precision scope; callers treat missing fields inside it as
/// field-level failures, not a locator fault.
pub fn locate_characteristics_block(doc: &Html) -> DomNode<'_> {
    for pattern in HEADER_PATTERNS.iter() {
        let Some(node) = dom::find_text(doc.tree.root(), pattern) else {
            continue;
        };

        let mut tag = node.parent();
        for _ in 0..MAX_ANCESTOR_LEVELS {
            let Some(t) = tag else { break };
            let blob = text::normalize(&dom::subtree_text(t)).to_lowercase();
            let score = BLOCK_KEYWORDS.iter().filter(|k| blob.contains(*k)).count();
            if score >= MIN_KEYWORD_SCORE {
                return t;
            }
            tag = t.parent();
        }
    }

    doc.tree.root()
}
