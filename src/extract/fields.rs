//! Per-attribute extractors
//!
//! Three fields are record-fatal: city, property type and price. The other
//! five degrade to the `-` sentinel when missing or unparseable.

use crate::dom::{self, DomNode};
use crate::extract::value::{extract_value, LabelPattern};
use crate::text;
use crate::{ExtractError, ExtractResult};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

/// Sale marker anchoring the price and locality searches near the listing
/// headline instead of the page chrome.
static SALE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bà vendre\b").unwrap());

/// A run of digits (with ordinary or non-breaking spaces) next to a euro
/// sign, in either order.
static EURO_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"€\s*[\d\s\x{a0}]+|[\d\s\x{a0}]+€").unwrap());

static LOCALITY_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)France,\s").unwrap());

static ENERGY_GRADE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b([A-G])\b").unwrap());

static TYPE_LABEL: Lazy<LabelPattern> = Lazy::new(|| LabelPattern::new("Type", r"Type"));

static SURFACE_LABEL: Lazy<LabelPattern> = Lazy::new(|| LabelPattern::new("Surface", r"Surface"));

static ROOMS_LABEL: Lazy<LabelPattern> = Lazy::new(|| {
    LabelPattern::new("Nb. de pièces", r"Nb\.\s*de\s*pièces|Nombre\s+de\s*pièces")
});

static BEDROOMS_LABEL: Lazy<LabelPattern> = Lazy::new(|| {
    LabelPattern::new("Nb. de chambres", r"Nb\.\s*de\s*chambres|Nombre\s+de\s*chambres")
});

static BATHROOMS_LABEL: Lazy<LabelPattern> = Lazy::new(|| {
    LabelPattern::new("Nb. de salles de bains", r"Nb\.\s*de\s*salles?\s*de\s*bains?")
});

static ENERGY_LABEL: Lazy<LabelPattern> =
    Lazy::new(|| LabelPattern::new("DPE", r"DEP|DPE|Consommation\s+d'?énergie"));

/// Price floor below which a listing is rejected as not a real sale.
const PRICE_FLOOR_EUR: u64 = 10_000;

/// Candidate cap for the locality search.
const MAX_LOCALITY_CANDIDATES: usize = 10;

/// Extracts the price in euros as a digit-only string.
///
/// Anchors on the sale marker and takes the first visible euro-shaped text
/// after it, falling back to a whole-document scan. Record-fatal: fails when
/// nothing matches, the match has no digits, or the value is below the
/// floor.
pub fn price(doc: &Html) -> ExtractResult<String> {
    let marker = dom::find_text(doc.tree.root(), &SALE_MARKER);

    let price_node = marker
        .and_then(|m| {
            dom::text_nodes_after(doc, m)
                .filter(|n| dom::is_visible(*n))
                .find(|n| dom::node_text(*n).is_some_and(|t| EURO_AMOUNT.is_match(t)))
        })
        .or_else(|| {
            dom::text_nodes(doc)
                .filter(|n| dom::is_visible(*n))
                .find(|n| dom::node_text(*n).is_some_and(|t| EURO_AMOUNT.is_match(t)))
        });

    let Some(node) = price_node else {
        return Err(ExtractError::PriceNotFound);
    };

    let raw = dom::node_text(node).unwrap_or_default().trim().to_string();
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ExtractError::PriceUnreadable(raw));
    }

    match digits.parse::<u64>() {
        Ok(v) if v >= PRICE_FLOOR_EUR => Ok(digits),
        Ok(_) => Err(ExtractError::PriceBelowFloor(digits)),
        Err(_) => Err(ExtractError::PriceUnreadable(raw)),
    }
}

/// Extracts the city from the best postal-address candidate.
///
/// Candidates are visible texts matching the locale marker after the sale
/// marker (or anywhere, lacking one), filtered against URL/JSON fragments
/// and required to carry at least three commas. The shortest candidate wins
/// and the city is whatever follows its last `", "`. Record-fatal.
pub fn city(doc: &Html) -> ExtractResult<String> {
    let marker = dom::find_text(doc.tree.root(), &SALE_MARKER);

    let nodes: Box<dyn Iterator<Item = DomNode<'_>> + '_> = match marker {
        Some(m) => Box::new(dom::text_nodes_after(doc, m)),
        None => Box::new(dom::text_nodes(doc)),
    };

    let mut candidates: Vec<String> = Vec::new();
    for node in nodes {
        if !dom::is_visible(node) {
            continue;
        }
        let Some(raw) = dom::node_text(node) else {
            continue;
        };
        if !LOCALITY_MARKER.is_match(raw) {
            continue;
        }

        let txt = text::normalize(raw);

        // JSON-LD payloads and templating leftovers match the locale marker
        // too; a real postal address carries none of these.
        if txt.contains("http") || txt.contains("\"url\"") || txt.contains('{') || txt.contains('}')
        {
            continue;
        }
        if txt.matches(',').count() < 3 {
            continue;
        }

        candidates.push(txt);
        if candidates.len() >= MAX_LOCALITY_CANDIDATES {
            break;
        }
    }

    let Some(best) = candidates
        .into_iter()
        .reduce(|best, c| if c.len() < best.len() { c } else { best })
    else {
        return Err(ExtractError::LocalityNotFound);
    };

    let Some(idx) = best.rfind(", ") else {
        return Err(ExtractError::LocalityFormat(best));
    };
    if idx + 2 >= best.len() {
        return Err(ExtractError::LocalityFormat(best));
    }
    Ok(best[idx + 2..].trim().to_string())
}

/// Extracts the property type. Record-fatal unless the value is exactly
/// "Maison" or "Appartement".
pub fn property_type(doc: &Html, block: DomNode<'_>) -> ExtractResult<String> {
    let t = text::normalize(&extract_value(doc, block, &TYPE_LABEL)?);
    if t == "Maison" || t == "Appartement" {
        Ok(t)
    } else {
        Err(ExtractError::TypeNotAllowed(t))
    }
}

/// Surface in square meters, or `-`.
pub fn surface(doc: &Html, block: DomNode<'_>) -> String {
    optional_digits(doc, block, &SURFACE_LABEL)
}

/// Room count, or `-`.
pub fn rooms(doc: &Html, block: DomNode<'_>) -> String {
    optional_digits(doc, block, &ROOMS_LABEL)
}

/// Bedroom count, or `-`.
pub fn bedrooms(doc: &Html, block: DomNode<'_>) -> String {
    optional_digits(doc, block, &BEDROOMS_LABEL)
}

/// Bathroom count, or `-`.
pub fn bathrooms(doc: &Html, block: DomNode<'_>) -> String {
    optional_digits(doc, block, &BATHROOMS_LABEL)
}

/// Energy rating: the first standalone A–G letter in the value, uppercased.
///
/// An unexpected format is returned as-is rather than failing; a missing
/// label degrades to `-`.
pub fn energy(doc: &Html, block: DomNode<'_>) -> String {
    let raw = match extract_value(doc, block, &ENERGY_LABEL) {
        Ok(v) => text::normalize(&v),
        Err(_) => return "-".to_string(),
    };
    if raw.is_empty() || raw == "-" {
        return "-".to_string();
    }

    match ENERGY_GRADE.captures(&raw) {
        Some(caps) => caps[1].to_uppercase(),
        None => raw,
    }
}

fn optional_digits(doc: &Html, block: DomNode<'_>, label: &LabelPattern) -> String {
    match extract_value(doc, block, label) {
        Ok(raw) => text::digits_or_dash(&raw),
        Err(_) => "-".to_string(),
    }
}
