//! URL discovery on listing pages
//!
//! Two scans over the same page: one for ad-detail links, one for the
//! pagination link. Relative targets are resolved against the page URL
//! before matching.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Path shape of an ad-detail page: `/annonce-<slug>/<numeric-id>`.
static AD_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)/annonce-[^/]+/\d+").unwrap());

/// Collects the ad-detail URLs linked from a listing page.
///
/// Every hyperlink is resolved against `page_url`; those whose resolved
/// path matches the ad shape are kept. The result is an ordered set, so the
/// controller visits ads deterministically and duplicates on the same page
/// collapse for free.
pub fn discover_ad_links(doc: &Html, page_url: &Url) -> BTreeSet<String> {
    let mut urls = BTreeSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in doc.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Ok(resolved) = page_url.join(href) else {
                continue;
            };
            if AD_PATH.is_match(resolved.path()) {
                urls.insert(resolved.to_string());
            }
        }
    }

    urls
}

/// Finds the next listing page, if any.
///
/// Preference order: a link carrying `rel="next"`, then the first link
/// whose visible text contains "suivant", then the first link whose class
/// or id attributes contain "next". Absent all three, pagination is
/// terminal.
pub fn discover_next_page(doc: &Html, page_url: &Url) -> Option<Url> {
    let selector = Selector::parse("a[href]").ok()?;

    for element in doc.select(&selector) {
        if let Some(rel) = element.value().attr("rel") {
            if rel
                .split_whitespace()
                .any(|token| token.eq_ignore_ascii_case("next"))
            {
                if let Some(url) = resolve_href(element.value().attr("href"), page_url) {
                    return Some(url);
                }
            }
        }
    }

    for element in doc.select(&selector) {
        let label = crate::text::normalize(&element.text().collect::<String>()).to_lowercase();
        if label.contains("suivant") {
            if let Some(url) = resolve_href(element.value().attr("href"), page_url) {
                return Some(url);
            }
        }
    }

    for element in doc.select(&selector) {
        let value = element.value();
        let mut attrs: String = value.classes().collect::<Vec<_>>().join(" ");
        if let Some(id) = value.id() {
            attrs.push(' ');
            attrs.push_str(id);
        }
        if attrs.to_lowercase().contains("next") {
            if let Some(url) = resolve_href(value.attr("href"), page_url) {
                return Some(url);
            }
        }
    }

    None
}

fn resolve_href(href: Option<&str>, page_url: &Url) -> Option<Url> {
    page_url.join(href?).ok()
}
