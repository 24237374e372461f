//! Heuristic field extraction for listing documents
//!
//! This module turns one parsed ad page into a validated [`ListingRecord`],
//! or a typed [`crate::ExtractError`] when the document does not describe a
//! usable listing. It contains:
//! - the characteristics-block locator (scoring ancestor walk),
//! - the shared label/value primitive with its fallback chain,
//! - the per-attribute extractors,
//! - the all-or-nothing record pipeline.

mod block;
mod fields;
mod record;
mod value;

pub use block::locate_characteristics_block;
pub use fields::{bathrooms, bedrooms, city, energy, price, property_type, rooms, surface};
pub use record::{extract_record, ListingRecord, CSV_HEADER};
pub use value::{extract_value, LabelPattern};
