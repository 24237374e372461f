//! The listing record and its all-or-nothing extraction pipeline

use crate::extract::block::locate_characteristics_block;
use crate::extract::fields;
use crate::ExtractResult;
use scraper::Html;

/// Column names of the output CSV, in record field order.
pub const CSV_HEADER: [&str; 8] = [
    "Ville",
    "Type",
    "Surface",
    "NbrPieces",
    "NbrChambres",
    "NbrSdb",
    "DPE",
    "Prix",
];

/// One fully validated listing.
///
/// Numeric fields hold digit-only strings or the `-` sentinel; `city`,
/// `property_type` and `price` are always populated since their absence
/// aborts extraction. Built only by [`extract_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub city: String,
    pub property_type: String,
    pub surface: String,
    pub rooms: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub energy: String,
    pub price: String,
}

impl ListingRecord {
    /// The record as an ordered row, matching [`CSV_HEADER`].
    pub fn fields(&self) -> [&str; 8] {
        [
            &self.city,
            &self.property_type,
            &self.surface,
            &self.rooms,
            &self.bedrooms,
            &self.bathrooms,
            &self.energy,
            &self.price,
        ]
    }
}

/// Runs every field extractor against one ad document.
///
/// Evaluation order is fixed: city, type, surface, rooms, bedrooms,
/// bathrooms, energy, price. The first failure of a record-fatal field
/// (city, type, price) aborts the whole record; the optional fields degrade
/// to `-` internally and never abort.
pub fn extract_record(doc: &Html) -> ExtractResult<ListingRecord> {
    let block = locate_characteristics_block(doc);

    Ok(ListingRecord {
        city: fields::city(doc)?,
        property_type: fields::property_type(doc, block)?,
        surface: fields::surface(doc, block),
        rooms: fields::rooms(doc, block),
        bedrooms: fields::bedrooms(doc, block),
        bathrooms: fields::bathrooms(doc, block),
        energy: fields::energy(doc, block),
        price: fields::price(doc)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractError;

    fn full_ad(dpe_row: &str, kind: &str, price: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><head><title>Annonce</title></head><body>
            <h1>{kind} à vendre</h1>
            <p>France, 12 Rue Exemple, 33000, Bordeaux</p>
            <div>
              <h2>Caractéristiques</h2>
              <table>
                <tr><th>Type</th><td>{kind}</td></tr>
                <tr><th>Surface</th><td>85 m²</td></tr>
                <tr><th>Nb. de pièces</th><td>4</td></tr>
                <tr><th>Nb. de chambres</th><td>2</td></tr>
                <tr><th>Nb. de salles de bains</th><td>1</td></tr>
                {dpe_row}
              </table>
            </div>
            <div class="price">{price} €</div>
            </body></html>"#
        ))
    }

    #[test]
    fn test_complete_record() {
        let doc = full_ad("<tr><th>DPE</th><td>C</td></tr>", "Maison", "250 000");
        let record = extract_record(&doc).unwrap();
        assert_eq!(
            record.fields(),
            ["Bordeaux", "Maison", "85", "4", "2", "1", "C", "250000"]
        );
    }

    #[test]
    fn test_missing_energy_degrades_not_aborts() {
        let doc = full_ad("", "Appartement", "185 000");
        let record = extract_record(&doc).unwrap();
        assert_eq!(record.energy, "-");
        assert_eq!(record.city, "Bordeaux");
        assert_eq!(record.property_type, "Appartement");
        assert_eq!(record.price, "185000");
    }

    #[test]
    fn test_disallowed_type_aborts() {
        let doc = full_ad("", "Terrain", "250 000");
        assert!(matches!(
            extract_record(&doc),
            Err(ExtractError::TypeNotAllowed(_))
        ));
    }

    #[test]
    fn test_low_price_aborts() {
        let doc = full_ad("", "Maison", "5 000");
        assert!(matches!(
            extract_record(&doc),
            Err(ExtractError::PriceBelowFloor(_))
        ));
    }

    #[test]
    fn test_missing_city_aborts() {
        let doc = Html::parse_document(
            r#"<h1>Maison à vendre</h1>
            <div><h2>Caractéristiques</h2><table>
            <tr><th>Type</th><td>Maison</td></tr>
            <tr><th>Surface</th><td>85 m²</td></tr>
            <tr><th>Nb. de pièces</th><td>4</td></tr>
            </table></div>
            <p>250 000 €</p>"#,
        );
        assert!(matches!(
            extract_record(&doc),
            Err(ExtractError::LocalityNotFound)
        ));
    }
}
