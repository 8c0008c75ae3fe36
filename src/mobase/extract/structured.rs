//! Structured-data extraction from the embedded initial-data payload.
//!
//! The payload lives under `product/dataProduct → data → product` and
//! carries a technical-specification list plus a handful of direct
//! scalar properties used as an in-payload fallback. Absence of the
//! payload or of the nested path is normal and yields no writes.
//!
//! Unlike the technical fields, textual metadata (title, description,
//! product link) is taken from this source unconditionally.

use super::{apply_pair, Extractor, Tier};
use crate::mobase::dimensions;
use crate::mobase::document::ProductDocument;
use crate::mobase::record::{Field, ProductRecord};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Site origin used to absolutize payload-relative product links.
const SITE_ORIGIN: &str = "https://www.mymobase.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    localizations: Option<Localizations>,
    #[serde(default)]
    weight: Option<Value>,
    #[serde(default)]
    dimensions: Option<Value>,
    #[serde(default)]
    basic_material: Option<Value>,
    #[serde(default)]
    material_classification: Option<Value>,
    #[serde(default)]
    import_code_number: Option<Value>,
    #[serde(default)]
    additional_material_numbers: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Localizations {
    #[serde(default)]
    technical_specifications: Vec<SpecEntry>,
}

#[derive(Debug, Deserialize)]
struct SpecEntry {
    #[serde(default)]
    key: String,
    #[serde(default)]
    value: Value,
}

pub struct StructuredDataExtractor;

impl Extractor for StructuredDataExtractor {
    fn name(&self) -> &'static str {
        "structured-data"
    }

    fn tier(&self) -> Tier {
        Tier::StructuredData
    }

    fn extract(&self, doc: &ProductDocument, record: &mut ProductRecord) {
        let Some(payload) = product_payload(doc) else {
            debug!("No structured product payload, skipping");
            return;
        };

        // Authoritative for textual metadata: overwrite unconditionally.
        record.set_title(&payload.name);
        record.set_description(&payload.description);
        if !payload.url.trim().is_empty() {
            record.set_product_link(&absolutize(&payload.url));
        }

        if let Some(localizations) = &payload.localizations {
            debug!(
                "Mapping {} technical specification entries",
                localizations.technical_specifications.len()
            );
            for entry in &localizations.technical_specifications {
                if let Some(value) = scalar_to_string(&entry.value) {
                    apply_pair(record, &entry.key, &value);
                }
            }
        }

        // Direct scalar properties fill whatever the list left unset.
        fill_direct(record, Field::Weight, &payload.weight);
        fill_direct(record, Field::Dimensions, &payload.dimensions);
        fill_direct(record, Field::Material, &payload.basic_material);
        fill_direct(record, Field::MaterialClassification, &payload.material_classification);
        fill_direct(record, Field::StatisticalCommodityCode, &payload.import_code_number);
        fill_direct(record, Field::AlternateArticleNumbers, &payload.additional_material_numbers);
    }
}

/// Navigates to the product object and deserializes it, `None` when the
/// payload or the expected path is missing.
fn product_payload(doc: &ProductDocument) -> Option<ProductPayload> {
    let product = doc
        .initial_data()?
        .get("product/dataProduct")?
        .get("data")?
        .get("product")?
        .clone();

    serde_json::from_value(product).ok()
}

fn fill_direct(record: &mut ProductRecord, field: Field, value: &Option<Value>) {
    let Some(value) = value.as_ref().and_then(scalar_to_string) else {
        return;
    };

    if field == Field::Dimensions {
        let normalized = dimensions::normalize(&value);
        record.set_if_unset(field, &normalized);
    } else {
        record.set_if_unset(field, &value);
    }
}

/// Converts a JSON scalar to a non-empty string.
fn scalar_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn absolutize(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{}{}", SITE_ORIGIN, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobase::record::{NOT_FOUND, NOT_RATED};

    fn page_with_payload(product_json: &str) -> String {
        format!(
            r#"<html><body><script>
                window.initialData = {{"product/dataProduct": {{"data": {{"product": {product_json}}}}}}};
            </script></body></html>"#
        )
    }

    fn extract(html: &str) -> ProductRecord {
        let doc = ProductDocument::parse(html);
        let mut record = ProductRecord::new("A2V1", "https://www.mymobase.com/de/p/A2V1");
        StructuredDataExtractor.extract(&doc, &mut record);
        record
    }

    #[test]
    fn test_missing_payload_is_noop() {
        let record = extract("<html><body></body></html>");
        assert_eq!(record.title, NOT_FOUND);
        assert!(!record.has_technical_data());
    }

    #[test]
    fn test_missing_nested_path_is_noop() {
        let record = extract(
            r#"<script>window.initialData = {"cart/data": {"items": []}};</script>"#,
        );
        assert!(!record.has_technical_data());
    }

    #[test]
    fn test_metadata_overwrites_unconditionally() {
        let html = page_with_payload(
            r#"{"name": "Bremsscheibe", "description": "Für Drehgestelle", "url": "/de/p/A2V1"}"#,
        );
        let doc = ProductDocument::parse(&html);
        let mut record = ProductRecord::new("A2V1", "url");
        record.set_title("Old title");
        StructuredDataExtractor.extract(&doc, &mut record);

        assert_eq!(record.title, "Bremsscheibe");
        assert_eq!(record.description, "Für Drehgestelle");
        assert_eq!(record.product_link, "https://www.mymobase.com/de/p/A2V1");
    }

    #[test]
    fn test_technical_specifications_classified() {
        let record = extract(&page_with_payload(
            r#"{"localizations": {"technicalSpecifications": [
                {"key": "Werkstoff", "value": "Stahl"},
                {"key": "Materialklassifizierung", "value": "Nicht schweissbar"},
                {"key": "Abmessungen", "value": "120x45"}
            ]}}"#,
        ));

        assert_eq!(record.material, "Stahl");
        assert_eq!(record.material_classification, "Nicht schweissbar");
        assert_eq!(record.dimensions, "120×45 mm");
        assert_ne!(record.material_classification_assessment, NOT_RATED);
    }

    #[test]
    fn test_direct_properties_fill_gaps_only() {
        let html = page_with_payload(
            r#"{
                "localizations": {"technicalSpecifications": [
                    {"key": "Gewicht", "value": "2,5 kg"}
                ]},
                "weight": 99,
                "basicMaterial": "Aluminium"
            }"#,
        );
        let record = extract(&html);

        // List value wins; direct property only fills what is unset.
        assert_eq!(record.weight, "2,5 kg");
        assert_eq!(record.material, "Aluminium");
    }

    #[test]
    fn test_numeric_direct_property_stringified() {
        let record = extract(&page_with_payload(r#"{"importCodeNumber": 84879059}"#));
        assert_eq!(record.statistical_commodity_code, "84879059");
    }

    #[test]
    fn test_does_not_overwrite_structural_values() {
        let html = page_with_payload(r#"{"basicMaterial": "Aluminium"}"#);
        let doc = ProductDocument::parse(&html);
        let mut record = ProductRecord::new("A2V1", "url");
        record.set_if_unset(Field::Material, "Stahl");
        StructuredDataExtractor.extract(&doc, &mut record);
        assert_eq!(record.material, "Stahl");
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(absolutize("/de/p/A2V1"), "https://www.mymobase.com/de/p/A2V1");
        assert_eq!(absolutize("https://example.com/p"), "https://example.com/p");
    }
}
