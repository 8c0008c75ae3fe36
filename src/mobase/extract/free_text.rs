//! Free-text pattern extraction: a fixed battery of labeled regular
//! expressions run against the rendered body text.
//!
//! Each pattern is tied to its target field directly, so the keyword
//! classifier is bypassed. Lowest-confidence textual source; it only
//! ever fills fields still at their sentinel.

use super::{Extractor, Tier};
use crate::mobase::dimensions;
use crate::mobase::document::ProductDocument;
use crate::mobase::record::{Field, ProductRecord};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static PATTERNS: LazyLock<Vec<(Field, Regex)>> = LazyLock::new(|| {
    vec![
        (
            Field::Dimensions,
            Regex::new(r"(?i)(?:abmessung|dimension|größe)[:\s]*([0-9x×,.\s]+(?:mm|cm|m)?)")
                .unwrap(),
        ),
        (
            Field::Weight,
            Regex::new(r"(?i)(?:gewicht|weight)[:\s]*([0-9.,]+\s*(?:kg|g))").unwrap(),
        ),
        (
            Field::Material,
            Regex::new(r"(?i)(?:werkstoff|material)[:\s]*([a-z0-9\s\-.]+?)(?:\n|$)").unwrap(),
        ),
        (
            Field::AlternateArticleNumbers,
            Regex::new(r"(?i)(?:weitere\s+artikelnummer|article\s+number)[:\s]*([a-z0-9\-]+)")
                .unwrap(),
        ),
        (
            Field::MaterialClassification,
            Regex::new(r"(?i)(?:materialklassifizierung|classification)[:\s]*([^0-9\n]+)")
                .unwrap(),
        ),
        (
            Field::StatisticalCommodityCode,
            Regex::new(r"(?i)(?:statistische\s+warennummer|commodity\s+code)[:\s]*([0-9]+)")
                .unwrap(),
        ),
    ]
});

pub struct FreeTextPatternExtractor;

impl Extractor for FreeTextPatternExtractor {
    fn name(&self) -> &'static str {
        "free-text"
    }

    fn tier(&self) -> Tier {
        Tier::TextFallback
    }

    fn extract(&self, doc: &ProductDocument, record: &mut ProductRecord) {
        let body = doc.body_text();
        if body.is_empty() {
            return;
        }

        for (field, pattern) in PATTERNS.iter() {
            let Some(caps) = pattern.captures(&body) else {
                continue;
            };
            let Some(value) = caps.get(1) else {
                continue;
            };

            let value = value.as_str().trim();
            if value.is_empty() {
                continue;
            }

            trace!("Text pattern hit for {}: \"{}\"", field.name(), value);

            if *field == Field::Dimensions {
                let normalized = dimensions::normalize(value);
                record.set_if_unset(*field, &normalized);
            } else {
                record.set_if_unset(*field, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> ProductRecord {
        let doc = ProductDocument::parse(html);
        let mut record = ProductRecord::new("A2V1", "url");
        FreeTextPatternExtractor.extract(&doc, &mut record);
        record
    }

    #[test]
    fn test_weight_pattern() {
        let record = extract("<body><p>Gewicht: 2,5 kg netto</p></body>");
        assert_eq!(record.weight, "2,5 kg");
    }

    #[test]
    fn test_dimension_pattern_normalized() {
        let record = extract("<body><p>Abmessung: 120x45 mm</p></body>");
        assert_eq!(record.dimensions, "120×45 mm");
    }

    #[test]
    fn test_commodity_code_pattern() {
        let record = extract("<body><p>Statistische Warennummer: 84879059</p></body>");
        assert_eq!(record.statistical_commodity_code, "84879059");
    }

    #[test]
    fn test_alternate_number_pattern() {
        let record = extract("<body><p>Weitere Artikelnummer: 7XB3052-0BB10</p></body>");
        assert_eq!(record.alternate_article_numbers, "7XB3052-0BB10");
    }

    #[test]
    fn test_does_not_overwrite_existing_value() {
        let doc = ProductDocument::parse("<body><p>Gewicht: 9 kg</p></body>");
        let mut record = ProductRecord::new("A2V1", "url");
        record.set_if_unset(Field::Weight, "2,5 kg");
        FreeTextPatternExtractor.extract(&doc, &mut record);
        assert_eq!(record.weight, "2,5 kg");
    }

    #[test]
    fn test_no_match_is_noop() {
        let record = extract("<body><p>Unrelated marketing copy.</p></body>");
        assert!(!record.has_technical_data());
    }

    #[test]
    fn test_classification_marker_still_derives_assessment() {
        let record =
            extract("<body><p>Materialklassifizierung: nicht schweissbar geeignet</p></body>");
        assert_eq!(
            record.material_classification_assessment,
            crate::mobase::record::ASSESSMENT_NOT_WELDABLE
        );
    }
}
