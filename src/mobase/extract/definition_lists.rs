//! Definition-list extraction: dt/dd pairs read in document order.

use super::{apply_pair, Extractor, Tier};
use crate::mobase::document::ProductDocument;
use crate::mobase::record::ProductRecord;
use crate::mobase::selectors::structural;
use tracing::debug;

pub struct DefinitionListExtractor;

impl Extractor for DefinitionListExtractor {
    fn name(&self) -> &'static str {
        "definition-lists"
    }

    fn tier(&self) -> Tier {
        Tier::Structural
    }

    fn extract(&self, doc: &ProductDocument, record: &mut ProductRecord) {
        let lists: Vec<_> = doc.html().select(&structural::DL).collect();
        debug!("Scanning {} definition lists", lists.len());

        for dl in lists {
            let terms: Vec<_> = dl.select(&structural::DT).collect();
            let descriptions: Vec<_> = dl.select(&structural::DD).collect();

            for (dt, dd) in terms.iter().zip(descriptions.iter()) {
                let label = ProductDocument::text_of(*dt);
                let value = ProductDocument::text_of(*dd);
                apply_pair(record, &label, &value);
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
        DefinitionListExtractor.extract(&doc, &mut record);
        record
    }

    #[test]
    fn test_dt_dd_pairs() {
        let record = extract(
            r#"<dl>
                <dt>Werkstoff</dt><dd>Aluminium</dd>
                <dt>Statistische Warennummer</dt><dd>84879059</dd>
            </dl>"#,
        );

        assert_eq!(record.material, "Aluminium");
        assert_eq!(record.statistical_commodity_code, "84879059");
    }

    #[test]
    fn test_unbalanced_list_pairs_by_position() {
        // Extra dt without a dd is ignored
        let record = extract("<dl><dt>Werkstoff</dt><dd>Stahl</dd><dt>Gewicht</dt></dl>");
        assert_eq!(record.material, "Stahl");
        assert!(record.is_unset(crate::mobase::record::Field::Weight));
    }

    #[test]
    fn test_classification_precedence_in_lists() {
        let record = extract(
            "<dl><dt>Materialklassifizierung</dt><dd>Nicht schweissbar</dd></dl>",
        );
        assert_eq!(record.material_classification, "Nicht schweissbar");
        assert!(record.is_unset(crate::mobase::record::Field::Material));
    }
}
