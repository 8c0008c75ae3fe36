//! Label/value sibling extraction: label elements paired with their next
//! element sibling.
//!
//! Candidate label selectors are tried in order; the first one that
//! matches anything on the page is used. The last candidate (strong/b)
//! is broad, so labels are additionally checked for relevance before the
//! sibling text is taken as a value.

use super::{apply_pair, Extractor, Tier};
use crate::mobase::classify;
use crate::mobase::document::ProductDocument;
use crate::mobase::record::ProductRecord;
use crate::mobase::selectors::structural;
use scraper::ElementRef;
use tracing::debug;

pub struct LabelValueExtractor;

impl Extractor for LabelValueExtractor {
    fn name(&self) -> &'static str {
        "label-value"
    }

    fn tier(&self) -> Tier {
        Tier::Structural
    }

    fn extract(&self, doc: &ProductDocument, record: &mut ProductRecord) {
        for selector in structural::LABEL_CANDIDATES.iter() {
            let labels: Vec<_> = doc.html().select(selector).collect();
            if labels.is_empty() {
                continue;
            }

            debug!("Label candidate matched {} elements", labels.len());

            for label_el in labels {
                let label = ProductDocument::text_of(label_el);
                if !classify::is_relevant_label(&label) {
                    continue;
                }

                if let Some(value_el) = next_element_sibling(label_el) {
                    let value = ProductDocument::text_of(value_el);
                    apply_pair(record, &label, &value);
                }
            }

            break;
        }
    }
}

fn next_element_sibling(element: ElementRef) -> Option<ElementRef> {
    element.next_siblings().find_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobase::record::NOT_FOUND;

    fn extract(html: &str) -> ProductRecord {
        let doc = ProductDocument::parse(html);
        let mut record = ProductRecord::new("A2V1", "url");
        LabelValueExtractor.extract(&doc, &mut record);
        record
    }

    #[test]
    fn test_class_label_with_sibling_value() {
        let record = extract(
            r#"<div>
                <span class="field-label">Gewicht</span>
                <span class="field-value">4,2 kg</span>
            </div>"#,
        );
        assert_eq!(record.weight, "4,2 kg");
    }

    #[test]
    fn test_strong_label_fallback_candidate() {
        let record = extract("<p><strong>Werkstoff</strong> <span>Gusseisen</span></p>");
        assert_eq!(record.material, "Gusseisen");
    }

    #[test]
    fn test_irrelevant_labels_skipped() {
        let record = extract("<p><strong>Lieferzeit</strong> <span>3 Tage</span></p>");
        assert!(!record.has_technical_data());
    }

    #[test]
    fn test_label_without_sibling() {
        let record = extract(r#"<div><span class="label">Gewicht</span></div>"#);
        assert_eq!(record.weight, NOT_FOUND);
    }

    #[test]
    fn test_first_matching_candidate_wins() {
        // A page with .label elements must not fall through to the
        // broad strong/b candidate.
        let record = extract(
            r#"<div>
                <span class="label">Gewicht</span><span>1 kg</span>
                <strong>Gewicht</strong><span>9 kg</span>
            </div>"#,
        );
        assert_eq!(record.weight, "1 kg");
    }

    #[test]
    fn test_dimension_normalized_through_sibling_pair() {
        let record = extract(
            r#"<span class="spec-name">Abmessung</span><span class="spec-value">⌀25x10</span>"#,
        );
        assert_eq!(record.dimensions, "Durchmesser×Höhe: 25×10 mm");
    }
}
