//! Last-resort generic scan: re-walks tables and definition lists and
//! additionally reads "label: value" text out of elements whose class
//! hints at specification content.

use super::{apply_pair, Extractor, Tier};
use crate::mobase::document::ProductDocument;
use crate::mobase::record::ProductRecord;
use crate::mobase::selectors::{fallback, structural};
use tracing::debug;

pub struct HtmlFallbackExtractor;

impl Extractor for HtmlFallbackExtractor {
    fn name(&self) -> &'static str {
        "html-fallback"
    }

    fn tier(&self) -> Tier {
        Tier::TextFallback
    }

    fn extract(&self, doc: &ProductDocument, record: &mut ProductRecord) {
        // Tables and definition lists again; anything tier 1 already
        // classified is protected by the fill-only rule.
        for table in doc.html().select(&structural::TABLE) {
            for row in table.select(&structural::ROW) {
                let cells: Vec<_> = row.select(&structural::CELL).collect();
                if cells.len() < 2 {
                    continue;
                }
                let label = ProductDocument::text_of(cells[0]);
                let value = ProductDocument::text_of(cells[1]);
                apply_pair(record, &label, &value);
            }
        }

        for dl in doc.html().select(&structural::DL) {
            let terms: Vec<_> = dl.select(&structural::DT).collect();
            let descriptions: Vec<_> = dl.select(&structural::DD).collect();
            for (dt, dd) in terms.iter().zip(descriptions.iter()) {
                apply_pair(record, &ProductDocument::text_of(*dt), &ProductDocument::text_of(*dd));
            }
        }

        let hinted: Vec<_> = doc.html().select(&fallback::SPEC_HINT).collect();
        debug!("Scanning {} spec-hinted elements", hinted.len());

        for element in hinted {
            let text = ProductDocument::text_of(element);
            let Some((label, value)) = text.split_once(':') else {
                continue;
            };
            apply_pair(record, label, value);
        }
    }
}
