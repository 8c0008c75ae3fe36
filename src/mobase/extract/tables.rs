//! Table-based extraction: the first two cells of every row are read as
//! a label/value pair.

use super::{apply_pair, Extractor, Tier};
use crate::mobase::document::ProductDocument;
use crate::mobase::record::ProductRecord;
use crate::mobase::selectors::structural;
use tracing::debug;

pub struct TableExtractor;

impl Extractor for TableExtractor {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn tier(&self) -> Tier {
        Tier::Structural
    }

    fn extract(&self, doc: &ProductDocument, record: &mut ProductRecord) {
        let tables: Vec<_> = doc.html().select(&structural::TABLE).collect();
        debug!("Scanning {} tables", tables.len());

        for table in tables {
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
    }
}
