//! Extraction strategies behind a common trait.
//!
//! Each extractor consumes the parsed document and writes into the
//! staging record through [`ProductRecord::set_if_unset`], so a field
//! set by an earlier (higher-confidence) tier is never overwritten by a
//! later one.

pub mod definition_lists;
pub mod free_text;
pub mod html_fallback;
pub mod label_value;
pub mod structured;
pub mod tables;

use crate::mobase::classify;
use crate::mobase::dimensions;
use crate::mobase::document::ProductDocument;
use crate::mobase::record::{Field, ProductRecord};
use tracing::trace;

pub use definition_lists::DefinitionListExtractor;
pub use free_text::FreeTextPatternExtractor;
pub use html_fallback::HtmlFallbackExtractor;
pub use label_value::LabelValueExtractor;
pub use structured::StructuredDataExtractor;
pub use tables::TableExtractor;

/// Confidence tier of an extractor. Lower tiers run first and their
/// values are never overwritten by higher-numbered tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// Structural table / definition-list / label-value extraction.
    Structural = 1,
    /// Embedded initial-data payload.
    StructuredData = 2,
    /// Free-text patterns and the generic HTML fallback scan.
    TextFallback = 3,
}

/// One extraction strategy.
pub trait Extractor: Send + Sync {
    /// Name used in trace output.
    fn name(&self) -> &'static str;

    /// Confidence tier of this strategy.
    fn tier(&self) -> Tier;

    /// Runs the strategy against the document, filling unset fields.
    fn extract(&self, doc: &ProductDocument, record: &mut ProductRecord);
}

/// The full strategy set in pass order.
pub fn default_extractors() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(TableExtractor),
        Box::new(DefinitionListExtractor),
        Box::new(LabelValueExtractor),
        Box::new(StructuredDataExtractor),
        Box::new(FreeTextPatternExtractor),
        Box::new(HtmlFallbackExtractor),
    ]
}

/// Classifies one raw label/value pair and writes it into the record.
///
/// Pairs with an empty value or a label shorter than three characters
/// are discarded. Dimension-shaped values are normalized before the
/// write; everything else is stored verbatim.
pub(crate) fn apply_pair(record: &mut ProductRecord, label: &str, value: &str) {
    let label = label.trim();
    let value = value.trim();

    if label.chars().count() < 3 || value.is_empty() || value == "-" {
        return;
    }

    let Some(field) = classify::classify(label) else {
        trace!("Unclassified label: \"{}\" = \"{}\"", label, value);
        return;
    };

    if field == Field::Dimensions {
        let normalized = dimensions::normalize(value);
        record.set_if_unset(field, &normalized);
    } else {
        record.set_if_unset(field, value);
    }

    trace!("{} <- \"{}\" (label \"{}\")", field.name(), record.get(field), label);
}
