//! Extraction pipeline: runs every strategy in tier order over one
//! document and finalizes the record status.

use crate::mobase::client::ProductFetch;
use crate::mobase::document::ProductDocument;
use crate::mobase::extract::{default_extractors, Extractor};
use crate::mobase::record::ProductRecord;
use tracing::{debug, info, warn};

/// Suffix the catalog appends to page titles.
const TITLE_SUFFIX: &str = " | MoBase";

/// Ordered set of extraction strategies applied to one document.
///
/// Every pass always runs; later passes are strictly additive because
/// all technical writes go through the fill-only-if-missing primitive.
pub struct ExtractionPipeline {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractionPipeline {
    /// Pipeline with the full default strategy set.
    pub fn new() -> Self {
        Self { extractors: default_extractors() }
    }

    /// Pipeline over an explicit strategy list (kept in the given order).
    pub fn with_extractors(extractors: Vec<Box<dyn Extractor>>) -> Self {
        Self { extractors }
    }

    /// Runs the metadata pass and all extractors, then applies the
    /// completeness heuristic to the status field. Never fails: a
    /// document yielding nothing produces a record full of sentinels.
    pub fn run(&self, doc: &ProductDocument, record: &mut ProductRecord) {
        self.apply_metadata(doc, record);

        for extractor in &self.extractors {
            debug!("Running {} extractor (tier {:?})", extractor.name(), extractor.tier());
            extractor.extract(doc, record);
        }

        record.finalize_status();
        info!("Extraction finished: {}", record.status);
    }

    /// Page title (minus the catalog suffix) and meta description.
    fn apply_metadata(&self, doc: &ProductDocument, record: &mut ProductRecord) {
        if let Some(title) = doc.title() {
            if !title.contains("404") && !title.contains("Not Found") {
                record.set_title(title.trim_end_matches(TITLE_SUFFIX).trim());
            }
        }

        if let Some(description) = doc.meta_description() {
            record.set_description(&description);
        }
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Single extraction entry point: always returns a fully-populated
/// record, never an error.
pub fn extract_attributes(doc: &ProductDocument, article: &str, url: &str) -> ProductRecord {
    let mut record = ProductRecord::new(article, url);
    ExtractionPipeline::new().run(doc, &mut record);
    record
}

/// Fetches one product page and extracts its attributes.
///
/// Fetch failures are encoded into the record's status and error type;
/// the caller always receives a record.
pub async fn scrape_product(client: &impl ProductFetch, article: &str) -> ProductRecord {
    let url = client.product_url(article);

    match client.product_page(article).await {
        Ok(html) => {
            let doc = ProductDocument::parse(&html);
            extract_attributes(&doc, article, &url)
        }
        Err(e) => {
            warn!("Fetch failed for {}: {}", article, e);
            let mut record = ProductRecord::new(article, &url);
            record.record_failure(e.status_text(), e.error_type().unwrap_or_default());
            record
        }
    }
}
