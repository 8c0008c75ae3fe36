//! MoBase-specific modules: HTTP client, document access, extraction
//! pipeline and the canonical record.

pub mod classify;
pub mod client;
pub mod dimensions;
pub mod document;
pub mod extract;
pub mod pipeline;
pub mod record;
pub mod selectors;

pub use client::{FetchError, MobaseClient, ProductFetch};
pub use document::ProductDocument;
pub use pipeline::{extract_attributes, scrape_product, ExtractionPipeline};
pub use record::{Field, ProductRecord};
