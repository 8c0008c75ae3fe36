//! CSS selectors for MoBase product pages.
//!
//! This file contains all selectors used by the extraction pipeline.
//! Update this file when the catalog changes its HTML structure.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for page-level metadata.
pub mod page {
    use super::*;

    /// Document title element.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

    /// Meta description.
    pub static META_DESCRIPTION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("meta[name='description']").unwrap());

    /// Script elements scanned for the embedded initial-data payload.
    pub static SCRIPT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("script").unwrap());

    /// Document body, for free-text pattern extraction.
    pub static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());
}

/// Selectors for structural label/value extraction.
pub mod structural {
    use super::*;

    /// All tables on the page.
    pub static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());

    /// Rows within a table.
    pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

    /// Cells within a row; header cells count as labels too.
    pub static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").unwrap());

    /// Definition lists.
    pub static DL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dl").unwrap());

    /// Definition terms.
    pub static DT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dt").unwrap());

    /// Definition descriptions.
    pub static DD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dd").unwrap());

    /// Label-element candidates, tried in order until one matches.
    /// The paired value is always the label's next element sibling.
    pub static LABEL_CANDIDATES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        vec![
            Selector::parse(".label, .field-label, [class*='label']").unwrap(),
            Selector::parse(".spec-name, [class*='spec-name']").unwrap(),
            Selector::parse("strong, b, .bold").unwrap(),
        ]
    });
}

/// Selectors for the last-resort fallback scan.
pub mod fallback {
    use super::*;

    /// Elements whose class or attributes hint at specification content,
    /// scanned for "label: value" text.
    pub static SPEC_HINT: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("[class*='spec'], [class*='detail'], [data-spec]").unwrap()
    });
}
