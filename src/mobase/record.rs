//! Canonical product record and the fixed vocabulary of attribute fields.

use serde::{Deserialize, Serialize};

/// Sentinel for attribute values no extractor has supplied yet.
pub const NOT_FOUND: &str = "Nicht gefunden";
/// Sentinel for the classification assessment field.
pub const NOT_RATED: &str = "Nicht bewertet";
/// Sentinel for availability.
pub const UNKNOWN: &str = "Unbekannt";

/// Status while the record is being filled.
pub const STATUS_PENDING: &str = "Wird verarbeitet...";
/// Status when at least one core technical field was recovered.
pub const STATUS_SUCCESS: &str = "Erfolgreich";
/// Status when no core technical field was recovered.
pub const STATUS_LOW_DATA: &str = "Teilweise erfolgreich - Wenig Daten gefunden";

/// Marker phrase inside a classification value that derives the fixed assessment code.
pub const NOT_WELDABLE_MARKER: &str = "nicht schweiss";
/// Assessment code attached when the not-weldable marker is present.
pub const ASSESSMENT_NOT_WELDABLE: &str = "OHNE/N/N/N/N";

/// Canonical attribute fields that extractors are allowed to write.
///
/// Title, description and product link are not listed here: they follow
/// a different overwrite policy and have dedicated setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Material,
    AlternateArticleNumbers,
    Dimensions,
    Weight,
    MaterialClassification,
    StatisticalCommodityCode,
    CountryOfOrigin,
    Availability,
}

impl Field {
    /// Returns the sentinel this field holds until an extractor sets it.
    pub fn sentinel(self) -> &'static str {
        match self {
            Field::Availability => UNKNOWN,
            _ => NOT_FOUND,
        }
    }

    /// Human-readable name used in trace output.
    pub fn name(self) -> &'static str {
        match self {
            Field::Material => "material",
            Field::AlternateArticleNumbers => "alternateArticleNumbers",
            Field::Dimensions => "dimensions",
            Field::Weight => "weight",
            Field::MaterialClassification => "materialClassification",
            Field::StatisticalCommodityCode => "statisticalCommodityCode",
            Field::CountryOfOrigin => "countryOfOrigin",
            Field::Availability => "availability",
        }
    }
}

/// Canonical record for one product lookup.
///
/// Every field is always present and defaults to its sentinel; consumers
/// never have to distinguish a missing key from an unknown value. The
/// record is filled by the extraction pipeline and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Article number the lookup was made for
    pub identifier: String,
    /// Catalog URL the document was loaded from
    pub source_url: String,
    /// Product title
    pub title: String,
    /// Product description
    pub description: String,
    /// Base material (Werkstoff)
    pub material: String,
    /// Additional/alternate article numbers
    pub alternate_article_numbers: String,
    /// Normalized dimension string
    pub dimensions: String,
    /// Weight as printed on the page
    pub weight: String,
    /// Material classification (Materialklassifizierung)
    pub material_classification: String,
    /// Derived assessment code for the classification
    pub material_classification_assessment: String,
    /// Statistical commodity code (Statistische Warennummer)
    pub statistical_commodity_code: String,
    /// Canonical product link
    pub product_link: String,
    /// Country of origin
    pub country_of_origin: String,
    /// Availability / stock state
    pub availability: String,
    /// Outcome of the extraction pass
    pub status: String,
    /// Error class when the document could not be fetched
    pub error_type: String,
    /// RFC 3339 timestamp of the lookup
    pub scrape_timestamp: String,
}

impl ProductRecord {
    /// Creates a fresh record for one lookup with every field at its sentinel.
    pub fn new(article: &str, url: &str) -> Self {
        Self {
            identifier: article.to_string(),
            source_url: url.to_string(),
            title: NOT_FOUND.to_string(),
            description: NOT_FOUND.to_string(),
            material: NOT_FOUND.to_string(),
            alternate_article_numbers: NOT_FOUND.to_string(),
            dimensions: NOT_FOUND.to_string(),
            weight: NOT_FOUND.to_string(),
            material_classification: NOT_FOUND.to_string(),
            material_classification_assessment: NOT_RATED.to_string(),
            statistical_commodity_code: NOT_FOUND.to_string(),
            product_link: url.to_string(),
            country_of_origin: NOT_FOUND.to_string(),
            availability: UNKNOWN.to_string(),
            status: STATUS_PENDING.to_string(),
            error_type: String::new(),
            scrape_timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Returns the current value of an extractor-writable field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Material => &self.material,
            Field::AlternateArticleNumbers => &self.alternate_article_numbers,
            Field::Dimensions => &self.dimensions,
            Field::Weight => &self.weight,
            Field::MaterialClassification => &self.material_classification,
            Field::StatisticalCommodityCode => &self.statistical_commodity_code,
            Field::CountryOfOrigin => &self.country_of_origin,
            Field::Availability => &self.availability,
        }
    }

    /// True if the field still holds its sentinel.
    pub fn is_unset(&self, field: Field) -> bool {
        let value = self.get(field);
        value.is_empty() || value == field.sentinel()
    }

    /// Writes a value only if the field is still at its sentinel.
    ///
    /// This is the single place the fill-only-if-missing invariant is
    /// enforced; every extractor routes its writes through here. Setting
    /// a classification value containing the not-weldable marker also
    /// derives the fixed assessment code.
    pub fn set_if_unset(&mut self, field: Field, value: &str) {
        let value = value.trim();
        if value.is_empty() || !self.is_unset(field) {
            return;
        }

        if field == Field::MaterialClassification
            && value.to_lowercase().contains(NOT_WELDABLE_MARKER)
            && self.material_classification_assessment == NOT_RATED
        {
            self.material_classification_assessment = ASSESSMENT_NOT_WELDABLE.to_string();
        }

        let slot = match field {
            Field::Material => &mut self.material,
            Field::AlternateArticleNumbers => &mut self.alternate_article_numbers,
            Field::Dimensions => &mut self.dimensions,
            Field::Weight => &mut self.weight,
            Field::MaterialClassification => &mut self.material_classification,
            Field::StatisticalCommodityCode => &mut self.statistical_commodity_code,
            Field::CountryOfOrigin => &mut self.country_of_origin,
            Field::Availability => &mut self.availability,
        };
        *slot = value.to_string();
    }

    /// Overwrites the title unless the replacement is empty.
    pub fn set_title(&mut self, title: &str) {
        let title = title.trim();
        if !title.is_empty() {
            self.title = title.to_string();
        }
    }

    /// Overwrites the description unless the replacement is empty.
    pub fn set_description(&mut self, description: &str) {
        let description = description.trim();
        if !description.is_empty() {
            self.description = description.to_string();
        }
    }

    /// Overwrites the canonical product link unless the replacement is empty.
    pub fn set_product_link(&mut self, link: &str) {
        let link = link.trim();
        if !link.is_empty() {
            self.product_link = link.to_string();
        }
    }

    /// True if at least one of the core technical fields was recovered.
    pub fn has_technical_data(&self) -> bool {
        [Field::Material, Field::MaterialClassification, Field::Weight, Field::Dimensions]
            .into_iter()
            .any(|f| !self.is_unset(f))
    }

    /// Sets the final status from the completeness heuristic.
    pub fn finalize_status(&mut self) {
        self.status = if self.has_technical_data() {
            STATUS_SUCCESS.to_string()
        } else {
            STATUS_LOW_DATA.to_string()
        };
    }

    /// Records a fetch/accessor failure into status and error type.
    pub fn record_failure(&mut self, status: impl Into<String>, error_type: impl Into<String>) {
        self.status = status.into();
        self.error_type = error_type.into();
    }
}
