//! Keyword classifier mapping raw attribute labels to canonical fields.
//!
//! The rule list is an ordered decision table evaluated top to bottom,
//! first match wins. The order is load-bearing: "materialklassifizierung"
//! contains the plain material keyword as a substring, so the
//! classification rule must run before the material rule.

use crate::mobase::record::Field;

/// One row of the decision table: a label matches when it contains any
/// of `any` and none of `none`.
struct Rule {
    any: &'static [&'static str],
    none: &'static [&'static str],
    field: Field,
}

const RULES: &[Rule] = &[
    Rule {
        any: &["abmessung", "größe", "dimension"],
        none: &[],
        field: Field::Dimensions,
    },
    Rule {
        any: &["gewicht", "weight"],
        none: &["einheit"],
        field: Field::Weight,
    },
    // Must precede the plain material rule below.
    Rule {
        any: &["materialklassifizierung", "material classification"],
        none: &[],
        field: Field::MaterialClassification,
    },
    Rule {
        any: &["werkstoff", "material"],
        none: &["klassifizierung", "classification", "weitere", "additional"],
        field: Field::Material,
    },
    Rule {
        any: &[
            "weitere artikelnummer",
            "additional article number",
            "additional material",
            "part number",
        ],
        none: &[],
        field: Field::AlternateArticleNumbers,
    },
    Rule {
        any: &["statistische warennummer", "statistical", "import"],
        none: &[],
        field: Field::StatisticalCommodityCode,
    },
    Rule {
        any: &["ursprungsland", "origin"],
        none: &[],
        field: Field::CountryOfOrigin,
    },
    Rule {
        any: &["verfügbar", "stock", "lager"],
        none: &[],
        field: Field::Availability,
    },
];

/// Maps a raw label to a canonical field, or `None` when no rule matches.
pub fn classify(raw_label: &str) -> Option<Field> {
    let label = raw_label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }

    RULES
        .iter()
        .find(|rule| {
            rule.any.iter().any(|kw| label.contains(kw))
                && !rule.none.iter().any(|kw| label.contains(kw))
        })
        .map(|rule| rule.field)
}

/// True if the label maps to any canonical field at all.
pub fn is_relevant_label(raw_label: &str) -> bool {
    classify(raw_label).is_some()
}
