//! Normalizer for free-form dimension strings.
//!
//! Recognized shapes, tried in order:
//! 1. compound part notation (lettered prefix and/or comma-separated
//!    groups) joined with `" + "`,
//! 2. diameter×height,
//! 3. three-number L×B×H,
//! 4. two-number L×B.
//!
//! Unrecognized input is returned unchanged; that is not an error.

use regex::Regex;
use std::sync::LazyLock;

/// One dimension group: two or three numbers separated by `x`/`×`,
/// decimals with comma or dot.
static GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[,.]\d+)?)[x×](\d+(?:[,.]\d+)?)(?:[x×](\d+(?:[,.]\d+)?))?").unwrap()
});

static THREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[,.]\d+)?)[x×](\d+(?:[,.]\d+)?)[x×](\d+(?:[,.]\d+)?)").unwrap()
});

static TWO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:[,.]\d+)?)[x×](\d+(?:[,.]\d+)?)").unwrap());

/// Lettered part-type prefix such as "bt" in "BT 3X30X107,3X228".
static LETTER_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+\d").unwrap());

static STRIP_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+").unwrap());

/// Normalizes a raw size string into one of the canonical shapes.
///
/// Idempotent over its own output: canonical strings re-normalize to
/// themselves.
pub fn normalize(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let cleaned = cleaned.to_lowercase();
    if cleaned.is_empty() {
        return raw.to_string();
    }

    // Compound part notation. The '+' trigger keeps already-joined
    // output stable under re-normalization. A comma can also be a
    // decimal separator, so the branch only commits when the input
    // actually holds several dimension groups; otherwise the
    // rectangular rules below handle the comma as a decimal.
    if cleaned.contains(',') || cleaned.contains('+') || LETTER_PREFIX.is_match(&cleaned) {
        if let Some(joined) = normalize_compound(&cleaned) {
            return joined;
        }
    }

    // Diameter×height. "durchmesser" is accepted alongside the symbol so
    // canonical output re-enters this branch.
    if cleaned.contains('⌀') || cleaned.contains('ø') || cleaned.contains("durchmesser") {
        if let Some(caps) = TWO.captures(&cleaned) {
            return format!("Durchmesser×Höhe: {}×{} mm", &caps[1], &caps[2]);
        }
    }

    if let Some(caps) = THREE.captures(&cleaned) {
        return format!("{}×{}×{} mm", &caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = TWO.captures(&cleaned) {
        return format!("{}×{} mm", &caps[1], &caps[2]);
    }

    raw.to_string()
}

/// Extracts every dimension group from each comma segment and joins them.
///
/// `None` unless at least two groups were found: a lone group means the
/// comma was a decimal separator, not a part divider.
fn normalize_compound(cleaned: &str) -> Option<String> {
    let stripped = STRIP_PREFIX.replace(cleaned, "");

    let mut groups = Vec::new();
    for part in stripped.split(',') {
        for caps in GROUP.captures_iter(part) {
            let numbers: Vec<&str> =
                caps.iter().skip(1).flatten().map(|m| m.as_str()).collect();
            groups.push(numbers.join("×"));
        }
    }

    if groups.len() < 2 {
        None
    } else {
        Some(format!("{} mm", groups.join(" + ")))
    }
}
