//! Count-to-percentage normalization over the fixed emotion catalog.

use std::collections::BTreeMap;

use crate::emotion::EmotionLabel;

/// A counts map with every catalog label initialized to zero.
#[must_use]
pub fn zero_counts() -> BTreeMap<EmotionLabel, i64> {
    EmotionLabel::ALL.into_iter().map(|label| (label, 0)).collect()
}

/// A percentage map with every catalog label initialized to zero.
#[must_use]
pub fn zero_percentages() -> BTreeMap<EmotionLabel, f64> {
    EmotionLabel::ALL.into_iter().map(|label| (label, 0.0)).collect()
}

/// Round half-up to two decimal places, epsilon-adjusted so values sitting
/// exactly on a .xx5 boundary round up rather than flapping on float noise.
#[must_use]
pub fn round2(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

/// Convert a label->count map into a label->percentage map over `total`.
///
/// The result always carries exactly the ten catalog keys. A non-positive
/// `total` yields the all-zero map; labels absent from `counts` stay at zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn normalize(counts: &BTreeMap<EmotionLabel, i64>, total: i64) -> BTreeMap<EmotionLabel, f64> {
    let mut out = zero_percentages();
    if total <= 0 {
        return out;
    }

    for (&label, &count) in counts {
        if count > 0 {
            out.insert(label, round2(count as f64 / total as f64 * 100.0));
        }
    }

    out
}
