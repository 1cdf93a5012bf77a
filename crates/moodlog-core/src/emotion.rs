//! The fixed emotion vocabulary shared by posts, AI analyses and reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the ten permitted emotion labels.
///
/// The declaration order is the canonical catalog order; every count or
/// percentage map produced by the report engine contains exactly these ten
/// keys in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmotionLabel {
    Boredom,
    Worried,
    Smile,
    Joyful,
    Happy,
    Angry,
    Shameful,
    Unrest,
    Afraid,
    Sad,
}

impl EmotionLabel {
    /// All catalog labels, in canonical order.
    pub const ALL: [EmotionLabel; 10] = [
        EmotionLabel::Boredom,
        EmotionLabel::Worried,
        EmotionLabel::Smile,
        EmotionLabel::Joyful,
        EmotionLabel::Happy,
        EmotionLabel::Angry,
        EmotionLabel::Shameful,
        EmotionLabel::Unrest,
        EmotionLabel::Afraid,
        EmotionLabel::Sad,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EmotionLabel::Boredom => "Boredom",
            EmotionLabel::Worried => "Worried",
            EmotionLabel::Smile => "Smile",
            EmotionLabel::Joyful => "Joyful",
            EmotionLabel::Happy => "Happy",
            EmotionLabel::Angry => "Angry",
            EmotionLabel::Shameful => "Shameful",
            EmotionLabel::Unrest => "Unrest",
            EmotionLabel::Afraid => "Afraid",
            EmotionLabel::Sad => "Sad",
        }
    }

    /// Whether the label counts toward the positive share used for
    /// Signal/Noise classification.
    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(
            self,
            EmotionLabel::Happy | EmotionLabel::Joyful | EmotionLabel::Smile
        )
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown emotion label: {0}")]
pub struct ParseEmotionError(String);

impl FromStr for EmotionLabel {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmotionLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| ParseEmotionError(s.to_string()))
    }
}

/// Percentage share of positive labels at or above which a post counts as
/// Signal rather than Noise.
pub const SIGNAL_THRESHOLD: f64 = 50.0;

/// Binary classification of a post's overall emotional tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalNoise {
    Signal,
    Noise,
}

impl SignalNoise {
    /// Classify an analyzed emotion breakdown: positive labels summing to at
    /// least [`SIGNAL_THRESHOLD`] percent make the post a Signal.
    #[must_use]
    pub fn classify(emotions: &[(EmotionLabel, f64)]) -> Self {
        let positive_sum: f64 = emotions
            .iter()
            .filter(|(label, _)| label.is_positive())
            .map(|(_, percentage)| percentage)
            .sum();

        if positive_sum >= SIGNAL_THRESHOLD {
            SignalNoise::Signal
        } else {
            SignalNoise::Noise
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SignalNoise::Signal => "Signal",
            SignalNoise::Noise => "Noise",
        }
    }
}

impl fmt::Display for SignalNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalNoise {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Signal" => Ok(SignalNoise::Signal),
            "Noise" => Ok(SignalNoise::Noise),
            other => Err(ParseEmotionError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_ten_labels_in_canonical_order() {
        assert_eq!(EmotionLabel::ALL.len(), 10);
        assert_eq!(EmotionLabel::ALL[0], EmotionLabel::Boredom);
        assert_eq!(EmotionLabel::ALL[9], EmotionLabel::Sad);
    }

    #[test]
    fn labels_round_trip_through_strings() {
        for label in EmotionLabel::ALL {
            assert_eq!(label.as_str().parse::<EmotionLabel>(), Ok(label));
        }
        assert!("Melancholy".parse::<EmotionLabel>().is_err());
    }

    #[test]
    fn positive_labels_are_happy_joyful_smile() {
        let positives: Vec<EmotionLabel> = EmotionLabel::ALL
            .into_iter()
            .filter(|l| l.is_positive())
            .collect();
        assert_eq!(
            positives,
            vec![EmotionLabel::Smile, EmotionLabel::Joyful, EmotionLabel::Happy]
        );
    }

    #[test]
    fn classify_signal_at_threshold() {
        let emotions = [
            (EmotionLabel::Happy, 30.0),
            (EmotionLabel::Smile, 20.0),
            (EmotionLabel::Sad, 50.0),
        ];
        assert_eq!(SignalNoise::classify(&emotions), SignalNoise::Signal);
    }

    #[test]
    fn classify_noise_below_threshold() {
        let emotions = [
            (EmotionLabel::Happy, 25.0),
            (EmotionLabel::Joyful, 24.9),
            (EmotionLabel::Angry, 50.1),
        ];
        assert_eq!(SignalNoise::classify(&emotions), SignalNoise::Noise);
    }

    #[test]
    fn label_serializes_to_bare_string() {
        let json = serde_json::to_string(&EmotionLabel::Unrest).expect("serialize");
        assert_eq!(json, "\"Unrest\"");
    }
}
