//! Year/month emotion statistics over a user's posts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::try_join;
use serde::Serialize;

use crate::emotion::EmotionLabel;
use crate::percentages::{normalize, zero_counts, zero_percentages};
use crate::report::store::{EmotionCount, ReportStore};
use crate::report::ReportError;

/// Aggregated emotion statistics for one user and date range.
///
/// Every field is always present: count and percentage maps carry all ten
/// catalog keys (zeros allowed) regardless of what the range contained.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAggregates {
    pub post_ids: Vec<i64>,
    pub emotion_counts: BTreeMap<EmotionLabel, i64>,
    pub emotion_percentages: BTreeMap<EmotionLabel, f64>,
    pub ai_emotion_percentages: BTreeMap<EmotionLabel, f64>,
}

impl EmotionAggregates {
    /// The aggregate of an empty post range: no ids, all maps zero-filled.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            post_ids: Vec::new(),
            emotion_counts: zero_counts(),
            emotion_percentages: zero_percentages(),
            ai_emotion_percentages: zero_percentages(),
        }
    }
}

/// Computes [`EmotionAggregates`] against an injected store.
pub struct EmotionAggregator<'a, S> {
    store: &'a S,
}

impl<'a, S: ReportStore> EmotionAggregator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Aggregate emotion statistics for the user's non-deleted posts dated
    /// within `[start, end)`.
    ///
    /// An empty range short-circuits to [`EmotionAggregates::empty`] without
    /// touching the emotion tables. Otherwise the user-selected counting and
    /// the AI-analyzed counting run concurrently and are joined before the
    /// result is assembled.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Store`] if any underlying query fails.
    pub async fn aggregate(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<EmotionAggregates, ReportError> {
        let post_ids = self
            .store
            .find_post_ids_by_user_and_range(user_id, start, end)
            .await?;
        if post_ids.is_empty() {
            return Ok(EmotionAggregates::empty());
        }

        let ((emotion_counts, emotion_percentages), ai_emotion_percentages) = try_join!(
            self.selected_emotion_breakdown(&post_ids),
            self.ai_emotion_breakdown(&post_ids),
        )?;

        Ok(EmotionAggregates {
            post_ids,
            emotion_counts,
            emotion_percentages,
            ai_emotion_percentages,
        })
    }

    async fn selected_emotion_breakdown(
        &self,
        post_ids: &[i64],
    ) -> Result<(BTreeMap<EmotionLabel, i64>, BTreeMap<EmotionLabel, f64>), ReportError> {
        let rows = self.store.group_emotion_counts_by_post_ids(post_ids).await?;
        let (counts, total) = tally(&rows);
        let percentages = normalize(&counts, total);
        Ok((counts, percentages))
    }

    async fn ai_emotion_breakdown(
        &self,
        post_ids: &[i64],
    ) -> Result<BTreeMap<EmotionLabel, f64>, ReportError> {
        let analysis_ids = self
            .store
            .find_ai_analysis_ids_by_post_ids(post_ids)
            .await?;
        if analysis_ids.is_empty() {
            return Ok(zero_percentages());
        }

        let rows = self
            .store
            .group_ai_emotion_counts_by_analysis_ids(&analysis_ids)
            .await?;
        let (counts, total) = tally(&rows);
        Ok(normalize(&counts, total))
    }
}

/// Fold grouped-count rows into a zero-filled catalog map and a grand total.
fn tally(rows: &[EmotionCount]) -> (BTreeMap<EmotionLabel, i64>, i64) {
    let mut counts = zero_counts();
    let mut total = 0;

    for row in rows {
        if let Some(slot) = counts.get_mut(&row.label) {
            *slot += row.count;
            total += row.count;
        }
    }

    (counts, total)
}
