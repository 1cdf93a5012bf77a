//! Report orchestration: validate, resolve, aggregate, bundle, merge.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::emotion::EmotionLabel;
use crate::period::ReportPeriod;
use crate::report::aggregate::EmotionAggregator;
use crate::report::bundle::{ModifiedEmotionBundle, ModifiedEmotionBundler};
use crate::report::store::ReportStore;
use crate::report::ReportError;

/// The complete report payload.
///
/// Field names are the external API contract and stay stable; every field is
/// always present, with zero/empty defaults when a section had no data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionReport {
    pub post_ids: Vec<i64>,
    pub emotion_counts: BTreeMap<EmotionLabel, i64>,
    pub emotion_percentages: BTreeMap<EmotionLabel, f64>,
    pub ai_emotion_percentages: BTreeMap<EmotionLabel, f64>,
    pub modified_emotion_bundles: Vec<ModifiedEmotionBundle>,
}

/// Generates [`EmotionReport`]s over an injected store.
pub struct ReportService<S> {
    store: S,
}

impl<S: ReportStore> ReportService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Generate the emotion report for one user over one period.
    ///
    /// The computation is a pure function of stored state: identical inputs
    /// against unchanged data produce identical reports.
    ///
    /// # Errors
    ///
    /// - [`ReportError::InvalidUserId`] if `user_id` is not positive.
    /// - [`ReportError::UserNotFound`] if no such user exists.
    /// - [`ReportError::InvalidDateSelector`] if the period cannot resolve.
    /// - [`ReportError::Store`] on any data-access failure; no partial
    ///   report is ever returned.
    pub async fn generate(
        &self,
        user_id: i64,
        period: ReportPeriod,
    ) -> Result<EmotionReport, ReportError> {
        if user_id <= 0 {
            return Err(ReportError::InvalidUserId { user_id });
        }
        if self.store.find_user_by_id(user_id).await?.is_none() {
            return Err(ReportError::UserNotFound { user_id });
        }

        let (start, end) = period.date_range()?;

        let aggregates = EmotionAggregator::new(&self.store)
            .aggregate(user_id, start, end)
            .await?;
        let bundles = ModifiedEmotionBundler::new(&self.store)
            .bundle(&aggregates.post_ids)
            .await?;

        Ok(EmotionReport {
            post_ids: aggregates.post_ids,
            emotion_counts: aggregates.emotion_counts,
            emotion_percentages: aggregates.emotion_percentages,
            ai_emotion_percentages: aggregates.ai_emotion_percentages,
            modified_emotion_bundles: bundles,
        })
    }
}
