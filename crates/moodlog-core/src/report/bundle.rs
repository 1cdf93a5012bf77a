//! Bundles of user-corrected emotions and their one-line notes.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::emotion::EmotionLabel;
use crate::report::store::ReportStore;
use crate::report::ReportError;

/// Everything the report exposes about one post the user re-tagged: the
/// corrected labels, the baseline labels they replaced, and the post's
/// de-duplicated one-line notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedEmotionBundle {
    pub post_id: i64,
    pub one_line_contents: Vec<String>,
    pub modified_true_emotions: Vec<EmotionLabel>,
    pub modified_false_emotions: Vec<EmotionLabel>,
}

/// Assembles [`ModifiedEmotionBundle`]s against an injected store.
pub struct ModifiedEmotionBundler<'a, S> {
    store: &'a S,
}

impl<'a, S: ReportStore> ModifiedEmotionBundler<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// One bundle per post in `post_ids` that carries at least one
    /// user-corrected emotion record, ordered by post id descending.
    ///
    /// Note contents are de-duplicated per post; a post with corrections but
    /// no notes still gets a bundle with an empty contents list. Baseline
    /// labels are fetched only for the posts that actually had corrections.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Store`] if any underlying query fails.
    pub async fn bundle(
        &self,
        post_ids: &[i64],
    ) -> Result<Vec<ModifiedEmotionBundle>, ReportError> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self
            .store
            .find_modified_emotion_records_with_notes(post_ids)
            .await?;

        let mut by_post: BTreeMap<i64, (BTreeSet<String>, Vec<EmotionLabel>)> = BTreeMap::new();
        for row in rows {
            let (notes, labels) = by_post.entry(row.post_id).or_default();
            labels.push(row.label);
            notes.extend(row.note_contents);
        }

        if by_post.is_empty() {
            return Ok(Vec::new());
        }

        let corrected_ids: Vec<i64> = by_post.keys().copied().collect();
        let baseline_rows = self
            .store
            .find_baseline_emotion_records(&corrected_ids)
            .await?;

        let mut baseline_by_post: BTreeMap<i64, Vec<EmotionLabel>> = BTreeMap::new();
        for row in baseline_rows {
            baseline_by_post
                .entry(row.post_id)
                .or_default()
                .push(row.label);
        }

        let bundles = by_post
            .into_iter()
            .rev()
            .map(|(post_id, (notes, labels))| ModifiedEmotionBundle {
                post_id,
                one_line_contents: notes.into_iter().collect(),
                modified_true_emotions: labels,
                modified_false_emotions: baseline_by_post.remove(&post_id).unwrap_or_default(),
            })
            .collect();

        Ok(bundles)
    }
}
