use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use moodlog_core::{EmotionLabel, SignalNoise};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalysisBody {
    pub emotions: Vec<AnalyzedEmotionBody>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzedEmotionBody {
    pub label: String,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalysisData {
    pub post_id: i64,
    pub analysis_id: i64,
    pub signal_noise: SignalNoise,
}

/// Persist an externally produced emotion analysis for a post.
///
/// The Signal/Noise verdict is derived server-side from the submitted
/// breakdown; resubmitting replaces the previous analysis for the post.
pub(super) async fn upsert_post_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(post_id): Path<i64>,
    Json(body): Json<AnalysisBody>,
) -> Result<Json<ApiResponse<AnalysisData>>, ApiError> {
    let mut emotions = Vec::with_capacity(body.emotions.len());
    for entry in &body.emotions {
        let label = entry.label.parse::<EmotionLabel>().map_err(|_| {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                format!("unknown emotion label: {}", entry.label),
            )
        })?;
        if !(0.0..=100.0).contains(&entry.percentage) {
            return Err(ApiError::new(
                req_id.0.clone(),
                "validation_error",
                format!("percentage out of range for {label}: {}", entry.percentage),
            ));
        }
        emotions.push((label, entry.percentage));
    }

    let exists = moodlog_db::post_exists(&state.pool, post_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    if !exists {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no post with id {post_id}"),
        ));
    }

    let verdict = SignalNoise::classify(&emotions);
    let analysis_id = moodlog_db::upsert_ai_analysis(&state.pool, post_id, verdict, &emotions)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: AnalysisData {
            post_id,
            analysis_id,
            signal_noise: verdict,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
