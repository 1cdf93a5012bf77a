use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use moodlog_core::EmotionLabel;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct EmotionItem {
    pub id: i64,
    pub name: &'static str,
}

pub(super) async fn list_emotions(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<EmotionItem>>> {
    let data = (1_i64..)
        .zip(EmotionLabel::ALL)
        .map(|(id, label)| EmotionItem {
            id,
            name: label.as_str(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct ReplaceEmotionsBody {
    pub emotions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct PostEmotionItem {
    pub name: String,
    pub modified: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostEmotionsData {
    pub post_id: i64,
    pub emotions: Vec<PostEmotionItem>,
}

pub(super) async fn replace_post_emotions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(post_id): Path<i64>,
    Json(body): Json<ReplaceEmotionsBody>,
) -> Result<Json<ApiResponse<PostEmotionsData>>, ApiError> {
    let labels = parse_labels(&req_id, &body.emotions)?;

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

    let rows = moodlog_db::replace_modified_emotions(&state.pool, post_id, &labels)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let emotions = rows
        .into_iter()
        .map(|row| PostEmotionItem {
            name: row.emotion,
            modified: row.modified,
        })
        .collect();

    Ok(Json(ApiResponse {
        data: PostEmotionsData { post_id, emotions },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn parse_labels(req_id: &RequestId, raw: &[String]) -> Result<Vec<EmotionLabel>, ApiError> {
    raw.iter()
        .map(|name| {
            name.parse::<EmotionLabel>().map_err(|_| {
                ApiError::new(
                    req_id.0.clone(),
                    "validation_error",
                    format!("unknown emotion label: {name}"),
                )
            })
        })
        .collect()
}
