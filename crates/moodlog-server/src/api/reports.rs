use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use moodlog_core::{EmotionReport, ReportPeriod, ReportService};
use moodlog_db::PgReportStore;

use crate::middleware::RequestId;

use super::{map_report_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ReportQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

pub(super) async fn yearly_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(year): Path<i32>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ApiResponse<EmotionReport>>, ApiError> {
    let period =
        ReportPeriod::yearly(year).map_err(|e| map_report_error(req_id.0.clone(), &e))?;
    run_report(&state, req_id, &query, period).await
}

pub(super) async fn monthly_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((year, month)): Path<(i32, u32)>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ApiResponse<EmotionReport>>, ApiError> {
    let period = ReportPeriod::monthly(year, month)
        .map_err(|e| map_report_error(req_id.0.clone(), &e))?;
    run_report(&state, req_id, &query, period).await
}

async fn run_report(
    state: &AppState,
    req_id: RequestId,
    query: &ReportQuery,
    period: ReportPeriod,
) -> Result<Json<ApiResponse<EmotionReport>>, ApiError> {
    let Some(user_id) = query.user_id else {
        return Err(ApiError::new(
            req_id.0,
            "invalid_user_id",
            "userId query parameter is required",
        ));
    };

    let service = ReportService::new(PgReportStore::new(state.pool.clone()));
    let report = service
        .generate(user_id, period)
        .await
        .map_err(|e| map_report_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}
