use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::best_effort_completion;
use crate::handlers::surveys::CheckinResponse;
use crate::mailer::Mailer;
use crate::models::camera::{CameraMoodRecord, SaveCameraMoodRequest};
use crate::models::survey::RecordRangeQuery;
use crate::services::completion::CheckinKind;
use crate::store::{camera_key, camera_prefix, records_with_prefix, set_record, RecordStore};
use crate::week::{self, DateRange};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraMoodsResponse {
    pub success: bool,
    pub camera_moods: Vec<CameraMoodRecord>,
}

pub async fn save_camera_mood<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SaveCameraMoodRequest>,
) -> AppResult<Json<CheckinResponse>> {
    let (Some(primary_mood), Some(confidence), Some(expressions)) =
        (body.primary_mood, body.confidence, body.expressions)
    else {
        return Err(AppError::Validation(
            "Missing required fields: primaryMood, confidence, expressions".into(),
        ));
    };
    if !(0.0..=100.0).contains(&confidence) {
        return Err(AppError::Validation(
            "Confidence must be between 0 and 100".into(),
        ));
    }
    for (mood, score) in expressions.iter() {
        if !(0.0..=100.0).contains(&score) {
            return Err(AppError::Validation(format!(
                "Expression score for {} must be between 0 and 100",
                mood.as_str()
            )));
        }
    }

    let today = week::today();
    let record = CameraMoodRecord {
        date: today,
        primary_mood,
        confidence,
        expressions,
        completed_at: Utc::now(),
    };
    set_record(&state.store, &camera_key(auth_user.id, today), &record).await?;

    let completion_status =
        best_effort_completion(&state.store, auth_user.id, today, CheckinKind::Camera).await;

    tracing::info!(user_id = %auth_user.id, date = %today, "Camera mood saved");

    Ok(Json(CheckinResponse {
        success: true,
        message: "Camera mood detection saved successfully".into(),
        completion_status,
    }))
}

pub async fn list_camera_moods<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<RecordRangeQuery>,
) -> AppResult<Json<CameraMoodsResponse>> {
    let moods: Vec<CameraMoodRecord> =
        records_with_prefix(&state.store, &camera_prefix(auth_user.id)).await?;

    let camera_moods = match query.start_date {
        Some(start) => {
            let end = query.end_date.unwrap_or_else(week::today);
            let range = DateRange::new(start, end)?;
            moods
                .into_iter()
                .filter(|m| range.contains(m.date))
                .collect()
        }
        None => moods,
    };

    Ok(Json(CameraMoodsResponse {
        success: true,
        camera_moods,
    }))
}
