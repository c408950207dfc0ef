use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::best_effort_completion;
use crate::mailer::Mailer;
use crate::models::completion::CompletionStatus;
use crate::models::survey::{
    EnergyLevel, MoodSurveyRecord, RecordRangeQuery, SaveMoodSurveyRequest,
};
use crate::services::completion::CheckinKind;
use crate::store::{records_with_prefix, set_record, survey_key, survey_prefix, RecordStore};
use crate::week::{self, DateRange};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    pub success: bool,
    pub message: String,
    pub completion_status: CompletionStatus,
}

#[derive(Debug, Serialize)]
pub struct SurveysResponse {
    pub success: bool,
    pub surveys: Vec<MoodSurveyRecord>,
}

pub async fn save_mood_survey<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SaveMoodSurveyRequest>,
) -> AppResult<Json<CheckinResponse>> {
    let Some(overall_mood) = body.overall_mood else {
        return Err(AppError::Validation(
            "Missing required field: overall_mood".into(),
        ));
    };
    if let Some(EnergyLevel::Score(score)) = body.energy_level {
        if !(1.0..=10.0).contains(&score) {
            return Err(AppError::Validation(
                "Energy level must be between 1 and 10".into(),
            ));
        }
    }
    if let Some(notes) = &body.additional_notes {
        if notes.len() > 5000 {
            return Err(AppError::Validation(
                "Notes must be under 5000 characters".into(),
            ));
        }
    }

    let today = week::today();
    let record = body.into_record(overall_mood, today, Utc::now());
    set_record(&state.store, &survey_key(auth_user.id, today), &record).await?;

    let completion_status =
        best_effort_completion(&state.store, auth_user.id, today, CheckinKind::Survey).await;

    tracing::info!(user_id = %auth_user.id, date = %today, "Mood survey saved");

    Ok(Json(CheckinResponse {
        success: true,
        message: "Mood survey saved successfully".into(),
        completion_status,
    }))
}

pub async fn list_mood_surveys<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<RecordRangeQuery>,
) -> AppResult<Json<SurveysResponse>> {
    let surveys: Vec<MoodSurveyRecord> =
        records_with_prefix(&state.store, &survey_prefix(auth_user.id)).await?;

    // Without a start date the full history is returned, as the
    // dashboard expects.
    let surveys = match query.start_date {
        Some(start) => {
            let end = query.end_date.unwrap_or_else(week::today);
            let range = DateRange::new(start, end)?;
            surveys
                .into_iter()
                .filter(|s| range.contains(s.date))
                .collect()
        }
        None => surveys,
    };

    Ok(Json(SurveysResponse {
        success: true,
        surveys,
    }))
}
