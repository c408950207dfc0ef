use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::Serialize;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::mailer::Mailer;
use crate::models::profile::{BasicInfo, ElderProfile, SaveElderInfoRequest};
use crate::store::{basic_info_key, profile_key, record_at, set_record, RecordStore};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SaveElderInfoResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElderInfoResponse {
    pub success: bool,
    pub elder_info: Option<ElderProfile>,
    pub basic_info: Option<BasicInfo>,
}

pub async fn save_elder_info<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SaveElderInfoRequest>,
) -> AppResult<Json<SaveElderInfoResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = body.into_profile(Utc::now());
    set_record(&state.store, &profile_key(auth_user.id), &profile).await?;

    tracing::info!(user_id = %auth_user.id, "Elder profile saved");

    Ok(Json(SaveElderInfoResponse {
        success: true,
        message: "Elder information saved successfully".into(),
    }))
}

pub async fn get_elder_info<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ElderInfoResponse>> {
    let elder_info: Option<ElderProfile> =
        record_at(&state.store, &profile_key(auth_user.id)).await?;
    let basic_info: Option<BasicInfo> =
        record_at(&state.store, &basic_info_key(auth_user.id)).await?;

    Ok(Json(ElderInfoResponse {
        success: true,
        elder_info,
        basic_info,
    }))
}
