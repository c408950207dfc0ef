use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::mailer::Mailer;
use crate::models::completion::{CompletionStatus, CompletionStatusQuery};
use crate::store::{completion_key, record_at, RecordStore};
use crate::week;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStatusResponse {
    pub success: bool,
    pub completion_status: CompletionStatus,
    pub date: NaiveDate,
}

pub async fn get_completion_status<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<CompletionStatusQuery>,
) -> AppResult<Json<CompletionStatusResponse>> {
    let date = query.date.unwrap_or_else(week::today);

    let completion_status: CompletionStatus =
        record_at(&state.store, &completion_key(auth_user.id, date))
            .await?
            .unwrap_or_default();

    Ok(Json(CompletionStatusResponse {
        success: true,
        completion_status,
        date,
    }))
}
