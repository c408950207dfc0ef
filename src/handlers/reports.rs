use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::mailer::Mailer;
use crate::models::report::WeeklyReportData;
use crate::services::dispatch::{self, DispatchError};
use crate::services::render::{render_csv, render_printable_html};
use crate::services::stats::build_weekly_report;
use crate::store::RecordStore;
use crate::week::DateRange;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReportResponse {
    pub success: bool,
    pub report_data: WeeklyReportData,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub format: Option<String>,
}

pub async fn weekly_report<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<WeeklyReportResponse>> {
    let report_data =
        build_weekly_report(&state.store, auth_user.id, DateRange::current_week()).await?;

    Ok(Json(WeeklyReportResponse {
        success: true,
        report_data,
    }))
}

pub async fn download_weekly_report<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<Response> {
    let report =
        build_weekly_report(&state.store, auth_user.id, DateRange::current_week()).await?;

    match query.format.as_deref().unwrap_or("csv") {
        "csv" => {
            let filename = format!("mood-report-{}.csv", report.week_start);
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                render_csv(&report),
            )
                .into_response())
        }
        "print" => Ok(Html(render_printable_html(&report)).into_response()),
        other => Err(AppError::Validation(format!(
            "Unknown report format: {other}"
        ))),
    }
}

pub async fn send_weekly_report<S: RecordStore, M: Mailer>(
    State(state): State<AppState<S, M>>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Response> {
    match dispatch::send_weekly_report(&state.store, &state.mailer, &state.config, auth_user.id)
        .await
    {
        Ok(outcome) => Ok(Json(json!({
            "success": true,
            "message": format!(
                "Weekly report email sent successfully to {}",
                outcome.recipient
            ),
            "reportData": outcome.report,
            "emailId": outcome.email_id,
        }))
        .into_response()),

        Err(e @ DispatchError::MissingRecipient) => {
            Err(AppError::MissingRecipient(e.to_string()))
        }

        Err(DispatchError::Store(e)) => Err(e.into()),

        // The statistics were already computed, so hand them back along
        // with the failure: the dashboard shows the numbers and offers a
        // manual retry.
        Err(DispatchError::Delivery { message, report }) => {
            tracing::error!(
                user_id = %auth_user.id,
                error = %message,
                "Weekly report email failed"
            );
            let error = AppError::DeliveryFailed(message);
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": error.to_string(),
                    "reportData": *report,
                })),
            )
                .into_response())
        }
    }
}
