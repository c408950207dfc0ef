use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::completion::CompletionStatus;
use crate::services::completion::{mark_completed, CheckinKind};
use crate::store::RecordStore;

pub mod camera;
pub mod completion;
pub mod health;
pub mod profile;
pub mod reports;
pub mod surveys;

/// Update the day's completion flags after a check-in write. The flag is
/// advisory: the primary record is already saved, so a store hiccup here
/// is logged and answered with the state implied by that write instead
/// of failing the request.
pub(crate) async fn best_effort_completion<S: RecordStore>(
    store: &S,
    user_id: Uuid,
    date: NaiveDate,
    kind: CheckinKind,
) -> CompletionStatus {
    match mark_completed(store, user_id, date, kind).await {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(
                user_id = %user_id,
                date = %date,
                error = %e,
                "Completion flag update failed; check-in itself is saved"
            );
            let mut status = CompletionStatus::default();
            match kind {
                CheckinKind::Survey => status.survey_completed = true,
                CheckinKind::Camera => status.camera_completed = true,
            }
            status
        }
    }
}
