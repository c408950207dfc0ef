use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::models::completion::CompletionStatus;
use crate::store::{completion_key, record_at, set_record, RecordStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinKind {
    Survey,
    Camera,
}

/// Merge one kind's completion flag into the day's record and return the
/// merged state. The stored record is re-read immediately before the
/// write, never from cached state, so a concurrent submission of the
/// other kind keeps its flag. Repeats of the same kind converge on the
/// same end state.
pub async fn mark_completed<S: RecordStore>(
    store: &S,
    user_id: Uuid,
    date: NaiveDate,
    kind: CheckinKind,
) -> Result<CompletionStatus, StoreError> {
    let key = completion_key(user_id, date);
    let mut status: CompletionStatus = record_at(store, &key).await?.unwrap_or_default();

    let now = Utc::now();
    match kind {
        CheckinKind::Survey => {
            status.survey_completed = true;
            status.survey_completed_at = Some(now);
        }
        CheckinKind::Camera => {
            status.camera_completed = true;
            status.camera_completed_at = Some(now);
        }
    }

    set_record(store, &key, &status).await?;
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::{FailingStore, MemoryStore};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[tokio::test]
    async fn test_survey_then_camera_keeps_both_flags() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        mark_completed(&store, user, date(), CheckinKind::Survey)
            .await
            .unwrap();
        let status = mark_completed(&store, user, date(), CheckinKind::Camera)
            .await
            .unwrap();

        assert!(status.survey_completed);
        assert!(status.camera_completed);
        assert!(status.survey_completed_at.is_some());
        assert!(status.camera_completed_at.is_some());
    }

    #[tokio::test]
    async fn test_repeat_of_same_kind_is_idempotent() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        let first = mark_completed(&store, user, date(), CheckinKind::Survey)
            .await
            .unwrap();
        let second = mark_completed(&store, user, date(), CheckinKind::Survey)
            .await
            .unwrap();

        assert!(first.survey_completed && second.survey_completed);
        assert!(!second.camera_completed);
    }

    #[tokio::test]
    async fn test_days_are_tracked_independently() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let other_day = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        mark_completed(&store, user, date(), CheckinKind::Survey)
            .await
            .unwrap();

        let other: Option<CompletionStatus> =
            record_at(&store, &completion_key(user, other_day)).await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_store_outage_surfaces_as_unavailable() {
        let result = mark_completed(&FailingStore, Uuid::new_v4(), date(), CheckinKind::Camera).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
