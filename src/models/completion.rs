use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Derived per-day completion flags. A cache over the presence of the
/// day's survey/camera records, never the source of truth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStatus {
    pub survey_completed: bool,
    pub camera_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionStatusQuery {
    pub date: Option<NaiveDate>,
}
