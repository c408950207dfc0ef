use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::camera::CameraMoodRecord;
use super::profile::ElderProfile;
use super::survey::MoodSurveyRecord;

/// The statistics block of a weekly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStatistics {
    pub total_days: u32,
    pub surveys_completed: usize,
    pub camera_moods_completed: usize,
    /// Integer percentage over the fixed 14 expected check-ins.
    pub completion_rate: i64,
    /// Mean of the numeric energy scores in range, one decimal; 0 when
    /// no survey carries a score.
    pub average_energy_level: f64,
    pub dominant_mood: String,
    pub dominant_camera_mood: String,
}

/// Computed on demand for one user's week; never persisted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReportData {
    pub elder_name: String,
    pub elder_email: String,
    pub guardian_email: String,
    pub guardian_name: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub statistics: WeeklyStatistics,
    pub surveys: Vec<MoodSurveyRecord>,
    pub camera_moods: Vec<CameraMoodRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elder_info: Option<ElderProfile>,
}

/// The durable artifact of a dispatch, keyed by (user, week end) and
/// overwritten on repeated sends for the same week.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSendReceipt {
    pub sent_at: DateTime<Utc>,
    pub guardian_email: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub statistics: WeeklyStatistics,
    pub email_id: String,
}
