//! Weekly aggregation over a user's stored check-ins.

use uuid::Uuid;

use crate::models::camera::CameraMoodRecord;
use crate::models::profile::{BasicInfo, ElderProfile};
use crate::models::report::{WeeklyReportData, WeeklyStatistics};
use crate::models::survey::MoodSurveyRecord;
use crate::store::{
    basic_info_key, camera_prefix, profile_key, record_at, records_with_prefix, survey_prefix,
    RecordStore, StoreError,
};
use crate::week::DateRange;

/// Two check-in kinds over seven days. The denominator stays fixed at 14
/// even when the range is not a week; callers passing other range lengths
/// get a rate relative to a full week, not to their range.
const EXPECTED_WEEKLY_CHECKINS: f64 = 14.0;

const NO_DATA: &str = "No data";

/// All of a user's survey and camera records, filtered to the range.
/// Records are kept in stored order; a store failure aborts the whole
/// scan so no partial statistics can be produced downstream.
pub async fn fetch_week_records<S: RecordStore>(
    store: &S,
    user_id: Uuid,
    range: DateRange,
) -> Result<(Vec<MoodSurveyRecord>, Vec<CameraMoodRecord>), StoreError> {
    let surveys: Vec<MoodSurveyRecord> =
        records_with_prefix(store, &survey_prefix(user_id)).await?;
    let cameras: Vec<CameraMoodRecord> =
        records_with_prefix(store, &camera_prefix(user_id)).await?;

    Ok((
        surveys
            .into_iter()
            .filter(|s| range.contains(s.date))
            .collect(),
        cameras
            .into_iter()
            .filter(|c| range.contains(c.date))
            .collect(),
    ))
}

/// Compute the statistics block. Pure: the same records always produce
/// the same output.
pub fn weekly_stats(
    surveys: &[MoodSurveyRecord],
    cameras: &[CameraMoodRecord],
) -> WeeklyStatistics {
    let completed = (surveys.len() + cameras.len()) as f64;
    let completion_rate = (completed / EXPECTED_WEEKLY_CHECKINS * 100.0).round() as i64;

    let scores: Vec<f64> = surveys
        .iter()
        .filter_map(|s| s.energy_level.as_ref().and_then(|e| e.as_score()))
        .collect();
    let average_energy_level = if scores.is_empty() {
        0.0
    } else {
        round_one_decimal(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    WeeklyStatistics {
        total_days: 7,
        surveys_completed: surveys.len(),
        camera_moods_completed: cameras.len(),
        completion_rate,
        average_energy_level,
        dominant_mood: dominant(surveys.iter().map(|s| s.overall_mood.as_str())),
        dominant_camera_mood: dominant(cameras.iter().map(|c| c.primary_mood.as_str())),
    }
}

/// The mode of a categorical field. Ties resolve to the category seen
/// first in stored order; an empty input yields the "No data" marker.
fn dominant<'a>(moods: impl Iterator<Item = &'a str>) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for mood in moods {
        match counts.iter_mut().find(|(m, _)| *m == mood) {
            Some(entry) => entry.1 += 1,
            None => counts.push((mood, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (mood, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((mood, count));
        }
    }

    best.map(|(mood, _)| mood.to_string())
        .unwrap_or_else(|| NO_DATA.to_string())
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Assemble the full report for a range: identity fields resolved from
/// the basic and profile records, plus the in-range record lists and
/// their statistics. Read-only.
pub async fn build_weekly_report<S: RecordStore>(
    store: &S,
    user_id: Uuid,
    range: DateRange,
) -> Result<WeeklyReportData, StoreError> {
    let basic: Option<BasicInfo> = record_at(store, &basic_info_key(user_id)).await?;
    let profile: Option<ElderProfile> = record_at(store, &profile_key(user_id)).await?;
    let (surveys, camera_moods) = fetch_week_records(store, user_id, range).await?;

    let statistics = weekly_stats(&surveys, &camera_moods);

    Ok(WeeklyReportData {
        elder_name: basic
            .as_ref()
            .map(|b| b.name.clone())
            .unwrap_or_else(|| "Unknown".into()),
        elder_email: basic.map(|b| b.email).unwrap_or_default(),
        guardian_email: profile
            .as_ref()
            .and_then(|p| p.guardian_email.clone())
            .unwrap_or_default(),
        guardian_name: profile
            .as_ref()
            .and_then(|p| p.guardian_name.clone())
            .unwrap_or_default(),
        week_start: range.start,
        week_end: range.end,
        statistics,
        surveys,
        camera_moods,
        elder_info: profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::models::camera::{ExpressionMood, ExpressionScores};
    use crate::models::survey::{EnergyLabel, EnergyLevel, OverallMood};
    use crate::store::memory::{FailingStore, MemoryStore};
    use crate::store::{camera_key, set_record, survey_key};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn survey(d: u32, mood: OverallMood, energy: Option<EnergyLevel>) -> MoodSurveyRecord {
        MoodSurveyRecord {
            date: date(d),
            breakfast: None,
            dinner: None,
            exercise: None,
            tablets: None,
            correct_time_dose: None,
            sleep_quality: None,
            overall_mood: mood,
            water_intake: None,
            social_interaction: None,
            energy_level: energy,
            pain: None,
            additional_notes: None,
            completed_at: Utc.with_ymd_and_hms(2026, 8, d, 9, 0, 0).unwrap(),
        }
    }

    fn camera(d: u32, mood: ExpressionMood) -> CameraMoodRecord {
        CameraMoodRecord {
            date: date(d),
            primary_mood: mood,
            confidence: 90.0,
            expressions: ExpressionScores {
                happy: 0.0,
                sad: 0.0,
                angry: 0.0,
                fearful: 0.0,
                disgusted: 0.0,
                surprised: 0.0,
                neutral: 90.0,
            },
            completed_at: Utc.with_ymd_and_hms(2026, 8, d, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_full_week_is_one_hundred_percent() {
        let surveys: Vec<_> = (1..=7)
            .map(|d| survey(d, OverallMood::Happy, None))
            .collect();
        let cameras: Vec<_> = (1..=7).map(|d| camera(d, ExpressionMood::Happy)).collect();
        assert_eq!(weekly_stats(&surveys, &cameras).completion_rate, 100);
    }

    #[test]
    fn test_empty_week_is_zero_percent() {
        let stats = weekly_stats(&[], &[]);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.average_energy_level, 0.0);
        assert_eq!(stats.dominant_mood, "No data");
        assert_eq!(stats.dominant_camera_mood, "No data");
    }

    #[test]
    fn test_surveys_only_is_fifty_percent() {
        let surveys: Vec<_> = (1..=7)
            .map(|d| survey(d, OverallMood::Calm, None))
            .collect();
        assert_eq!(weekly_stats(&surveys, &[]).completion_rate, 50);
    }

    #[test]
    fn test_dominant_mood_is_the_mode() {
        // Five happy days, two sad.
        let mut surveys: Vec<_> = (1..=5)
            .map(|d| survey(d, OverallMood::Happy, None))
            .collect();
        surveys.push(survey(6, OverallMood::Sad, None));
        surveys.push(survey(7, OverallMood::Sad, None));

        let stats = weekly_stats(&surveys, &[]);
        assert_eq!(stats.dominant_mood, "happy");
    }

    #[test]
    fn test_dominant_mood_tie_goes_to_first_seen() {
        let surveys = vec![
            survey(1, OverallMood::Calm, None),
            survey(2, OverallMood::Happy, None),
            survey(3, OverallMood::Happy, None),
            survey(4, OverallMood::Calm, None),
        ];
        assert_eq!(weekly_stats(&surveys, &[]).dominant_mood, "calm");
    }

    #[test]
    fn test_dominant_camera_mood_over_camera_records() {
        let cameras = vec![
            camera(1, ExpressionMood::Neutral),
            camera(2, ExpressionMood::Happy),
            camera(3, ExpressionMood::Neutral),
        ];
        assert_eq!(weekly_stats(&[], &cameras).dominant_camera_mood, "neutral");
    }

    #[test]
    fn test_average_energy_skips_labels_and_missing() {
        let surveys = vec![
            survey(1, OverallMood::Happy, Some(EnergyLevel::Score(8.0))),
            survey(2, OverallMood::Happy, Some(EnergyLevel::Score(5.0))),
            survey(3, OverallMood::Happy, Some(EnergyLevel::Label(EnergyLabel::Low))),
            survey(4, OverallMood::Happy, None),
        ];
        // Mean of 8 and 5 only.
        assert_eq!(weekly_stats(&surveys, &[]).average_energy_level, 6.5);
    }

    #[test]
    fn test_average_energy_rounds_to_one_decimal() {
        let surveys = vec![
            survey(1, OverallMood::Happy, Some(EnergyLevel::Score(7.0))),
            survey(2, OverallMood::Happy, Some(EnergyLevel::Score(8.0))),
            survey(3, OverallMood::Happy, Some(EnergyLevel::Score(8.0))),
        ];
        assert_eq!(weekly_stats(&surveys, &[]).average_energy_level, 7.7);
    }

    #[test]
    fn test_stats_are_idempotent() {
        let surveys = vec![
            survey(1, OverallMood::Happy, Some(EnergyLevel::Score(6.0))),
            survey(2, OverallMood::Sad, None),
        ];
        let cameras = vec![camera(2, ExpressionMood::Sad)];

        let first = serde_json::to_string(&weekly_stats(&surveys, &cameras)).unwrap();
        let second = serde_json::to_string(&weekly_stats(&surveys, &cameras)).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_filters_to_range_in_stored_order() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        // Written out of date order; the scan keeps write order.
        set_record(&store, &survey_key(user, date(5)), &survey(5, OverallMood::Happy, None))
            .await
            .unwrap();
        set_record(&store, &survey_key(user, date(3)), &survey(3, OverallMood::Calm, None))
            .await
            .unwrap();
        set_record(&store, &survey_key(user, date(20)), &survey(20, OverallMood::Sad, None))
            .await
            .unwrap();
        set_record(&store, &camera_key(user, date(4)), &camera(4, ExpressionMood::Happy))
            .await
            .unwrap();

        let range = DateRange::new(date(1), date(7)).unwrap();
        let (surveys, cameras) = fetch_week_records(&store, user, range).await.unwrap();

        assert_eq!(surveys.len(), 2);
        assert_eq!(surveys[0].date, date(5));
        assert_eq!(surveys[1].date, date(3));
        assert_eq!(cameras.len(), 1);
    }

    #[tokio::test]
    async fn test_report_is_byte_identical_across_runs() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        set_record(&store, &survey_key(user, date(4)), &survey(4, OverallMood::Happy, None))
            .await
            .unwrap();

        let range = DateRange::new(date(3), date(9)).unwrap();
        let first = build_weekly_report(&store, user, range).await.unwrap();
        let second = build_weekly_report(&store, user, range).await.unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unknown_elder_falls_back() {
        let store = MemoryStore::new();
        let range = DateRange::new(date(3), date(9)).unwrap();
        let report = build_weekly_report(&store, Uuid::new_v4(), range)
            .await
            .unwrap();
        assert_eq!(report.elder_name, "Unknown");
        assert_eq!(report.guardian_email, "");
    }

    #[tokio::test]
    async fn test_store_outage_yields_no_partial_statistics() {
        let range = DateRange::new(date(3), date(9)).unwrap();
        let result = build_weekly_report(&FailingStore, Uuid::new_v4(), range).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
