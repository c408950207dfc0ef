use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A yes/no survey answer, stored as the form submits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Good,
    Average,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallMood {
    Happy,
    Calm,
    Anxious,
    Sad,
}

impl OverallMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallMood::Happy => "happy",
            OverallMood::Calm => "calm",
            OverallMood::Anxious => "anxious",
            OverallMood::Sad => "sad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLabel {
    Great,
    Normal,
    Low,
}

impl EnergyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLabel::Great => "great",
            EnergyLabel::Normal => "normal",
            EnergyLabel::Low => "low",
        }
    }
}

/// Energy arrives from two entry points: the guided survey submits a label,
/// the quick daily form a 1-10 score. Only scores feed the weekly average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnergyLevel {
    Score(f64),
    Label(EnergyLabel),
}

impl EnergyLevel {
    pub fn as_score(&self) -> Option<f64> {
        match self {
            EnergyLevel::Score(score) => Some(*score),
            EnergyLevel::Label(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PainLevel {
    NoPain,
    Mild,
    Moderate,
}

/// One daily mood survey. At most one per (user, date); re-submission
/// overwrites the whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSurveyRecord {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablets: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_time_dose: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<SleepQuality>,
    pub overall_mood: OverallMood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_interaction: Option<YesNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<EnergyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain: Option<PainLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    pub completed_at: DateTime<Utc>,
}

/// POST /mood-survey body. Date and submission timestamp are server-set;
/// the handler enforces that `overall_mood` is present.
#[derive(Debug, Deserialize)]
pub struct SaveMoodSurveyRequest {
    pub breakfast: Option<YesNo>,
    pub dinner: Option<YesNo>,
    pub exercise: Option<YesNo>,
    pub tablets: Option<YesNo>,
    pub correct_time_dose: Option<YesNo>,
    pub sleep_quality: Option<SleepQuality>,
    pub overall_mood: Option<OverallMood>,
    pub water_intake: Option<YesNo>,
    pub social_interaction: Option<YesNo>,
    pub energy_level: Option<EnergyLevel>,
    pub pain: Option<PainLevel>,
    pub additional_notes: Option<String>,
}

impl SaveMoodSurveyRequest {
    pub fn into_record(
        self,
        overall_mood: OverallMood,
        date: NaiveDate,
        completed_at: DateTime<Utc>,
    ) -> MoodSurveyRecord {
        MoodSurveyRecord {
            date,
            breakfast: self.breakfast,
            dinner: self.dinner,
            exercise: self.exercise,
            tablets: self.tablets,
            correct_time_dose: self.correct_time_dose,
            sleep_quality: self.sleep_quality,
            overall_mood,
            water_intake: self.water_intake,
            social_interaction: self.social_interaction,
            energy_level: self.energy_level,
            pain: self.pain,
            additional_notes: self.additional_notes,
            completed_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
