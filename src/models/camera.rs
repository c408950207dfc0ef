use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The seven expression classes the detection model reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionMood {
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgusted,
    Surprised,
    Neutral,
}

impl ExpressionMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionMood::Happy => "happy",
            ExpressionMood::Sad => "sad",
            ExpressionMood::Angry => "angry",
            ExpressionMood::Fearful => "fearful",
            ExpressionMood::Disgusted => "disgusted",
            ExpressionMood::Surprised => "surprised",
            ExpressionMood::Neutral => "neutral",
        }
    }
}

/// Per-class percentages. Independent model outputs; they do not sum to 100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExpressionScores {
    pub happy: f64,
    pub sad: f64,
    pub angry: f64,
    pub fearful: f64,
    pub disgusted: f64,
    pub surprised: f64,
    pub neutral: f64,
}

impl ExpressionScores {
    pub fn iter(&self) -> impl Iterator<Item = (ExpressionMood, f64)> {
        [
            (ExpressionMood::Happy, self.happy),
            (ExpressionMood::Sad, self.sad),
            (ExpressionMood::Angry, self.angry),
            (ExpressionMood::Fearful, self.fearful),
            (ExpressionMood::Disgusted, self.disgusted),
            (ExpressionMood::Surprised, self.surprised),
            (ExpressionMood::Neutral, self.neutral),
        ]
        .into_iter()
    }
}

/// One camera mood detection. Same per-day uniqueness as the survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraMoodRecord {
    pub date: NaiveDate,
    pub primary_mood: ExpressionMood,
    /// Confidence of the primary class, 0-100 with one decimal.
    pub confidence: f64,
    pub expressions: ExpressionScores,
    pub completed_at: DateTime<Utc>,
}

/// POST /camera-mood body. All three fields come straight from the
/// detection model; the handler enforces their presence and ranges.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCameraMoodRequest {
    pub primary_mood: Option<ExpressionMood>,
    pub confidence: Option<f64>,
    pub expressions: Option<ExpressionScores>,
}
