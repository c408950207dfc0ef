//! Report rendering. Every renderer is deterministic: the same report
//! data always produces byte-identical output, and none of them touch
//! the network or the store.

use chrono::NaiveDate;

use crate::models::camera::CameraMoodRecord;
use crate::models::report::WeeklyReportData;
use crate::models::survey::{EnergyLevel, MoodSurveyRecord};
use crate::week::last_seven_days;

const STATUS_COMPLETED: &str = "✓ Completed";
const STATUS_PENDING: &str = "- Pending";

fn survey_on(report: &WeeklyReportData, date: NaiveDate) -> Option<&MoodSurveyRecord> {
    report.surveys.iter().find(|s| s.date == date)
}

fn camera_on(report: &WeeklyReportData, date: NaiveDate) -> Option<&CameraMoodRecord> {
    report.camera_moods.iter().find(|c| c.date == date)
}

fn mood_cell(survey: Option<&MoodSurveyRecord>, absent: &str) -> String {
    survey
        .map(|s| s.overall_mood.as_str().to_string())
        .unwrap_or_else(|| absent.to_string())
}

fn energy_cell(survey: Option<&MoodSurveyRecord>, absent: &str) -> String {
    match survey.and_then(|s| s.energy_level.as_ref()) {
        Some(EnergyLevel::Score(score)) if score.fract() == 0.0 => {
            format!("{}/10", *score as i64)
        }
        Some(EnergyLevel::Score(score)) => format!("{score:.1}/10"),
        Some(EnergyLevel::Label(label)) => label.as_str().to_string(),
        None => absent.to_string(),
    }
}

fn engagement_tier(completion_rate: i64) -> &'static str {
    if completion_rate >= 80 {
        "excellent"
    } else if completion_rate >= 60 {
        "good"
    } else {
        "moderate"
    }
}

fn format_average_energy(value: f64) -> String {
    format!("{value:.1}")
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// The downloadable CSV: title, report period, elder information,
/// statistics, and a daily table spanning exactly the seven days ending
/// at the report's week end.
pub fn render_csv(report: &WeeklyReportData) -> String {
    let stats = &report.statistics;
    let elder = report.elder_info.as_ref();

    let mut rows: Vec<Vec<String>> = vec![
        vec!["Elder Mood Mirror - Weekly Report".into()],
        vec![String::new()],
        vec![format!(
            "Report Period: {} to {}",
            report.week_start, report.week_end
        )],
        vec![String::new()],
        vec!["Elder Information".into()],
        vec!["Name".into(), report.elder_name.clone()],
        vec![
            "Age".into(),
            elder
                .and_then(|e| e.age)
                .map(|a| a.to_string())
                .unwrap_or_else(|| "N/A".into()),
        ],
        vec![
            "Blood Group".into(),
            elder
                .and_then(|e| e.blood_group.clone())
                .unwrap_or_else(|| "N/A".into()),
        ],
        vec![
            "Guardian".into(),
            if report.guardian_name.is_empty() {
                "N/A".into()
            } else {
                report.guardian_name.clone()
            },
        ],
        vec![
            "Guardian Email".into(),
            if report.guardian_email.is_empty() {
                "N/A".into()
            } else {
                report.guardian_email.clone()
            },
        ],
        vec![String::new()],
        vec!["Weekly Statistics".into()],
        vec![
            "Surveys Completed".into(),
            stats.surveys_completed.to_string(),
        ],
        vec![
            "Camera Checks".into(),
            stats.camera_moods_completed.to_string(),
        ],
        vec!["Completion Rate".into(), format!("{}%", stats.completion_rate)],
        vec![
            "Average Energy Level".into(),
            format_average_energy(stats.average_energy_level),
        ],
        vec!["Dominant Mood".into(), stats.dominant_mood.clone()],
        vec![
            "Camera Detected Mood".into(),
            stats.dominant_camera_mood.clone(),
        ],
        vec![String::new()],
        vec!["Daily Activities".into()],
        vec![
            "Date".into(),
            "Survey".into(),
            "Camera".into(),
            "Mood".into(),
            "Energy Level".into(),
        ],
    ];

    for date in last_seven_days(report.week_end) {
        let survey = survey_on(report, date);
        let camera = camera_on(report, date);
        rows.push(vec![
            date.to_string(),
            if survey.is_some() { STATUS_COMPLETED } else { STATUS_PENDING }.into(),
            if camera.is_some() { STATUS_COMPLETED } else { STATUS_PENDING }.into(),
            mood_cell(survey, "N/A"),
            energy_cell(survey, "N/A"),
        ]);
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

/// The weekly guardian email, self-contained with inline styles.
pub fn render_email_html(report: &WeeklyReportData) -> String {
    let stats = &report.statistics;
    let guardian = if report.guardian_name.is_empty() {
        "Guardian"
    } else {
        report.guardian_name.as_str()
    };

    let mood_sentence = if stats.dominant_mood == "No data" {
        String::new()
    } else {
        format!(
            r#" The overall mood trend has been "{}"."#,
            stats.dominant_mood
        )
    };

    let low_completion_item = if stats.completion_rate < 60 {
        "<li><strong>Consider checking in - completion rate is lower than usual</strong></li>"
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Weekly Wellness Report</title>
</head>
<body style="margin: 0; padding: 0; font-family: Arial, sans-serif; background-color: #f5f5f5;">
  <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #f5f5f5; padding: 20px;">
    <tr>
      <td align="center">
        <table width="600" cellpadding="0" cellspacing="0" style="background-color: #ffffff; border-radius: 8px; overflow: hidden;">
          <tr>
            <td style="background: linear-gradient(135deg, #2563eb 0%, #16a34a 100%); padding: 30px; text-align: center;">
              <h1 style="margin: 0; color: #ffffff; font-size: 28px;">Elder Mood Mirror</h1>
              <p style="margin: 10px 0 0 0; color: #e0f2fe; font-size: 16px;">Weekly Wellness Report</p>
            </td>
          </tr>
          <tr>
            <td style="padding: 30px;">
              <h2 style="margin: 0 0 10px 0; color: #1f2937; font-size: 22px;">Hello {guardian},</h2>
              <p style="margin: 0 0 20px 0; color: #4b5563; font-size: 16px; line-height: 1.5;">
                This is the weekly wellness report for <strong>{elder}</strong> for the period
                <strong>{week_start}</strong> to <strong>{week_end}</strong>.
              </p>
              <table width="100%" cellpadding="0" cellspacing="0" style="margin: 20px 0;">
                <tr>
                  <td style="background-color: #dbeafe; padding: 20px; border-radius: 8px;">
                    <h3 style="margin: 0 0 15px 0; color: #1e40af; font-size: 18px;">Weekly Summary</h3>
                    <table width="100%" cellpadding="8" cellspacing="0">
                      <tr>
                        <td style="color: #374151; font-size: 15px;">Completion Rate:</td>
                        <td style="color: #1f2937; font-size: 15px; font-weight: bold; text-align: right;">{completion_rate}%</td>
                      </tr>
                      <tr>
                        <td style="color: #374151; font-size: 15px;">Surveys Completed:</td>
                        <td style="color: #1f2937; font-size: 15px; font-weight: bold; text-align: right;">{surveys_completed} / {total_days}</td>
                      </tr>
                      <tr>
                        <td style="color: #374151; font-size: 15px;">Camera Checks:</td>
                        <td style="color: #1f2937; font-size: 15px; font-weight: bold; text-align: right;">{camera_completed} / {total_days}</td>
                      </tr>
                      <tr>
                        <td style="color: #374151; font-size: 15px;">Average Energy Level:</td>
                        <td style="color: #1f2937; font-size: 15px; font-weight: bold; text-align: right;">{average_energy} / 10</td>
                      </tr>
                      <tr>
                        <td style="color: #374151; font-size: 15px;">Dominant Mood:</td>
                        <td style="color: #1f2937; font-size: 15px; font-weight: bold; text-align: right;">{dominant_mood}</td>
                      </tr>
                      <tr>
                        <td style="color: #374151; font-size: 15px;">Camera Detected Mood:</td>
                        <td style="color: #1f2937; font-size: 15px; font-weight: bold; text-align: right;">{dominant_camera_mood}</td>
                      </tr>
                    </table>
                  </td>
                </tr>
              </table>
              <div style="background-color: #fef3c7; padding: 20px; border-radius: 8px; border-left: 4px solid #f59e0b; margin: 20px 0;">
                <h3 style="margin: 0 0 10px 0; color: #92400e; font-size: 18px;">Key Insights</h3>
                <p style="margin: 0; color: #78350f; font-size: 15px; line-height: 1.5;">
                  {elder} has shown {tier} engagement this week with a completion rate of {completion_rate}%.{mood_sentence}
                </p>
              </div>
              <div style="background-color: #dcfce7; padding: 20px; border-radius: 8px; border-left: 4px solid #16a34a; margin: 20px 0;">
                <h3 style="margin: 0 0 10px 0; color: #14532d; font-size: 18px;">Recommendations</h3>
                <ul style="margin: 0; padding-left: 20px; color: #166534; font-size: 15px; line-height: 1.8;">
                  <li>Continue encouraging daily mood tracking for better insights</li>
                  <li>Reach out if {elder} needs support or assistance</li>
                  <li>Monitor any significant changes in mood patterns</li>
                  {low_completion_item}
                </ul>
              </div>
              <p style="margin: 30px 0 0 0; color: #6b7280; font-size: 14px; line-height: 1.5;">
                For detailed analytics and full history, please log in to the Elder Mood Mirror dashboard.
              </p>
            </td>
          </tr>
          <tr>
            <td style="background-color: #f9fafb; padding: 20px; text-align: center; border-top: 1px solid #e5e7eb;">
              <p style="margin: 0; color: #6b7280; font-size: 13px;">
                Elder Mood Mirror - Reflecting Care, Restoring Smiles<br>
                This is an automated weekly report. Please do not reply to this email.
              </p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
"#,
        guardian = guardian,
        elder = report.elder_name,
        week_start = report.week_start,
        week_end = report.week_end,
        completion_rate = stats.completion_rate,
        surveys_completed = stats.surveys_completed,
        camera_completed = stats.camera_moods_completed,
        total_days = stats.total_days,
        average_energy = format_average_energy(stats.average_energy_level),
        dominant_mood = stats.dominant_mood,
        dominant_camera_mood = stats.dominant_camera_mood,
        tier = engagement_tier(stats.completion_rate),
        mood_sentence = mood_sentence,
        low_completion_item = low_completion_item,
    )
}

// ---------------------------------------------------------------------------
// Printable document
// ---------------------------------------------------------------------------

const PRINT_STYLES: &str = r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
      line-height: 1.6; color: #333; padding: 40px; max-width: 1200px; margin: 0 auto;
    }
    .header { text-align: center; margin-bottom: 40px; padding-bottom: 20px; border-bottom: 3px solid #3b82f6; }
    h1 { color: #1e40af; font-size: 32px; margin-bottom: 10px; }
    .report-period { color: #6b7280; font-size: 18px; }
    .section { margin-bottom: 30px; page-break-inside: avoid; }
    .section-title { color: #1e40af; font-size: 24px; margin-bottom: 15px; padding-bottom: 10px; border-bottom: 2px solid #e5e7eb; }
    .info-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 20px; margin-bottom: 20px; }
    .info-item { padding: 15px; background: #f9fafb; border-radius: 8px; }
    .info-label { color: #6b7280; font-size: 14px; margin-bottom: 5px; }
    .info-value { font-size: 18px; font-weight: 600; color: #111827; text-transform: capitalize; }
    .stats-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 20px; margin-bottom: 30px; }
    .stat-card { text-align: center; padding: 20px; background: linear-gradient(135deg, #3b82f6 0%, #10b981 100%); border-radius: 12px; color: white; }
    .stat-value { font-size: 36px; font-weight: bold; margin-bottom: 5px; }
    .stat-label { font-size: 14px; opacity: 0.9; }
    table { width: 100%; border-collapse: collapse; margin-top: 15px; }
    th { background: #f3f4f6; padding: 12px; text-align: left; font-weight: 600; color: #374151; border-bottom: 2px solid #e5e7eb; }
    td { padding: 12px; border-bottom: 1px solid #e5e7eb; }
    .badge { display: inline-block; padding: 4px 12px; border-radius: 12px; font-size: 12px; font-weight: 600; }
    .badge-success { background: #d1fae5; color: #065f46; }
    .badge-pending { background: #e5e7eb; color: #6b7280; }
    .footer { margin-top: 50px; padding-top: 20px; border-top: 2px solid #e5e7eb; text-align: center; color: #6b7280; font-size: 14px; }
    @media print { body { padding: 20px; } }
"#;

/// The printable weekly document.
pub fn render_printable_html(report: &WeeklyReportData) -> String {
    let stats = &report.statistics;
    let elder = report.elder_info.as_ref();

    let mut daily_rows = String::new();
    for date in last_seven_days(report.week_end) {
        let survey = survey_on(report, date);
        let camera = camera_on(report, date);
        let (survey_class, survey_label) = badge(survey.is_some());
        let (camera_class, camera_label) = badge(camera.is_some());
        daily_rows.push_str(&format!(
            r#"        <tr>
          <td>{day}</td>
          <td><span class="badge {survey_class}">{survey_label}</span></td>
          <td><span class="badge {camera_class}">{camera_label}</span></td>
          <td style="text-transform: capitalize;">{mood}</td>
          <td>{energy}</td>
        </tr>
"#,
            day = date.format("%a, %b %-d"),
            survey_class = survey_class,
            survey_label = survey_label,
            camera_class = camera_class,
            camera_label = camera_label,
            mood = mood_cell(survey, "-").replace('_', " "),
            energy = energy_cell(survey, "-"),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>Elder Mood Mirror - Weekly Report</title>
  <style>{styles}</style>
</head>
<body>
  <div class="header">
    <h1>Elder Mood Mirror</h1>
    <p class="report-period">Weekly Report: {period_start} - {period_end}</p>
  </div>

  <div class="section">
    <h2 class="section-title">Elder Information</h2>
    <div class="info-grid">
      <div class="info-item">
        <div class="info-label">Name</div>
        <div class="info-value">{elder_name}</div>
      </div>
      <div class="info-item">
        <div class="info-label">Age</div>
        <div class="info-value">{age}</div>
      </div>
      <div class="info-item">
        <div class="info-label">Blood Group</div>
        <div class="info-value">{blood_group}</div>
      </div>
      <div class="info-item">
        <div class="info-label">Guardian</div>
        <div class="info-value">{guardian}</div>
      </div>
    </div>
  </div>

  <div class="section">
    <h2 class="section-title">Weekly Statistics</h2>
    <div class="stats-grid">
      <div class="stat-card">
        <div class="stat-value">{surveys_completed}</div>
        <div class="stat-label">Surveys Completed</div>
      </div>
      <div class="stat-card">
        <div class="stat-value">{camera_completed}</div>
        <div class="stat-label">Camera Checks</div>
      </div>
      <div class="stat-card">
        <div class="stat-value">{completion_rate}%</div>
        <div class="stat-label">Completion Rate</div>
      </div>
      <div class="stat-card">
        <div class="stat-value">{average_energy}</div>
        <div class="stat-label">Avg Energy Level</div>
      </div>
    </div>
  </div>

  <div class="section">
    <h2 class="section-title">Mood Analysis</h2>
    <div class="info-grid">
      <div class="info-item">
        <div class="info-label">Survey Mood Pattern</div>
        <div class="info-value">{dominant_mood}</div>
      </div>
      <div class="info-item">
        <div class="info-label">Camera Detected Mood</div>
        <div class="info-value">{dominant_camera_mood}</div>
      </div>
    </div>
  </div>

  <div class="section">
    <h2 class="section-title">Daily Activities</h2>
    <table>
      <thead>
        <tr>
          <th>Date</th>
          <th>Survey Status</th>
          <th>Camera Check</th>
          <th>Mood</th>
          <th>Energy Level</th>
        </tr>
      </thead>
      <tbody>
{daily_rows}      </tbody>
    </table>
  </div>

  <div class="section">
    <h2 class="section-title">Report Summary</h2>
    <p style="margin-bottom: 15px;">
      This weekly report provides a comprehensive overview of {elder_name}'s
      mood and wellness tracking activities. The report includes daily survey responses,
      camera-based mood detection results, and key health metrics.
    </p>
    <p style="margin-bottom: 15px;">
      <strong>Tracking Consistency:</strong> {completion_rate}% of activities were completed
      this week, demonstrating {tier} engagement with the wellness tracking program.
    </p>
    <p>
      <strong>Next Steps:</strong> Continue daily tracking for better trend analysis.
      Guardian will receive automated weekly email reports for ongoing monitoring and care coordination.
    </p>
  </div>

  <div class="footer">
    <p>Generated by Elder Mood Mirror - Your Daily Wellness Companion</p>
    <p>Report Period Ending: {period_end}</p>
  </div>
</body>
</html>
"#,
        styles = PRINT_STYLES,
        period_start = report.week_start.format("%B %-d, %Y"),
        period_end = report.week_end.format("%B %-d, %Y"),
        elder_name = report.elder_name,
        age = elder
            .and_then(|e| e.age)
            .map(|a| a.to_string())
            .unwrap_or_else(|| "N/A".into()),
        blood_group = elder
            .and_then(|e| e.blood_group.clone())
            .unwrap_or_else(|| "N/A".into()),
        guardian = if report.guardian_name.is_empty() {
            "N/A"
        } else {
            report.guardian_name.as_str()
        },
        surveys_completed = stats.surveys_completed,
        camera_completed = stats.camera_moods_completed,
        completion_rate = stats.completion_rate,
        average_energy = format_average_energy(stats.average_energy_level),
        dominant_mood = stats.dominant_mood,
        dominant_camera_mood = stats.dominant_camera_mood,
        tier = engagement_tier(stats.completion_rate),
        daily_rows = daily_rows,
    )
}

fn badge(completed: bool) -> (&'static str, &'static str) {
    if completed {
        ("badge-success", STATUS_COMPLETED)
    } else {
        ("badge-pending", STATUS_PENDING)
    }
}
