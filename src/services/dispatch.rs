//! Weekly report delivery: compute, render, send, record.

use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::mailer::Mailer;
use crate::models::report::{ReportSendReceipt, WeeklyReportData};
use crate::services::render::render_email_html;
use crate::services::stats::build_weekly_report;
use crate::store::{report_key, set_record, RecordStore, StoreError};
use crate::week::DateRange;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Guardian email not set. Please update your profile with guardian email address.")]
    MissingRecipient,

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Delivery failed after the statistics were computed; the report is
    /// carried along so the caller can still show the numbers.
    #[error("{message}")]
    Delivery {
        message: String,
        report: Box<WeeklyReportData>,
    },
}

#[derive(Debug)]
pub struct DispatchOutcome {
    pub report: WeeklyReportData,
    pub recipient: String,
    pub email_id: String,
}

/// Send the current week's report to the user's guardian. No retry on
/// failure; a successful send overwrites the week's receipt so only the
/// most recent send per week is retained.
pub async fn send_weekly_report<S, M>(
    store: &S,
    mailer: &M,
    config: &Config,
    user_id: Uuid,
) -> Result<DispatchOutcome, DispatchError>
where
    S: RecordStore,
    M: Mailer,
{
    let report = build_weekly_report(store, user_id, DateRange::current_week()).await?;

    if report.guardian_email.is_empty() {
        return Err(DispatchError::MissingRecipient);
    }

    let subject = format!(
        "Weekly Wellness Report for {} ({} to {})",
        report.elder_name, report.week_start, report.week_end
    );
    let html = render_email_html(&report);

    let sent = match mailer
        .send(&config.mail_from, &report.guardian_email, &subject, &html)
        .await
    {
        Ok(sent) => sent,
        Err(e) => {
            return Err(DispatchError::Delivery {
                message: e.to_string(),
                report: Box::new(report),
            });
        }
    };

    tracing::info!(
        user_id = %user_id,
        email_id = %sent.id,
        recipient = %report.guardian_email,
        "Weekly report email sent"
    );

    let receipt = ReportSendReceipt {
        sent_at: Utc::now(),
        guardian_email: report.guardian_email.clone(),
        week_start: report.week_start,
        week_end: report.week_end,
        statistics: report.statistics.clone(),
        email_id: sent.id.clone(),
    };
    set_record(store, &report_key(user_id, report.week_end), &receipt).await?;

    let recipient = report.guardian_email.clone();
    Ok(DispatchOutcome {
        report,
        recipient,
        email_id: sent.id,
    })
}
