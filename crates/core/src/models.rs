use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::status::StatusDescriptor;

const SUBTITLE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

/// A workflow run after its conclusion has been classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRun {
    pub run_id: u64,
    pub commit_sha: String,
    pub commit_author_date: OffsetDateTime,
    /// Shown under the card title; derived from `commit_author_date`.
    pub activity_subtitle: String,
    /// Run detail page on GitHub.
    pub html_url: String,
    /// Conclusion exactly as GitHub (or the legacy `job_status` input) reported it.
    pub conclusion: String,
    pub status: &'static StatusDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub job_number: usize,
    pub name: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub started_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub steps: Vec<StepReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Numbered across the whole run, not per job.
    pub step_number: usize,
    pub name: String,
    pub status: String,
    pub conclusion: Option<String>,
}

/// Whole seconds since the Unix epoch, as reported by the GitHub client.
pub fn utc_from_unix(seconds: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(seconds).ok()
}

/// Render a commit date the way it appears under the card title.
pub fn format_subtitle(date: OffsetDateTime) -> String {
    let date = date.to_offset(UtcOffset::UTC);
    date.format(SUBTITLE_FORMAT).unwrap_or_else(|_| date.to_string())
}
