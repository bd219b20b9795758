// User-written scouting reports (session memory only).

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("scout name is required")]
    MissingScoutName,

    #[error("report text is required")]
    MissingReport,

    #[error("rating must be between 1 and {max}, got {rating}")]
    RatingOutOfRange { rating: u8, max: u8 },
}

/// A submitted report. Never merged into the prospect record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutingReport {
    /// Generated when the report is submitted; unique within a session.
    pub id: String,
    pub player_id: u32,
    pub scout_name: String,
    pub report: String,
    pub rating: u8,
    pub date: NaiveDate,
}

/// The report being composed. Fields are free text until submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub scout_name: String,
    pub report: String,
    pub rating: u8,
}

impl ReportDraft {
    /// Empty draft starting at `rating`.
    pub fn new(rating: u8) -> Self {
        Self {
            scout_name: String::new(),
            report: String::new(),
            rating,
        }
    }

    /// Check the draft can be submitted: both text fields present (whitespace
    /// alone counts as absent) and the rating within `1..=max_rating`.
    pub fn validate(&self, max_rating: u8) -> Result<(), ReportError> {
        if self.scout_name.trim().is_empty() {
            return Err(ReportError::MissingScoutName);
        }
        if self.report.trim().is_empty() {
            return Err(ReportError::MissingReport);
        }
        if !(1..=max_rating).contains(&self.rating) {
            return Err(ReportError::RatingOutOfRange {
                rating: self.rating,
                max: max_rating,
            });
        }
        Ok(())
    }
}
