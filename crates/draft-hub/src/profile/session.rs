// Per-session profile state: stats view toggle, report editor, reports.
//
// Owned by whoever renders the profile and passed into the query layer;
// nothing here is shared or persisted.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};

use super::reports::{ReportDraft, ReportError, ScoutingReport};
use crate::config::ReportsConfig;

/// Which stat line the profile shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatsView {
    #[default]
    PerGame,
    Total,
}

/// Mutable state behind one user's profile pages.
#[derive(Debug, Clone)]
pub struct ProfileSession {
    pub stats_view: StatsView,
    editor_open: bool,
    draft: ReportDraft,
    reports: Vec<ScoutingReport>,
    default_rating: u8,
    max_rating: u8,
    next_seq: u64,
}

impl ProfileSession {
    pub fn new(rules: &ReportsConfig) -> Self {
        Self {
            stats_view: StatsView::default(),
            editor_open: false,
            draft: ReportDraft::new(rules.default_rating),
            reports: Vec::new(),
            default_rating: rules.default_rating,
            max_rating: rules.max_rating,
            next_seq: 0,
        }
    }

    pub fn set_stats_view(&mut self, view: StatsView) {
        self.stats_view = view;
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor_open
    }

    pub fn open_editor(&mut self) {
        self.editor_open = true;
    }

    /// Close the editor without submitting. The draft is kept.
    pub fn close_editor(&mut self) {
        self.editor_open = false;
    }

    pub fn draft(&self) -> &ReportDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ReportDraft {
        &mut self.draft
    }

    pub fn max_rating(&self) -> u8 {
        self.max_rating
    }

    /// Whether the current draft would be accepted.
    pub fn can_submit(&self) -> bool {
        self.draft.validate(self.max_rating).is_ok()
    }

    /// Submit the draft for `player_id`, stamped with the local date.
    pub fn submit_report(&mut self, player_id: u32) -> Result<&ScoutingReport, ReportError> {
        self.submit_report_at(player_id, Local::now().naive_local())
    }

    /// Submit the draft as of `now`. On success the draft resets and the
    /// editor closes; on error nothing changes.
    pub fn submit_report_at(
        &mut self,
        player_id: u32,
        now: NaiveDateTime,
    ) -> Result<&ScoutingReport, ReportError> {
        if let Err(e) = self.draft.validate(self.max_rating) {
            debug!("rejected report for playerId {}: {}", player_id, e);
            return Err(e);
        }

        self.next_seq += 1;
        let id = format!("{}-{}", now.and_utc().timestamp_millis(), self.next_seq);
        let draft = std::mem::replace(&mut self.draft, ReportDraft::new(self.default_rating));

        let report = ScoutingReport {
            id,
            player_id,
            scout_name: draft.scout_name.trim().to_string(),
            report: draft.report,
            rating: draft.rating,
            date: now.date(),
        };
        info!(
            "Report {} added for playerId {} by {}",
            report.id, player_id, report.scout_name
        );

        self.reports.push(report);
        self.editor_open = false;
        Ok(&self.reports[self.reports.len() - 1])
    }

    /// Every report submitted this session, oldest first.
    pub fn reports(&self) -> &[ScoutingReport] {
        &self.reports
    }

    /// Reports for one prospect, oldest first.
    pub fn reports_for(&self, player_id: u32) -> impl Iterator<Item = &ScoutingReport> + '_ {
        self.reports.iter().filter(move |r| r.player_id == player_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
