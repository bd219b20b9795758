// Player profile view: bio, combine numbers, a stat line and session reports.

pub mod reports;
pub mod session;

pub use reports::{ReportDraft, ReportError, ScoutingReport};
pub use session::{ProfileSession, StatsView};

use serde::Serialize;

use crate::dataset::{feet_inches, CombineMeasurements};
use crate::hub::DraftHub;
use crate::scouting::merge::MergedPlayer;
use crate::scouting::stats::{PerGameStats, PlayerStats, StatTotals};

/// Where a profile's stat line was aggregated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatsSource {
    GameLogs,
    Season,
}

/// The stat line for the selected `StatsView`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum StatLine {
    PerGame(PerGameStats),
    Total(StatTotals),
}

impl StatLine {
    pub fn select(stats: &PlayerStats, view: StatsView) -> Self {
        match view {
            StatsView::PerGame => StatLine::PerGame(stats.per_game),
            StatsView::Total => StatLine::Total(stats.total),
        }
    }
}

/// Everything the profile page shows for one prospect.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile<'a> {
    pub player: &'a MergedPlayer,
    pub measurements: Option<&'a CombineMeasurements>,
    pub stats_view: StatsView,
    pub stats_source: Option<StatsSource>,
    pub stat_line: Option<StatLine>,
    pub reports: Vec<&'a ScoutingReport>,
}

impl PlayerProfile<'_> {
    /// Listed height as (feet, inches).
    pub fn height_feet_inches(&self) -> (u32, u32) {
        feet_inches(self.player.bio.height)
    }
}

/// Assemble the profile for `player_id`; `None` when the id is unknown.
///
/// Game logs are preferred for the stat line when the prospect has any,
/// otherwise the merged season stats are used.
pub fn profile<'a>(
    hub: &'a DraftHub,
    player_id: u32,
    session: &'a ProfileSession,
) -> Option<PlayerProfile<'a>> {
    let player = hub.player(player_id)?;

    let (stats_source, stats) = match hub.game_log_stats(player_id) {
        Some(stats) => (Some(StatsSource::GameLogs), Some(stats)),
        None => match player.stats {
            Some(stats) => (Some(StatsSource::Season), Some(stats)),
            None => (None, None),
        },
    };

    Some(PlayerProfile {
        player,
        measurements: hub.measurements(player_id),
        stats_view: session.stats_view,
        stats_source,
        stat_line: stats.map(|s| StatLine::select(&s, session.stats_view)),
        reports: session.reports_for(player_id).collect(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
