// In-memory prospect store built once from the dataset.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use crate::dataset::{CombineMeasurements, Dataset, GameLogRow, GameStatRow};
use crate::scouting::board::{self, BoardEntry};
use crate::scouting::merge::{self, MergedPlayer};
use crate::scouting::stats::{self, PlayerStats};

/// Headline numbers for the landing view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubSummary {
    pub total_prospects: usize,
    /// Mean of (reference year - birth year); `None` when no birth date parses.
    pub average_age: Option<f64>,
    /// Distinct scouts across all ranking rows; 0 for an empty hub.
    pub scout_count: usize,
}

/// Merged prospects plus the side tables looked up by player id.
///
/// Everything is computed in `from_dataset` and read-only afterwards, so a
/// `DraftHub` can be shared across threads behind a plain reference.
#[derive(Debug, Clone)]
pub struct DraftHub {
    players: Vec<MergedPlayer>,
    index: HashMap<u32, usize>,
    measurements: HashMap<u32, CombineMeasurements>,
    game_logs: HashMap<u32, Vec<GameLogRow>>,
}

impl DraftHub {
    /// Merge the dataset and index it by player id.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let players = merge::merge(&dataset.bio, &dataset.scout_rankings, &dataset.stats);

        let index = players
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.player_id(), idx))
            .collect();

        let mut measurements = HashMap::with_capacity(dataset.measurements.len());
        for m in dataset.measurements {
            if measurements.contains_key(&m.player_id) {
                warn!("duplicate measurements for playerId {}, keeping the first", m.player_id);
                continue;
            }
            measurements.insert(m.player_id, m);
        }

        let mut game_logs: HashMap<u32, Vec<GameLogRow>> = HashMap::new();
        for log in dataset.game_logs {
            game_logs.entry(log.player_id).or_default().push(log);
        }

        info!(
            "Draft hub ready: {} prospects, {} with measurements, {} with game logs",
            players.len(),
            measurements.len(),
            game_logs.len()
        );

        Self {
            players,
            index,
            measurements,
            game_logs,
        }
    }

    /// All prospects in dataset order.
    pub fn players(&self) -> &[MergedPlayer] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Look up a prospect; `None` when the id is unknown.
    pub fn player(&self, player_id: u32) -> Option<&MergedPlayer> {
        self.index.get(&player_id).map(|&idx| &self.players[idx])
    }

    pub fn measurements(&self, player_id: u32) -> Option<&CombineMeasurements> {
        self.measurements.get(&player_id)
    }

    /// Raw game logs for a prospect, in dataset order.
    pub fn game_logs(&self, player_id: u32) -> &[GameLogRow] {
        self.game_logs
            .get(&player_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Aggregate a prospect's game logs: one game per log row, a start when
    /// `gs` is non-zero. `None` without logs.
    pub fn game_log_stats(&self, player_id: u32) -> Option<PlayerStats> {
        let rows: Vec<GameStatRow> = self
            .game_logs(player_id)
            .iter()
            .map(GameLogRow::to_stat_row)
            .collect();
        stats::aggregate(&rows)
    }

    /// Prospects ordered by consensus rank.
    pub fn big_board(&self, limit: Option<usize>) -> Vec<BoardEntry<'_>> {
        board::build_board(&self.players, limit)
    }

    /// Prospect count, scout count and average age as of `today`'s year.
    pub fn summary(&self, today: NaiveDate) -> HubSummary {
        let ages: Vec<f64> = self
            .players
            .iter()
            .filter_map(|p| parse_birth_date(&p.bio.birth_date))
            .map(|born| (today.year() - born.year()) as f64)
            .collect();

        let average_age = if ages.is_empty() {
            None
        } else {
            Some(ages.iter().sum::<f64>() / ages.len() as f64)
        };

        let scouts: BTreeSet<&str> = self
            .players
            .iter()
            .flat_map(|p| p.scout_rankings.keys().map(String::as_str))
            .collect();

        HubSummary {
            total_prospects: self.players.len(),
            average_age,
            scout_count: scouts.len(),
        }
    }
}

/// Parse the date part of an ISO-8601 birth date ("2006-03-01" or
/// "2006-03-01T00:00:00").
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
