// Join bio, scout rankings and stat rows into one record per prospect.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::dataset::{BioRecord, GameStatRow, ScoutRankingRow, ScoutRankings};
use crate::scouting::rankings::{self, ConsensusRank};
use crate::scouting::stats::{self, PlayerStats};

/// A prospect with everything the board and profile need.
///
/// Serializes as the bio fields plus `scoutRankings` and `stats`, matching
/// the shape of the dataset's own keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedPlayer {
    #[serde(flatten)]
    pub bio: BioRecord,
    /// Scout name -> rank. Empty when the player has no ranking row.
    pub scout_rankings: ScoutRankings,
    /// `None` when the player has no stat rows.
    pub stats: Option<PlayerStats>,
}

impl MergedPlayer {
    pub fn player_id(&self) -> u32 {
        self.bio.player_id
    }

    pub fn name(&self) -> &str {
        &self.bio.name
    }

    pub fn average_rank(&self) -> ConsensusRank {
        rankings::average_rank(&self.scout_rankings)
    }

    pub fn consensus_variance(&self) -> Option<f64> {
        rankings::consensus_variance(&self.scout_rankings)
    }
}

/// Group rows by `playerId`, preserving their relative order.
pub fn group_by_player<T, F>(rows: &[T], key: F) -> HashMap<u32, Vec<&T>>
where
    F: Fn(&T) -> u32,
{
    let mut groups: HashMap<u32, Vec<&T>> = HashMap::new();
    for row in rows {
        groups.entry(key(row)).or_default().push(row);
    }
    groups
}

/// Merge the three collections into one `MergedPlayer` per bio record, in
/// `bio` order.
///
/// A player without a ranking row gets an empty mapping; a player without
/// stat rows gets `stats: None`. When several ranking rows share a player id
/// the first one wins. Never fails.
pub fn merge(
    bio: &[BioRecord],
    rankings: &[ScoutRankingRow],
    games: &[GameStatRow],
) -> Vec<MergedPlayer> {
    let mut rankings_by_player: HashMap<u32, &ScoutRankingRow> =
        HashMap::with_capacity(rankings.len());
    for row in rankings {
        rankings_by_player.entry(row.player_id).or_insert(row);
    }

    let games_by_player = group_by_player(games, |g| g.player_id);

    let merged: Vec<MergedPlayer> = bio
        .iter()
        .map(|record| {
            let scout_rankings = rankings_by_player
                .get(&record.player_id)
                .map(|row| row.rankings.clone())
                .unwrap_or_default();

            let stats = games_by_player
                .get(&record.player_id)
                .and_then(|rows| stats::aggregate(rows.iter().copied()));

            MergedPlayer {
                bio: record.clone(),
                scout_rankings,
                stats,
            }
        })
        .collect();

    debug!(
        "Merged {} players ({} without rankings, {} without stats)",
        merged.len(),
        merged.iter().filter(|p| p.scout_rankings.is_empty()).count(),
        merged.iter().filter(|p| p.stats.is_none()).count()
    );

    merged
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
