// Big board: prospects ordered by consensus scout rank.

use serde::Serialize;

use crate::scouting::merge::MergedPlayer;
use crate::scouting::rankings::{self, ConsensusRank, RankIndicator};

/// One scout's submitted rank for a board entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutMark {
    pub scout: String,
    pub rank: u32,
    pub indicator: Option<RankIndicator>,
}

/// A ranked row on the board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry<'a> {
    /// 1-based board position.
    pub position: usize,
    #[serde(skip)]
    pub player: &'a MergedPlayer,
    pub player_id: u32,
    pub consensus: ConsensusRank,
    pub variance: Option<f64>,
    /// Submitted ranks only; scouts with no rank are left out.
    pub marks: Vec<ScoutMark>,
}

/// Build the board from merged players.
///
/// Sorting is stable, so players with equal consensus keep dataset order, and
/// unranked players sink to the bottom. `limit` of `None` keeps everyone.
pub fn build_board(players: &[MergedPlayer], limit: Option<usize>) -> Vec<BoardEntry<'_>> {
    let mut ordered: Vec<(&MergedPlayer, ConsensusRank)> =
        players.iter().map(|p| (p, p.average_rank())).collect();
    ordered.sort_by(|a, b| a.1.cmp(&b.1));

    if let Some(limit) = limit {
        ordered.truncate(limit);
    }

    ordered
        .into_iter()
        .enumerate()
        .map(|(idx, (player, consensus))| {
            let marks = player
                .scout_rankings
                .iter()
                .filter_map(|(scout, rank)| {
                    rank.map(|rank| ScoutMark {
                        scout: scout.clone(),
                        rank,
                        indicator: rankings::rank_indicator(&player.scout_rankings, rank),
                    })
                })
                .collect();

            BoardEntry {
                position: idx + 1,
                player,
                player_id: player.player_id(),
                consensus,
                variance: player.consensus_variance(),
                marks,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
