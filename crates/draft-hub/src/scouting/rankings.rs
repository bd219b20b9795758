// Consensus ranking helpers over a player's scout rankings.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::dataset::ScoutRankings;

// ---------------------------------------------------------------------------
// Consensus rank
// ---------------------------------------------------------------------------

/// Mean scout rank, or `Unranked` when no scout submitted one.
///
/// Ordering is ascending by rank with `Unranked` after every numeric rank, so
/// sorting a board by this value puts unranked prospects at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsensusRank {
    Ranked(f64),
    Unranked,
}

impl ConsensusRank {
    /// Numeric form; `Unranked` maps to positive infinity.
    pub fn as_f64(self) -> f64 {
        match self {
            ConsensusRank::Ranked(avg) => avg,
            ConsensusRank::Unranked => f64::INFINITY,
        }
    }

    pub fn is_ranked(self) -> bool {
        matches!(self, ConsensusRank::Ranked(_))
    }
}

impl Eq for ConsensusRank {}

impl PartialOrd for ConsensusRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConsensusRank {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ConsensusRank::Ranked(a), ConsensusRank::Ranked(b)) => a.total_cmp(b),
            (ConsensusRank::Ranked(_), ConsensusRank::Unranked) => Ordering::Less,
            (ConsensusRank::Unranked, ConsensusRank::Ranked(_)) => Ordering::Greater,
            (ConsensusRank::Unranked, ConsensusRank::Unranked) => Ordering::Equal,
        }
    }
}

impl fmt::Display for ConsensusRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsensusRank::Ranked(avg) => write!(f, "{avg:.2}"),
            ConsensusRank::Unranked => write!(f, "unranked"),
        }
    }
}

/// Serialized as the mean, or `null` when unranked.
impl Serialize for ConsensusRank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConsensusRank::Ranked(avg) => serializer.serialize_some(avg),
            ConsensusRank::Unranked => serializer.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Ranks that were actually submitted, in scout-name order.
pub fn submitted_ranks(rankings: &ScoutRankings) -> Vec<u32> {
    rankings.values().filter_map(|r| *r).collect()
}

/// Mean of all submitted ranks.
pub fn average_rank(rankings: &ScoutRankings) -> ConsensusRank {
    let ranks = submitted_ranks(rankings);
    if ranks.is_empty() {
        return ConsensusRank::Unranked;
    }
    let sum: f64 = ranks.iter().map(|&r| r as f64).sum();
    ConsensusRank::Ranked(sum / ranks.len() as f64)
}

/// Population variance of the submitted ranks. `None` with fewer than two
/// submitted ranks.
pub fn consensus_variance(rankings: &ScoutRankings) -> Option<f64> {
    let ranks = submitted_ranks(rankings);
    if ranks.len() < 2 {
        return None;
    }
    let n = ranks.len() as f64;
    let mean = ranks.iter().map(|&r| r as f64).sum::<f64>() / n;
    let variance = ranks.iter().map(|&r| (r as f64 - mean).powi(2)).sum::<f64>() / n;
    Some(variance.max(0.0))
}

// ---------------------------------------------------------------------------
// High / low indicator
// ---------------------------------------------------------------------------

/// Where one scout's rank sits among all of a player's submitted ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankIndicator {
    /// The scout ranks the player best (lowest number).
    High,
    /// The scout ranks the player worst (highest number).
    Low,
}

impl RankIndicator {
    pub fn label(self) -> &'static str {
        match self {
            RankIndicator::High => "High",
            RankIndicator::Low => "Low",
        }
    }
}

/// `High` when `rank` is at or below the best submitted rank, otherwise `Low`
/// when at or above the worst, otherwise `None`. When every scout agrees the
/// single rank counts as `High`.
pub fn rank_indicator(rankings: &ScoutRankings, rank: u32) -> Option<RankIndicator> {
    let ranks = submitted_ranks(rankings);
    let (Some(&min), Some(&max)) = (ranks.iter().min(), ranks.iter().max()) else {
        return None;
    };
    if rank <= min {
        Some(RankIndicator::High)
    } else if rank >= max {
        Some(RankIndicator::Low)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn rankings(pairs: &[(&str, Option<u32>)]) -> ScoutRankings {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn average_of_submitted_ranks() {
        let r = rankings(&[("ScoutX", Some(3)), ("ScoutY", Some(5))]);
        assert_eq!(average_rank(&r), ConsensusRank::Ranked(4.0));
    }

    #[test]
    fn absent_ranks_are_skipped_not_zero() {
        let r = rankings(&[("A", Some(6)), ("B", None), ("C", Some(10))]);
        assert_eq!(average_rank(&r), ConsensusRank::Ranked(8.0));
    }

    #[test]
    fn empty_mapping_is_unranked() {
        assert_eq!(average_rank(&ScoutRankings::new()), ConsensusRank::Unranked);
        let all_null = rankings(&[("A", None), ("B", None)]);
        assert_eq!(average_rank(&all_null), ConsensusRank::Unranked);
        assert!(average_rank(&all_null).as_f64().is_infinite());
    }

    #[test]
    fn unranked_sorts_last() {
        let mut ranks = vec![
            ConsensusRank::Unranked,
            ConsensusRank::Ranked(60.0),
            ConsensusRank::Ranked(1.5),
            ConsensusRank::Unranked,
            ConsensusRank::Ranked(1e9),
        ];
        ranks.sort();
        assert_eq!(ranks[0], ConsensusRank::Ranked(1.5));
        assert_eq!(ranks[1], ConsensusRank::Ranked(60.0));
        assert_eq!(ranks[2], ConsensusRank::Ranked(1e9));
        assert!(!ranks[3].is_ranked());
        assert!(!ranks[4].is_ranked());
    }

    #[test]
    fn variance_needs_two_ranks() {
        assert_eq!(consensus_variance(&ScoutRankings::new()), None);
        assert_eq!(consensus_variance(&rankings(&[("A", Some(4)), ("B", None)])), None);
    }

    #[test]
    fn population_variance() {
        // ranks 2, 4, 6: mean 4, squared deviations 4 + 0 + 4 over 3
        let r = rankings(&[("A", Some(2)), ("B", Some(4)), ("C", Some(6))]);
        let v = consensus_variance(&r).unwrap();
        assert!(approx_eq(v, 8.0 / 3.0, 1e-9));

        let agree = rankings(&[("A", Some(7)), ("B", Some(7))]);
        assert_eq!(consensus_variance(&agree), Some(0.0));
    }

    #[test]
    fn indicator_high_low_and_interior() {
        let r = rankings(&[("A", Some(2)), ("B", Some(5)), ("C", Some(9)), ("D", None)]);
        assert_eq!(rank_indicator(&r, 2), Some(RankIndicator::High));
        assert_eq!(rank_indicator(&r, 9), Some(RankIndicator::Low));
        assert_eq!(rank_indicator(&r, 5), None);
    }

    #[test]
    fn indicator_when_all_scouts_agree() {
        let r = rankings(&[("A", Some(4)), ("B", Some(4))]);
        assert_eq!(rank_indicator(&r, 4), Some(RankIndicator::High));
    }

    #[test]
    fn indicator_without_ranks() {
        assert_eq!(rank_indicator(&ScoutRankings::new(), 3), None);
    }

    #[test]
    fn display_and_serialize() {
        assert_eq!(ConsensusRank::Ranked(4.0).to_string(), "4.00");
        assert_eq!(ConsensusRank::Unranked.to_string(), "unranked");
        assert_eq!(serde_json::to_string(&ConsensusRank::Ranked(4.5)).unwrap(), "4.5");
        assert_eq!(serde_json::to_string(&ConsensusRank::Unranked).unwrap(), "null");
        assert_eq!(serde_json::to_string(&RankIndicator::High).unwrap(), "\"high\"");
    }
}
