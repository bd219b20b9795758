// Derivation core: merge, stat aggregation, consensus rankings, big board.

pub mod board;
pub mod merge;
pub mod rankings;
pub mod stats;

pub use board::{build_board, BoardEntry, ScoutMark};
pub use merge::{merge, MergedPlayer};
pub use rankings::{average_rank, consensus_variance, rank_indicator, ConsensusRank, RankIndicator};
pub use stats::{aggregate, PerGameStats, PlayerStats, StatTotals};
