// Big board CSV export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::scouting::board::BoardEntry;
use crate::scouting::rankings::ConsensusRank;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

const HEADERS: [&str; 9] = [
    "rank", "playerId", "name", "team", "consensus", "variance", "ppg", "rpg", "apg",
];

fn fixed2(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn fixed1(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_default()
}

/// Write the board as CSV, one row per entry in board order.
///
/// Unranked consensus, missing variance and missing stats are empty cells.
pub fn write_board_csv<W: Write>(board: &[BoardEntry<'_>], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;

    for entry in board {
        let player = entry.player;
        let consensus = match entry.consensus {
            ConsensusRank::Ranked(avg) => Some(avg),
            ConsensusRank::Unranked => None,
        };
        let per_game = player.stats.map(|s| s.per_game);

        wtr.write_record(&[
            entry.position.to_string(),
            entry.player_id.to_string(),
            player.name().to_string(),
            player.bio.current_team.clone(),
            fixed2(consensus),
            fixed2(entry.variance),
            fixed1(per_game.map(|p| p.points)),
            fixed1(per_game.map(|p| p.rebounds)),
            fixed1(per_game.map(|p| p.assists)),
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the board to a CSV file at `path`, replacing any existing file.
pub fn export_board_csv(board: &[BoardEntry<'_>], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_board_csv(board, file)?;
    info!("Wrote {} board rows to {}", board.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{BioRecord, GameStatRow, ScoutRankingRow};
    use crate::scouting::{build_board, merge};

    fn bio(id: u32, name: &str) -> BioRecord {
        BioRecord {
            player_id: id,
            name: name.into(),
            first_name: String::new(),
            last_name: String::new(),
            birth_date: "2006-01-01".into(),
            height: 80.0,
            weight: 210.0,
            high_school: None,
            high_school_state: None,
            home_town: "Town".into(),
            home_state: None,
            home_country: "USA".into(),
            nationality: "USA".into(),
            photo_url: None,
            current_team: "Duke".into(),
            league: "NCAA".into(),
            league_type: "NCAA".into(),
        }
    }

    fn to_csv(board: &[BoardEntry<'_>]) -> String {
        let mut buf = Vec::new();
        write_board_csv(board, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn rows_follow_board_order() {
        let bio = vec![bio(1, "Plain Name"), bio(2, "Smith, Jr.")];
        let rankings = vec![
            ScoutRankingRow {
                player_id: 1,
                rankings: [("A".to_string(), Some(4)), ("B".to_string(), Some(6))]
                    .into_iter()
                    .collect(),
            },
            ScoutRankingRow {
                player_id: 2,
                rankings: [("A".to_string(), Some(1)), ("B".to_string(), Some(2))]
                    .into_iter()
                    .collect(),
            },
        ];
        let stats = vec![GameStatRow {
            player_id: 2,
            gp: Some(2.0),
            pts: Some(41.0),
            trb: Some(13.0),
            ast: Some(6.0),
            ..Default::default()
        }];
        let players = merge(&bio, &rankings, &stats);
        let board = build_board(&players, None);

        let csv = to_csv(&board);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "rank,playerId,name,team,consensus,variance,ppg,rpg,apg");
        assert_eq!(lines[1], "1,2,\"Smith, Jr.\",Duke,1.50,0.25,20.5,6.5,3.0");
        assert_eq!(lines[2], "2,1,Plain Name,Duke,5.00,1.00,,,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn unranked_leaves_consensus_empty() {
        let bio = vec![bio(7, "Solo")];
        let players = merge(&bio, &[], &[]);
        let board = build_board(&players, None);
        let csv = to_csv(&board);
        assert_eq!(csv.lines().nth(1), Some("1,7,Solo,Duke,,,,,"));
    }

    #[test]
    fn empty_board_writes_header_only() {
        assert_eq!(to_csv(&[]).lines().count(), 1);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join("draft_hub_export_missing_dir")
            .join("nested")
            .join("board.csv");
        let err = export_board_csv(&[], &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
