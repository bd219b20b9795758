// Dataset loading and load-time validation.
//
// The document is parsed into typed rows in one pass, then checked once.
// Structural problems (duplicate bio ids, a rank of 0) fail the load;
// dangling foreign keys only warn, since the merge tolerates them.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use super::records::Dataset;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed dataset {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("dataset validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Load and validate the dataset document at `path`.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let dataset = read_dataset(std::io::BufReader::new(file), &path.display().to_string())?;
    info!(
        "Loaded dataset {}: {} prospects, {} ranking rows, {} stat rows, {} measurements, {} game logs",
        path.display(),
        dataset.bio.len(),
        dataset.scout_rankings.len(),
        dataset.stats.len(),
        dataset.measurements.len(),
        dataset.game_logs.len()
    );
    Ok(dataset)
}

/// Parse and validate a dataset from a JSON string.
pub fn parse_dataset(json: &str) -> Result<Dataset, DatasetError> {
    read_dataset(json.as_bytes(), "<inline>")
}

fn read_dataset<R: Read>(rdr: R, label: &str) -> Result<Dataset, DatasetError> {
    let dataset: Dataset = serde_json::from_reader(rdr).map_err(|e| DatasetError::Json {
        path: label.to_string(),
        source: e,
    })?;
    validate(&dataset)?;
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(dataset: &Dataset) -> Result<(), DatasetError> {
    let mut bio_ids = HashSet::with_capacity(dataset.bio.len());
    for record in &dataset.bio {
        if !bio_ids.insert(record.player_id) {
            return Err(DatasetError::Validation(format!(
                "duplicate playerId {} in bio",
                record.player_id
            )));
        }
    }

    let mut ranking_rows: HashMap<u32, usize> = HashMap::new();
    let mut first_scouts: Option<BTreeSet<&str>> = None;
    for row in &dataset.scout_rankings {
        for (scout, rank) in &row.rankings {
            if *rank == Some(0) {
                return Err(DatasetError::Validation(format!(
                    "scout '{}' gave playerId {} rank 0; ranks start at 1",
                    scout, row.player_id
                )));
            }
        }

        *ranking_rows.entry(row.player_id).or_default() += 1;
        if !bio_ids.contains(&row.player_id) {
            warn!("ranking row for unknown playerId {}", row.player_id);
        }

        let scouts: BTreeSet<&str> = row.rankings.keys().map(String::as_str).collect();
        match &first_scouts {
            None => first_scouts = Some(scouts),
            Some(expected) if *expected != scouts => {
                warn!(
                    "ranking row for playerId {} has a different scout set ({} scouts, expected {})",
                    row.player_id,
                    scouts.len(),
                    expected.len()
                );
            }
            Some(_) => {}
        }
    }

    for (player_id, count) in &ranking_rows {
        if *count > 1 {
            warn!(
                "playerId {} has {} ranking rows; only the first is used",
                player_id, count
            );
        }
    }

    let orphan_stats = dataset
        .stats
        .iter()
        .filter(|row| !bio_ids.contains(&row.player_id))
        .count();
    if orphan_stats > 0 {
        warn!("{} stat rows reference unknown playerIds", orphan_stats);
    }

    let orphan_logs = dataset
        .game_logs
        .iter()
        .filter(|row| !bio_ids.contains(&row.player_id))
        .count();
    if orphan_logs > 0 {
        warn!("{} game log rows reference unknown playerIds", orphan_logs);
    }

    for m in &dataset.measurements {
        if !bio_ids.contains(&m.player_id) {
            debug!("measurements for unknown playerId {}", m.player_id);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
