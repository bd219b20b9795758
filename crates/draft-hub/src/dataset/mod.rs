// Bundled prospect dataset: typed rows and the loader.

pub mod load;
pub mod records;

pub use load::{load_dataset, parse_dataset, DatasetError};
pub use records::{
    feet_inches, BioRecord, CombineMeasurements, Dataset, GameLogRow, GameStatRow, ScoutRankingRow,
    ScoutRankings,
};
