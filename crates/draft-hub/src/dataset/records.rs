// Typed rows of the bundled prospect dataset.
//
// Field names follow the source document verbatim (camelCase bio keys,
// abbreviated box-score codes for season stat lines, lowercase keys for game
// logs) so the JSON loads without any remapping layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Scout name -> submitted rank. `None` means the scout has not ranked the
/// player; it is never treated as rank 0.
pub type ScoutRankings = BTreeMap<String, Option<u32>>;

// ---------------------------------------------------------------------------
// Top-level document
// ---------------------------------------------------------------------------

/// The whole dataset document. `bio` and `scoutRankings` are required;
/// `stats`, `measurements` and `game_logs` may be omitted, leaving every
/// player without statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub bio: Vec<BioRecord>,
    pub scout_rankings: Vec<ScoutRankingRow>,
    #[serde(default)]
    pub stats: Vec<GameStatRow>,
    #[serde(default)]
    pub measurements: Vec<CombineMeasurements>,
    #[serde(default, rename = "game_logs")]
    pub game_logs: Vec<GameLogRow>,
}

// ---------------------------------------------------------------------------
// Biographical records
// ---------------------------------------------------------------------------

/// Identity and descriptive attributes of a prospect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BioRecord {
    pub player_id: u32,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    /// ISO-8601 date, optionally with a time component.
    pub birth_date: String,
    /// Height in inches.
    pub height: f64,
    /// Weight in pounds.
    pub weight: f64,
    #[serde(default)]
    pub high_school: Option<String>,
    #[serde(default)]
    pub high_school_state: Option<String>,
    pub home_town: String,
    #[serde(default)]
    pub home_state: Option<String>,
    pub home_country: String,
    pub nationality: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub current_team: String,
    pub league: String,
    pub league_type: String,
}

// ---------------------------------------------------------------------------
// Scout rankings
// ---------------------------------------------------------------------------

/// One ranking row: the player id plus one column per scout. Every key other
/// than `playerId` is captured into `rankings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutRankingRow {
    #[serde(rename = "playerId")]
    pub player_id: u32,
    #[serde(flatten)]
    pub rankings: ScoutRankings,
}

// ---------------------------------------------------------------------------
// Season stat lines
// ---------------------------------------------------------------------------

/// A box-score stat line for a player. Several rows may share a `playerId`.
/// Every numeric column is optional; a missing value contributes nothing to
/// aggregated totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStatRow {
    #[serde(rename = "playerId")]
    pub player_id: u32,
    #[serde(rename = "Season", default, deserialize_with = "text_or_number")]
    pub season: Option<String>,
    #[serde(rename = "League", default)]
    pub league: Option<String>,
    #[serde(rename = "Team", default)]
    pub team: Option<String>,
    #[serde(rename = "GP", default)]
    pub gp: Option<f64>,
    #[serde(rename = "GS", default)]
    pub gs: Option<f64>,
    #[serde(rename = "MP", default)]
    pub mp: Option<f64>,
    #[serde(rename = "FGM", default)]
    pub fgm: Option<f64>,
    #[serde(rename = "FGA", default)]
    pub fga: Option<f64>,
    #[serde(rename = "FG%", default)]
    pub fg_pct: Option<f64>,
    #[serde(rename = "3PM", default)]
    pub three_pm: Option<f64>,
    #[serde(rename = "3PA", default)]
    pub three_pa: Option<f64>,
    #[serde(rename = "3P%", default)]
    pub three_pct: Option<f64>,
    #[serde(rename = "FT", default)]
    pub ft: Option<f64>,
    #[serde(rename = "FTA", default)]
    pub fta: Option<f64>,
    #[serde(rename = "FT%", default)]
    pub ft_pct: Option<f64>,
    #[serde(rename = "ORB", default)]
    pub orb: Option<f64>,
    #[serde(rename = "DRB", default)]
    pub drb: Option<f64>,
    #[serde(rename = "TRB", default)]
    pub trb: Option<f64>,
    #[serde(rename = "AST", default)]
    pub ast: Option<f64>,
    #[serde(rename = "STL", default)]
    pub stl: Option<f64>,
    #[serde(rename = "BLK", default)]
    pub blk: Option<f64>,
    #[serde(rename = "TOV", default)]
    pub tov: Option<f64>,
    #[serde(rename = "PF", default)]
    pub pf: Option<f64>,
    #[serde(rename = "PTS", default)]
    pub pts: Option<f64>,
}

// ---------------------------------------------------------------------------
// Per-game logs
// ---------------------------------------------------------------------------

/// A single game's box score. Unlike `GameStatRow`, each log row is exactly
/// one game; `gs` is a started flag (non-zero = started).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLogRow {
    pub player_id: u32,
    #[serde(default)]
    pub game_id: Option<u64>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub season: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub gs: Option<f64>,
    /// Minutes played as "MM:SS".
    #[serde(default)]
    pub time_played: Option<String>,
    #[serde(default)]
    pub fgm: Option<f64>,
    #[serde(default)]
    pub fga: Option<f64>,
    #[serde(default)]
    pub tpm: Option<f64>,
    #[serde(default)]
    pub tpa: Option<f64>,
    #[serde(default)]
    pub ftm: Option<f64>,
    #[serde(default)]
    pub fta: Option<f64>,
    #[serde(default)]
    pub oreb: Option<f64>,
    #[serde(default)]
    pub dreb: Option<f64>,
    #[serde(default)]
    pub reb: Option<f64>,
    #[serde(default)]
    pub ast: Option<f64>,
    #[serde(default)]
    pub stl: Option<f64>,
    #[serde(default)]
    pub blk: Option<f64>,
    #[serde(default)]
    pub tov: Option<f64>,
    #[serde(default)]
    pub pf: Option<f64>,
    #[serde(default)]
    pub pts: Option<f64>,
    #[serde(default)]
    pub plus_minus: Option<f64>,
}

impl GameLogRow {
    /// Minutes played parsed from `timePlayed` ("MM:SS" or plain minutes).
    /// Unparseable values yield `None`.
    pub fn minutes(&self) -> Option<f64> {
        let raw = self.time_played.as_deref()?.trim();
        match raw.split_once(':') {
            Some((min, sec)) => {
                let min: f64 = min.trim().parse().ok()?;
                let sec: f64 = sec.trim().parse().ok()?;
                Some(min + sec / 60.0)
            }
            None => raw.parse().ok(),
        }
    }

    /// Re-express this log as a one-game stat line so it can run through the
    /// same aggregation as season rows.
    pub fn to_stat_row(&self) -> GameStatRow {
        let started = self.gs.is_some_and(|gs| gs > 0.0);
        GameStatRow {
            player_id: self.player_id,
            season: self.season.clone(),
            league: self.league.clone(),
            team: self.team.clone(),
            gp: Some(1.0),
            gs: Some(if started { 1.0 } else { 0.0 }),
            mp: self.minutes(),
            fgm: self.fgm,
            fga: self.fga,
            fg_pct: None,
            three_pm: self.tpm,
            three_pa: self.tpa,
            three_pct: None,
            ft: self.ftm,
            fta: self.fta,
            ft_pct: None,
            orb: self.oreb,
            drb: self.dreb,
            trb: self.reb,
            ast: self.ast,
            stl: self.stl,
            blk: self.blk,
            tov: self.tov,
            pf: self.pf,
            pts: self.pts,
        }
    }
}

// ---------------------------------------------------------------------------
// Combine measurements
// ---------------------------------------------------------------------------

/// Combine measurements and athletic testing. Lengths in inches, times in
/// seconds. Any test a player skipped is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombineMeasurements {
    pub player_id: u32,
    #[serde(default)]
    pub height_no_shoes: Option<f64>,
    #[serde(default)]
    pub height_shoes: Option<f64>,
    #[serde(default)]
    pub wingspan: Option<f64>,
    #[serde(default)]
    pub reach: Option<f64>,
    #[serde(default)]
    pub max_vertical: Option<f64>,
    #[serde(default)]
    pub no_step_vertical: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub body_fat: Option<f64>,
    #[serde(default)]
    pub hand_length: Option<f64>,
    #[serde(default)]
    pub hand_width: Option<f64>,
    #[serde(default)]
    pub agility: Option<f64>,
    #[serde(default)]
    pub sprint: Option<f64>,
    #[serde(default)]
    pub shuttle_best: Option<f64>,
}

/// Split a length in inches into whole feet and remaining inches (rounded).
pub fn feet_inches(inches: f64) -> (u32, u32) {
    let total = inches.round().max(0.0) as u32;
    (total / 12, total % 12)
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Season labels show up both as strings ("2024-25") and as bare years.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Label>::deserialize(deserializer)? {
        Some(Label::Text(s)) => Some(s),
        Some(Label::Int(n)) => Some(n.to_string()),
        Some(Label::Float(f)) => Some(f.to_string()),
        None => None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
