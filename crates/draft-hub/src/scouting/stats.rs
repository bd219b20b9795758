// Season totals and per-game averages from box-score rows.

use serde::{Deserialize, Serialize};

use crate::dataset::GameStatRow;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Exact sums across all of a player's stat rows.
///
/// Shooting makes/attempts and minutes are carried alongside the headline
/// totals so a 0.0 percentage can be told apart from "no attempts".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatTotals {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub games_played: f64,
    pub games_started: f64,
    pub fg_made: f64,
    pub fg_attempts: f64,
    pub three_pt_made: f64,
    pub three_pt_attempts: f64,
    pub ft_made: f64,
    pub ft_attempts: f64,
    pub minutes: f64,
}

/// Per-game rates and shooting percentages, each rounded to one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerGameStats {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub fg_percentage: f64,
    pub three_pt_percentage: f64,
    pub ft_percentage: f64,
    pub minutes: f64,
}

/// Aggregated statistics for one player. Only produced when at least one
/// stat row exists, so `total` and `per_game` are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total: StatTotals,
    pub per_game: PerGameStats,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Round to one decimal place, deciding on the exact stored binary value:
/// 1.45 is stored as 1.4499... and rounds down. Exact ties (only `x.25` and
/// `x.75` are representable) round away from zero.
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (value * 10.0).round() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

/// `made / attempts * 100` rounded to one decimal; 0.0 when there were no
/// attempts or the result is not finite.
pub fn shooting_percentage(made: f64, attempts: f64) -> f64 {
    if attempts <= 0.0 {
        return 0.0;
    }
    let pct = round1(made / attempts * 100.0);
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

fn rate(total: f64, games: f64) -> f64 {
    let value = round1(total / games);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Sum a player's stat rows into totals and per-game averages.
///
/// Returns `None` when there are no rows: "no statistics" is its own state,
/// not a line of zeros. A missing column contributes 0. The per-game
/// denominator is the summed `GP` column when it is non-zero, otherwise the
/// row count.
pub fn aggregate<'a, I>(games: I) -> Option<PlayerStats>
where
    I: IntoIterator<Item = &'a GameStatRow>,
{
    let mut rows = 0usize;
    let mut total = StatTotals::default();
    for game in games {
        rows += 1;
        total.points += game.pts.unwrap_or(0.0);
        total.rebounds += game.trb.unwrap_or(0.0);
        total.assists += game.ast.unwrap_or(0.0);
        total.steals += game.stl.unwrap_or(0.0);
        total.blocks += game.blk.unwrap_or(0.0);
        total.turnovers += game.tov.unwrap_or(0.0);
        total.games_played += game.gp.unwrap_or(0.0);
        total.games_started += game.gs.unwrap_or(0.0);
        total.fg_made += game.fgm.unwrap_or(0.0);
        total.fg_attempts += game.fga.unwrap_or(0.0);
        total.three_pt_made += game.three_pm.unwrap_or(0.0);
        total.three_pt_attempts += game.three_pa.unwrap_or(0.0);
        total.ft_made += game.ft.unwrap_or(0.0);
        total.ft_attempts += game.fta.unwrap_or(0.0);
        total.minutes += game.mp.unwrap_or(0.0);
    }

    if rows == 0 {
        return None;
    }

    let games_denominator = if total.games_played > 0.0 {
        total.games_played
    } else {
        rows as f64
    };

    let per_game = PerGameStats {
        points: rate(total.points, games_denominator),
        rebounds: rate(total.rebounds, games_denominator),
        assists: rate(total.assists, games_denominator),
        steals: rate(total.steals, games_denominator),
        blocks: rate(total.blocks, games_denominator),
        turnovers: rate(total.turnovers, games_denominator),
        fg_percentage: shooting_percentage(total.fg_made, total.fg_attempts),
        three_pt_percentage: shooting_percentage(total.three_pt_made, total.three_pt_attempts),
        ft_percentage: shooting_percentage(total.ft_made, total.ft_attempts),
        minutes: rate(total.minutes, games_denominator),
    };

    Some(PlayerStats { total, per_game })
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

    fn row(pts: f64, trb: f64, ast: f64, gp: Option<f64>) -> GameStatRow {
        GameStatRow {
            player_id: 1,
            pts: Some(pts),
            trb: Some(trb),
            ast: Some(ast),
            gp,
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_has_no_stats() {
        assert!(aggregate(&Vec::<GameStatRow>::new()).is_none());
        assert!(aggregate(std::iter::empty()).is_none());
    }

    #[test]
    fn two_game_example() {
        let games = vec![row(10.0, 5.0, 2.0, Some(1.0)), row(20.0, 7.0, 4.0, Some(1.0))];
        let stats = aggregate(&games).unwrap();

        assert_eq!(stats.total.points, 30.0);
        assert_eq!(stats.total.rebounds, 12.0);
        assert_eq!(stats.total.assists, 6.0);
        assert_eq!(stats.total.games_played, 2.0);
        assert_eq!(stats.per_game.points, 15.0);
        assert_eq!(stats.per_game.rebounds, 6.0);
        assert_eq!(stats.per_game.assists, 3.0);
    }

    #[test]
    fn row_count_is_denominator_without_gp() {
        let games = vec![row(9.0, 0.0, 0.0, None), row(4.0, 0.0, 0.0, None), row(8.0, 0.0, 0.0, None)];
        let stats = aggregate(&games).unwrap();
        assert_eq!(stats.total.games_played, 0.0);
        assert_eq!(stats.per_game.points, 7.0);
    }

    #[test]
    fn zero_gp_falls_back_to_row_count() {
        let games = vec![row(12.0, 0.0, 0.0, Some(0.0)), row(6.0, 0.0, 0.0, Some(0.0))];
        let stats = aggregate(&games).unwrap();
        assert_eq!(stats.per_game.points, 9.0);
    }

    #[test]
    fn season_lines_use_summed_gp() {
        // Two season lines: 31 and 4 games.
        let games = vec![row(620.0, 0.0, 0.0, Some(31.0)), row(50.0, 0.0, 0.0, Some(4.0))];
        let stats = aggregate(&games).unwrap();
        assert_eq!(stats.total.games_played, 35.0);
        assert!(approx_eq(stats.per_game.points, 670.0 / 35.0, 0.05));
        assert_eq!(stats.per_game.points, 19.1);
    }

    #[test]
    fn missing_columns_contribute_zero() {
        let games = vec![
            GameStatRow {
                player_id: 1,
                pts: Some(11.0),
                ..Default::default()
            },
            GameStatRow {
                player_id: 1,
                stl: Some(2.0),
                ..Default::default()
            },
        ];
        let stats = aggregate(&games).unwrap();
        assert_eq!(stats.total.points, 11.0);
        assert_eq!(stats.total.steals, 2.0);
        assert_eq!(stats.total.blocks, 0.0);
        assert_eq!(stats.per_game.steals, 1.0);
        assert_eq!(stats.per_game.minutes, 0.0);
    }

    #[test]
    fn zero_attempts_is_zero_percent() {
        let games = vec![GameStatRow {
            player_id: 1,
            fgm: Some(0.0),
            fga: Some(0.0),
            gp: Some(1.0),
            ..Default::default()
        }];
        let stats = aggregate(&games).unwrap();
        assert_eq!(stats.per_game.fg_percentage, 0.0);
        assert_eq!(stats.per_game.three_pt_percentage, 0.0);
        assert_eq!(stats.per_game.ft_percentage, 0.0);
        assert!(!stats.per_game.fg_percentage.is_nan());
        assert_eq!(stats.total.fg_attempts, 0.0);
    }

    #[test]
    fn shooting_percentages_are_rounded() {
        let games = vec![
            GameStatRow {
                player_id: 1,
                fgm: Some(7.0),
                fga: Some(15.0),
                three_pm: Some(2.0),
                three_pa: Some(6.0),
                ft: Some(5.0),
                fta: Some(6.0),
                gp: Some(1.0),
                ..Default::default()
            },
            GameStatRow {
                player_id: 1,
                fgm: Some(4.0),
                fga: Some(9.0),
                three_pm: Some(1.0),
                three_pa: Some(3.0),
                ft: Some(0.0),
                fta: Some(0.0),
                gp: Some(1.0),
                ..Default::default()
            },
        ];
        let stats = aggregate(&games).unwrap();
        // 11/24, 3/9, 5/6
        assert_eq!(stats.per_game.fg_percentage, 45.8);
        assert_eq!(stats.per_game.three_pt_percentage, 33.3);
        assert_eq!(stats.per_game.ft_percentage, 83.3);
        assert_eq!(stats.total.fg_made, 11.0);
        assert_eq!(stats.total.fg_attempts, 24.0);
    }

    #[test]
    fn games_started_and_minutes() {
        let games = vec![
            GameStatRow {
                player_id: 1,
                gp: Some(1.0),
                gs: Some(1.0),
                mp: Some(32.0),
                ..Default::default()
            },
            GameStatRow {
                player_id: 1,
                gp: Some(1.0),
                gs: Some(0.0),
                mp: Some(25.5),
                ..Default::default()
            },
        ];
        let stats = aggregate(&games).unwrap();
        assert_eq!(stats.total.games_started, 1.0);
        assert_eq!(stats.total.minutes, 57.5);
        assert_eq!(stats.per_game.minutes, 28.8);
    }

    #[test]
    fn round1_behaviour() {
        assert_eq!(round1(15.0), 15.0);
        assert_eq!(round1(6.66), 6.7);
        assert_eq!(round1(6.64), 6.6);
        assert_eq!(shooting_percentage(1.0, 3.0), 33.3);
        assert_eq!(shooting_percentage(3.0, 0.0), 0.0);
    }

    #[test]
    fn round1_follows_binary_value_not_decimal_literal() {
        // 29/20 and 3/20 sit just below the .x5 boundary in binary.
        assert_eq!(round1(29.0 / 20.0), 1.4);
        assert_eq!(round1(3.0 / 20.0), 0.1);
        assert_eq!(round1(1.05), 1.1);
        // Exact ties round up.
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(28.75), 28.8);
        assert_eq!(round1(-0.25), -0.3);
        assert!(round1(f64::NAN).is_nan());
    }

    #[test]
    fn per_game_rounding_uses_stored_value() {
        let stats = aggregate(&[row(29.0, 3.0, 0.0, Some(20.0))]).unwrap();
        assert_eq!(stats.per_game.points, 1.4);
        assert_eq!(stats.per_game.rebounds, 0.1);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let stats = aggregate(&[row(10.0, 5.0, 2.0, Some(1.0))]).unwrap();
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["perGame"]["points"], 10.0);
        assert_eq!(value["total"]["gamesPlayed"], 1.0);
        assert!(value["perGame"].get("threePtPercentage").is_some());
    }
}
