// Draft hub entry point.
//
// Startup sequence:
// 1. Load config (copying defaults on first run)
// 2. Initialize tracing (log to file, filter from config)
// 3. Load and validate the prospect dataset
// 4. Build the hub (merge, index)
// 5. Print the summary and big board
// 6. Export the board to CSV when configured

use std::path::Path;

use draft_hub::config::{self, LoggingConfig};
use draft_hub::dataset;
use draft_hub::export;
use draft_hub::hub::DraftHub;
use draft_hub::scouting::BoardEntry;

use anyhow::Context;
use chrono::Local;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;
    info!("Draft hub starting up");
    info!(
        "Config loaded: dataset={}, board limit={}",
        config.dataset.path, config.board.limit
    );

    // 3. Load dataset
    let data = dataset::load_dataset(Path::new(&config.dataset.path))
        .context("failed to load prospect dataset")?;

    // 4. Build hub
    let hub = DraftHub::from_dataset(data);

    // 5. Summary and board
    let summary = hub.summary(Local::now().date_naive());
    println!("Prospects: {}", summary.total_prospects);
    println!("Scouts: {}", summary.scout_count);
    match summary.average_age {
        Some(age) => println!("Average age: {age:.1}"),
        None => println!("Average age: n/a"),
    }
    println!();

    let board = hub.big_board(config.board.limit());
    print_board(&board);

    // 6. Optional CSV export
    if let Some(csv_path) = &config.export.board_csv {
        export::export_board_csv(&board, Path::new(csv_path))
            .with_context(|| format!("failed to export board to {csv_path}"))?;
        println!();
        println!("Board written to {csv_path}");
    }

    info!("Draft hub finished");
    Ok(())
}

fn print_board(board: &[BoardEntry<'_>]) {
    println!("{:>4}  {:<28} {:<24} {:>9}  Scouts", "#", "Name", "Team", "Consensus");
    for entry in board {
        let marks: Vec<String> = entry
            .marks
            .iter()
            .map(|m| match m.indicator {
                Some(ind) => format!("{} {} ({})", m.scout, m.rank, ind.label()),
                None => format!("{} {}", m.scout, m.rank),
            })
            .collect();
        println!(
            "{:>4}  {:<28} {:<24} {:>9}  {}",
            entry.position,
            entry.player.name(),
            entry.player.bio.current_team,
            entry.consensus.to_string(),
            marks.join(", ")
        );
    }
}

/// Initialize tracing to log to a file, keeping stdout for the board.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join(&logging.directory);
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("draft-hub.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
