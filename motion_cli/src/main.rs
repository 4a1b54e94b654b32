use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use motion_core::sink::{ScoreBook, ScoreSink};
use motion_schema::{Difficulty, GameType, ScoreRecord};

mod bot;
mod simulate;

use simulate::{ConfigSource, SimulateOptions};

#[derive(Debug, Parser)]
#[command(name = "motion")]
#[command(about = "Headless runner for the motion mini-games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plays one session with a scripted bot and prints the score record.
    Simulate {
        #[arg(short, long)]
        game: GameType,
        #[arg(short, long, default_value = "normal")]
        difficulty: Difficulty,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Chance the bot goes for each event.
        #[arg(long, default_value_t = 1.0)]
        skill: f64,
        #[arg(long)]
        duration_ms: Option<f64>,
        #[arg(long, default_value_t = 30.0)]
        fps: f64,
        /// JSON difficulty entry replacing the built-in one.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Leaves the session early at this session time.
        #[arg(long)]
        exit_at_ms: Option<f64>,
        /// Writes the fed frames as a landmark trace.
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Feeds a recorded landmark trace through its game's driver.
    Replay {
        trace: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        duration_ms: Option<f64>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Prints the built-in difficulty table for a game.
    Difficulty {
        #[arg(short, long)]
        game: GameType,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let scores = ScoreBook::new();

    match cli.command {
        Command::Simulate {
            game,
            difficulty,
            seed,
            skill,
            duration_ms,
            fps,
            config,
            exit_at_ms,
            record,
        } => {
            let opts = SimulateOptions {
                game,
                difficulty,
                seed,
                skill,
                fps,
                config: ConfigSource {
                    path: config,
                    duration_ms,
                },
                exit_at_ms,
                record_trace: record.is_some(),
            };
            let outcome = simulate::simulate(&opts)
                .with_context(|| format!("simulation failed: {game} ({difficulty})"))?;

            if let (Some(path), Some(trace)) = (record, &outcome.trace) {
                motion_trace::save_trace_json_to_path(trace, &path)?;
                info!("recorded {} frames to {}", trace.frames.len(), path.display());
            }
            report(&scores, &outcome.record)?;
        }
        Command::Replay {
            trace,
            seed,
            duration_ms,
            config,
        } => {
            let loaded = motion_trace::load_trace_json_from_path(&trace)?;
            let source = ConfigSource {
                path: config,
                duration_ms,
            };
            let record = simulate::replay(&loaded, seed, &source)
                .with_context(|| format!("replay failed: {}", trace.display()))?;
            report(&scores, &record)?;
        }
        Command::Difficulty { game } => {
            let table = simulate::difficulty_table(game)?;
            let json = serde_json::to_string_pretty(&table).context("failed to serialize difficulty table")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn report(scores: &dyn ScoreSink, record: &ScoreRecord) -> anyhow::Result<()> {
    scores.add_score(record);
    let json = serde_json::to_string_pretty(record).context("failed to serialize score record")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
