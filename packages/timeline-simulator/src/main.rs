//! Timeline Simulator CLI - plays timeline games headlessly.
//!
//! Every game runs entirely in memory against a shuffled catalog category,
//! with all teams following the same guessing strategy.

mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use metrics::{build_game_metrics, RunConfig, Summary};
use output::OutputWriter;
use simulator::{GameResult, Simulator};
use timeline::{Catalog, Category, DeckEmptyPolicy, Engine, GameConfig, ShuffledPool};
use tracing::{info, warn};
use types::Strategy;

#[derive(Parser)]
#[command(name = "timeline-simulator")]
#[command(about = "Headless timeline game simulator")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Number of teams (overrides TIMELINE_TEAMS)
    #[arg(long)]
    teams: Option<usize>,

    /// Cards requested per fetch
    #[arg(long)]
    deck_size: Option<usize>,

    /// Score that ends a game
    #[arg(long)]
    target_score: Option<u32>,

    /// Base seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// Catalog JSON file (defaults to the bundled sample)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Category id (defaults to the first category)
    #[arg(long)]
    category: Option<String>,

    /// Guessing strategy for every team
    #[arg(long, value_enum, default_value = "perfect")]
    strategy: Strategy,

    /// What to do when the deck runs dry: top-up or fail
    #[arg(long)]
    on_deck_empty: Option<DeckEmptyPolicy>,

    /// Stop a game after this many turns
    #[arg(long, default_value_t = simulator::DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON log lines instead of the plain formatter
    #[arg(long)]
    json_logs: bool,

    /// Write one JSON line per game to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        timeline::telemetry::init_tracing()?;
    } else {
        // Silent by default, only warnings and errors
        let filter = if args.verbose { "debug" } else { "warn" };
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = game_config(&args, GameConfig::read_env()?)?;
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::sample()?,
    };
    let category = match &args.category {
        Some(id) => catalog.category(id)?,
        None => catalog.first_category()?,
    };
    info!(
        games = args.games,
        teams = config.team_count(),
        category = %category.id,
        strategy = ?args.strategy,
        "starting simulation"
    );

    let mut output_writer = args.output.as_ref().map(OutputWriter::create).transpose()?;
    let base_seed = args.seed.or(config.seed);

    let start = Instant::now();
    let mut summary = Summary::default();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = match base_seed {
            Some(s) => s.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };

        match run_game(category, &config, &args, game_seed).await {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                if let Some(writer) = output_writer.as_mut() {
                    let run = RunConfig {
                        strategy: args.strategy,
                        category: category.id.clone(),
                        teams: config.team_count(),
                        target_score: config.target_score,
                        total_games: args.games,
                    };
                    let metrics = build_game_metrics(game_num, game_seed, run, &result, duration_ms);
                    if let Err(e) = writer.write_game(&metrics) {
                        warn!("Failed to write metrics for game {}: {}", game_num, e);
                    }
                }
                info!(
                    game = game_num,
                    scores = ?result.final_scores,
                    winner = ?result.winner,
                    "game completed"
                );
                summary.record(&result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();
    if let Some(writer) = output_writer {
        let path = writer.finish()?;
        println!("Results written to: {}", path.display());
    }
    print_summary(&summary, &config, errors, elapsed, args.games);

    Ok(())
}

/// CLI flags win over `TIMELINE_*`; validation runs once on the merged result.
fn game_config(args: &Args, env: GameConfig) -> Result<GameConfig, timeline::DomainError> {
    let mut config = env;
    if let Some(n) = args.teams {
        config = config.with_teams((1..=n).map(|i| format!("Team {i}")));
    }
    if let Some(size) = args.deck_size {
        config = config.with_deck_size(size);
    }
    if let Some(target) = args.target_score {
        config = config.with_target_score(target);
    }
    if let Some(policy) = args.on_deck_empty {
        config = config.with_deck_empty_policy(policy);
    }
    config.validate()?;
    Ok(config)
}

async fn run_game(
    category: &Category,
    config: &GameConfig,
    args: &Args,
    game_seed: u64,
) -> Result<GameResult, timeline::DomainError> {
    let provider = ShuffledPool::from_category(category, Some(game_seed));
    let mut engine = Engine::new(provider, config.clone())?;
    Simulator::new(args.strategy, game_seed)
        .with_max_turns(args.max_turns)
        .simulate_game(&mut engine)
        .await
}

fn print_summary(
    summary: &Summary,
    config: &GameConfig,
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", summary.games, total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if summary.games == 0 {
        return;
    }
    println!("Average time per game: {:?}", elapsed / summary.games);
    println!("Placement accuracy: {:.1}%", summary.accuracy() * 100.0);
    println!(
        "Ended early: deck exhausted={}, turn limit={}, no winner={}",
        summary.deck_exhausted, summary.turn_limit, summary.draws_no_winner
    );

    println!("\n=== Results by Team ===");
    for (team, stats) in summary.teams.iter().enumerate() {
        let name = config
            .team_names
            .get(team)
            .map(String::as_str)
            .unwrap_or("?");
        let win_rate = f64::from(stats.wins) / f64::from(summary.games) * 100.0;
        println!(
            "{:<12} avg={:.1}, min={}, max={}, wins={} ({:.1}%)",
            name,
            summary.average_score(team),
            stats.min_score.unwrap_or(0),
            stats.max_score.unwrap_or(0),
            stats.wins,
            win_rate
        );
    }
}
