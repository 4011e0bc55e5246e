//! Night simulator CLI: plays whole games in memory with a random Narrator
//! and writes one JSON record per game.

mod output;
mod random_narrator;
mod simulator;

use std::time::{Duration, Instant};

use clap::Parser;
use narrator::{Alignment, RoleCatalog};
use output::OutputWriter;
use simulator::{GameRecord, Simulator};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "night-simulator")]
#[command(about = "In-memory game simulator driven by a random Narrator")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// Players per game when the setup is random
    #[arg(short, long, default_value = "8")]
    players: usize,

    /// Fixed setup in seating order, e.g. "imp,empath,recluse,chef"
    #[arg(long, value_delimiter = ',')]
    roles: Option<Vec<String>>,

    /// Stop a game that has not ended after this many nights
    #[arg(long, default_value = "20")]
    max_rounds: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Compress output files
    #[arg(long)]
    compress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = RoleCatalog::trouble_brewing();
    let players = args.roles.as_ref().map_or(args.players, Vec::len);
    let simulator = Simulator::new(&catalog, players, args.max_rounds);

    let mut output_writer = OutputWriter::new(&args.output_dir, args.compress)?;
    if args.show_output {
        info!(games = args.games, players, "Starting night simulator");
        info!("Output directory: {}", args.output_dir);
    }

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let start = Instant::now();
    let mut records = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let seed = base_seed.wrapping_add(u64::from(game_num));
        match simulator.simulate_game(game_num, seed, args.roles.as_deref()) {
            Ok(record) => {
                if let Err(e) = output_writer.write_game(&record) {
                    warn!("Failed to write game {}: {}", game_num, e);
                }
                records.push(record);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let path = output_writer.finish()?;

    if args.show_output {
        info!("Results written to: {}", path.display());
        print_summary(&records, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(records: &[GameRecord], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", records.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if records.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / records.len() as u32
    );

    let count = |winner: Option<Alignment>| records.iter().filter(|r| r.winner == winner).count();
    let good = count(Some(Alignment::Good));
    let evil = count(Some(Alignment::Evil));
    let unfinished = count(None);
    let pct = |n: usize| n as f64 / records.len() as f64 * 100.0;
    let rounds: u32 = records.iter().map(|r| r.rounds).sum();
    let kills: u32 = records.iter().map(|r| r.kills).sum();
    let executions: u32 = records.iter().map(|r| r.executions).sum();

    println!("\n=== Results ===");
    println!("Good wins: {} ({:.1}%)", good, pct(good));
    println!("Evil wins: {} ({:.1}%)", evil, pct(evil));
    if unfinished > 0 {
        println!("Hit round cap: {} ({:.1}%)", unfinished, pct(unfinished));
    }
    println!(
        "Avg rounds={:.1}, kills={:.1}, executions={:.1}",
        rounds as f64 / records.len() as f64,
        kills as f64 / records.len() as f64,
        executions as f64 / records.len() as f64
    );
}
