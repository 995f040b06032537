mod sim;

use anyhow::Context;
use clap::Parser;
use euchre_core::model::seat::Team;
use tracing_subscriber::EnvFilter;

/// Headless Euchre harness: four heuristic seats play complete games and
/// report the results.
#[derive(Debug, Parser)]
#[command(name = "euchre", author, version, about = "Seeded Euchre simulation harness")]
struct Cli {
    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// RNG seed for the first game; each following game increments it.
    #[arg(long)]
    seed: Option<u64>,

    /// Emit one JSON object per game instead of text.
    #[arg(long)]
    json: bool,

    /// Log table events and bot decisions.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let base_seed = cli.seed.unwrap_or_else(rand::random);
    let mut summaries = Vec::with_capacity(cli.games as usize);
    for game in 0..cli.games {
        let seed = base_seed.wrapping_add(u64::from(game));
        let summary = sim::run_game(seed).with_context(|| format!("running game {game}"))?;
        if cli.json {
            println!("{}", serde_json::to_string(&summary)?);
        } else {
            println!("{summary}");
        }
        summaries.push(summary);
    }

    if !cli.json && summaries.len() > 1 {
        let ns_wins = summaries
            .iter()
            .filter(|s| s.winner == Team::NorthSouth)
            .count();
        println!(
            "{} games: {} {ns_wins}, {} {}",
            summaries.len(),
            Team::NorthSouth,
            Team::EastWest,
            summaries.len() - ns_wins,
        );
    }
    Ok(())
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing tracing subscriber: {err}"))
}
