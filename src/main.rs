//! Headless village runner
//!
//! Runs the village for a fixed number of ticks without a display, printing a
//! status line now and then and optionally writing a JSON snapshot at the end.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use village_sim::core::config::SimulationConfig;
use village_sim::core::error::Result;
use village_sim::core::types::{Color, Vec2};
use village_sim::simulation::{run_frame, FloatingTextLayer, SimulationEvent};
use village_sim::world::{World, WorldSnapshot};

const PALETTE: [Color; 5] = [
    Color(100, 255, 100),
    Color(100, 100, 255),
    Color(255, 100, 100),
    Color(255, 200, 100),
    Color(200, 100, 255),
];

/// Headless village simulation
#[derive(Parser, Debug)]
#[command(name = "village-sim")]
#[command(about = "Run the village simulation headless and report what the villagers learned")]
struct Args {
    /// TOML config file; omitted keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to simulate (3600 = one minute of game time)
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// Ticks per frame, 1-5
    #[arg(long, default_value_t = 5)]
    speed: u32,

    /// Print a status line every N ticks (0 = never)
    #[arg(long, default_value_t = 3600)]
    status_every: u64,

    /// Villager names
    #[arg(long, value_delimiter = ',', default_value = "Alice,Bob,Charlie")]
    characters: Vec<String>,

    /// Write the final world snapshot here
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("village_sim=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    config.validate()?;

    tracing::info!(seed = config.world.seed, ticks = args.ticks, "village starting");

    let mut world = World::new(config);
    spawn_villagers(&mut world, &args.characters);
    world.set_game_speed(args.speed);

    let mut texts = FloatingTextLayer::new(world.config.world.floating_text_lifetime);
    let mut deaths = 0usize;
    let mut houses_built = 0usize;
    let mut next_status = args.status_every;

    while world.current_tick < args.ticks && !world.game_over {
        let events = run_frame(&mut world);
        for event in &events {
            match event {
                SimulationEvent::CharacterDied { .. } => deaths += 1,
                SimulationEvent::HouseBuilt { .. } => houses_built += 1,
                _ => {}
            }
        }
        texts.update();
        texts.extend(&events);

        if args.status_every > 0 && world.current_tick >= next_status {
            println!("{}", WorldSnapshot::capture(&world).summary());
            tracing::debug!(floating_texts = texts.len(), "status");
            next_status += args.status_every;
        }
    }

    let snapshot = WorldSnapshot::capture(&world);
    display_final(&snapshot, deaths, houses_built);

    if let Some(path) = &args.json {
        snapshot.write_json(path)?;
        tracing::info!(path = %path.display(), "snapshot written");
    }

    Ok(())
}

/// Place villagers evenly across the middle of the field
fn spawn_villagers(world: &mut World, names: &[String]) {
    let width = world.config.world.field_width;
    let y = world.field_center().y.round();
    let step = width / (names.len() as f64 + 1.0);
    for (i, name) in names.iter().enumerate() {
        let x = step * (i as f64 + 1.0);
        world.spawn_character(name.trim(), Vec2::new(x, y), PALETTE[i % PALETTE.len()]);
    }
}

fn display_final(snapshot: &WorldSnapshot, deaths: usize, houses_built: usize) {
    println!();
    println!("=== VILLAGE AFTER {} TICKS ===", snapshot.tick);
    if snapshot.game_over {
        println!("Game over: nobody is left.");
    }
    println!("{}", snapshot.summary());
    println!("Houses built: {}, villagers lost: {}", houses_built, deaths);
    println!();
    for c in &snapshot.characters {
        println!(
            "{:<10} Lv{} hp {:>5.1}/{:<5.1} eps {:.3} total reward {:>8.1}",
            c.name, c.level, c.health, c.max_health, c.exploration, c.total_reward
        );
        let values: Vec<String> = c.values.iter().map(|(a, v)| format!("{}={:.2}", a, v)).collect();
        let items: Vec<String> = c
            .inventory
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(r, n)| format!("{} {}", n, r))
            .collect();
        println!("           values: {}", values.join(" "));
        println!("           holds:  {}", if items.is_empty() { "nothing".to_string() } else { items.join(", ") });
    }
}
