//! Society Sim - headless runner
//!
//! Generates a seeded town, runs it for a number of simulated hours and
//! prints a summary. Optionally writes the final state as JSON.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use society_sim::core::config::SimulationConfig;
use society_sim::core::error::{Result, SimError};
use society_sim::entity::{EmploymentCategory, StateTag};
use society_sim::simulation::Simulation;
use society_sim::world::generation::{generate, GenerationConfig};

/// Society Sim - run a town of autonomous actors without a UI
#[derive(Parser, Debug)]
#[command(name = "society-sim")]
#[command(about = "Run the society simulation headless and print a summary")]
struct Args {
    /// Seed for world generation and the simulation RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated hours to run
    #[arg(long, default_value_t = 168.0)]
    hours: f64,

    /// Simulated hours per host step (chunked to the configured maximum)
    #[arg(long)]
    step: Option<f64>,

    /// TOML file overriding simulation constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML file describing the generated world
    #[arg(long)]
    world: Option<PathBuf>,

    /// Write the final world snapshot as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("society_sim=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let mut generation: GenerationConfig = match &args.world {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = args.seed {
        generation.seed = seed;
    }

    let world = generate(&generation, &config)?;
    tracing::info!(
        seed = generation.seed,
        actors = world.population.len(),
        places = world.places.len(),
        "town generated"
    );

    let max_step = config.max_step_hours;
    let step = args.step.unwrap_or(max_step);
    if step <= 0.0 || args.hours < 0.0 {
        return Err(SimError::InvalidConfig(
            "--step must be positive and --hours non-negative".into(),
        ));
    }
    if step > max_step {
        tracing::warn!(step, max_step, "host step exceeds the maximum, chunking");
    }

    let mut sim = Simulation::new(world, config, generation.seed)?;
    let mut remaining = args.hours;
    while remaining > 1e-9 {
        let mut host_step = step.min(remaining);
        remaining -= host_step;
        while host_step > 1e-9 {
            let chunk = host_step.min(max_step);
            sim.tick(chunk);
            host_step -= chunk;
        }
    }

    print_summary(&sim, args.hours);

    if let Some(path) = &args.json {
        fs::write(path, serde_json::to_string_pretty(&sim.snapshot())?)?;
        tracing::info!(path = %path.display(), "snapshot written");
    }

    Ok(())
}

fn print_summary(sim: &Simulation, hours: f64) {
    let stats = sim.stats();
    println!("\n=== SOCIETY SIM ===");
    println!("Ran {:.1} simulated hours in {} steps, now {}", hours, stats.steps, sim.clock());
    println!("Population: {}", sim.world().population.len());
    println!(
        "Births: {}  Deaths: {}  Partnerships: {}  Hires: {}  Firings: {}  Retirements: {}",
        stats.births, stats.deaths, stats.partnerships, stats.hires, stats.firings, stats.retirements
    );

    let Some(latest) = sim.history().latest() else {
        return;
    };
    println!("\nPartnered: {}", latest.partnered);
    println!("\n{:<16} {:>6}", "State", "Actors");
    for tag in StateTag::ALL {
        println!("{:<16} {:>6}", format!("{:?}", tag), latest.count(tag));
    }
    println!("\n{:<16} {:>6}", "Occupation", "Actors");
    for category in EmploymentCategory::ALL {
        println!("{:<16} {:>6}", format!("{:?}", category), latest.employed(category));
    }
    if let Some(long_term) = sim.history().long_term().last() {
        println!(
            "\nMean age {:.1}, mean wealth {:.0}",
            long_term.mean_age, long_term.mean_wealth
        );
    }
}
