use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::IVec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use sandfall::{App, AppConfig, FixedTimestep, scenario, snapshot};
use sandfall_core::Level;
use sandfall_core::world::WorldSave;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level width in pixels (multiple of 64)
    #[arg(long)]
    width: Option<u32>,

    /// Level height in pixels (multiple of 64)
    #[arg(long)]
    height: Option<u32>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed for the simulation random source
    #[arg(long)]
    seed: Option<u64>,

    /// Scenario used to fill a new level: empty, sandpile, demolition, circuit, chemistry
    #[arg(long)]
    scenario: Option<String>,

    /// Load a saved level instead of generating one
    #[arg(long)]
    load: Option<PathBuf>,

    /// Save the level here after the run
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write a PNG of the final grid
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Pace ticks by the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Detonate a grenade at X,Y before the run
    #[arg(long, value_parser = parse_position)]
    grenade: Option<IVec2>,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,

    /// List available scenarios
    #[arg(long)]
    list_scenarios: bool,
}

fn parse_position(text: &str) -> Result<IVec2, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {text:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok(IVec2::new(x, y))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_scenarios {
        scenario::list();
        return Ok(());
    }

    let mut config = AppConfig::load()?;
    if let Some(width) = args.width {
        config.run.width = width;
    }
    if let Some(height) = args.height {
        config.run.height = height;
    }
    if let Some(ticks) = args.ticks {
        config.run.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    if let Some(name) = &args.scenario {
        config.run.scenario = name.clone();
    }

    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    log::info!("Starting Sandfall");

    let mut rng = Xoshiro256StarStar::seed_from_u64(config.run.seed);
    let mut level = match &args.load {
        Some(path) => {
            let save = WorldSave::load_from_path(path)?;
            Level::from_save(save, config.sim.clone())
                .with_context(|| format!("Rejected level file {:?}", path))?
        }
        None => {
            let definition = scenario::find(&config.run.scenario).ok_or_else(|| {
                anyhow::anyhow!("Unknown scenario {:?} (try --list-scenarios)", config.run.scenario)
            })?;
            let mut level = Level::new(config.run.width, config.run.height, config.sim.clone())?;
            (definition.generator)(&mut level, &mut rng);
            log::info!("Scenario: {} - {}", definition.name, definition.description);
            level
        }
    };

    if let Some(pos) = args.grenade {
        if level.pixels().is_valid_pixel(pos) {
            level.detonate_grenade(pos, &mut rng);
        } else {
            log::warn!("Grenade position {} is outside the level", pos);
        }
    }

    let mut app = App::new(level, rng, config.run.report_interval);
    if args.realtime {
        let timestep = FixedTimestep::new(config.sim.time_step, config.run.max_steps_per_frame);
        app.run_realtime(config.run.ticks, timestep);
    } else {
        app.run_ticks(config.run.ticks);
    }

    let level = app.into_level();
    if let Some(path) = &args.snapshot {
        snapshot::save_png(level.pixels(), path)?;
    }
    if let Some(path) = &args.save {
        level.to_save().save_to_path(path)?;
    }

    Ok(())
}
