use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use shoal_client::{RunOptions, ShoalClient};
use shoal_shared::SimulationSettings;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Headless flocking simulation with predators",
    long_about = None
)]
struct Args {
    /// Scenario file (JSON). The built-in scene is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Override the scenario's random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the area width
    #[arg(long)]
    width: Option<f32>,

    /// Override the area height
    #[arg(long)]
    height: Option<f32>,

    /// Write a frame every n ticks (0 disables frames)
    #[arg(short, long, default_value_t = 1)]
    frame_every: u64,

    /// Log a status line every n ticks (0 disables)
    #[arg(long, default_value_t = 60)]
    status_every: u64,

    /// Frame output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the effective scenario as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn load_settings(args: &Args) -> Result<SimulationSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read scenario {}", path.display()))?;
            SimulationSettings::from_json(&json)
                .with_context(|| format!("Invalid scenario {}", path.display()))?
        }
        None => SimulationSettings::default(),
    };

    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }

    if !(settings.width > 0.0 && settings.height > 0.0) {
        bail!(
            "Area must have a positive size, got {}x{}",
            settings.width,
            settings.height
        );
    }

    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = load_settings(&args).context("Failed to load scenario")?;

    if args.dump_config {
        println!("{}", settings.to_json_pretty()?);
        return Ok(());
    }

    log::info!("Shoal client starting...");
    log::info!("Area: {}x{}, seed {}", settings.width, settings.height, settings.seed);

    let output: Box<dyn Write> = match &args.output {
        Some(path) => {
            log::info!("Writing frames to {}", path.display());
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let options = RunOptions {
        ticks: args.ticks,
        frame_every: args.frame_every,
        status_every: args.status_every,
    };

    ShoalClient::new(&settings, output, options)
        .run()
        .context("Simulation error")?;

    Ok(())
}
