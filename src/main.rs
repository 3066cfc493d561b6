//! Ball pit headless runner
//!
//! Runs the simulation against a recording surface at a fixed 60 Hz host
//! clock and prints the final world as JSON. The browser build is driven
//! through `ball_pit::platform::web::BallPit` instead.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use ball_pit::DeviceClass;
    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(name = "ball-pit")]
    #[command(about = "Run the ball pit headless and print the final world", long_about = None)]
    #[command(version)]
    pub struct Args {
        /// Number of host frames to simulate
        #[arg(default_value_t = 600)]
        pub frames: u32,

        /// JSON file overriding simulation tuning
        pub config: Option<PathBuf>,

        /// Device class for spawn sizing (mobile, desktop)
        #[arg(long, value_parser = parse_device)]
        pub device: Option<DeviceClass>,

        /// Spawn seed
        #[arg(long, default_value_t = 42)]
        pub seed: u64,
    }

    fn parse_device(s: &str) -> Result<DeviceClass, String> {
        DeviceClass::from_str(s).ok_or_else(|| format!("unknown device class '{s}'"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    let args = cli::Args::parse();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(args: cli::Args) -> ball_pit::Result<()> {
    use ball_pit::renderer::DrawList;
    use ball_pit::{Bounds, SimConfig, Simulation};

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            let json = std::fs::read_to_string(path)?;
            SimConfig::from_json(&json)?
        }
        None => SimConfig::default(),
    };
    if let Some(device) = args.device {
        config.device = device;
    }

    log::info!("Ball pit (native) running {} frames", args.frames);
    let count = config.device.body_count();
    let textures = vec!["logo.png".to_string()];
    let mut sim = Simulation::new(Bounds::new(1280.0, 720.0), &textures, count, config, args.seed, 0.0)?;
    let mut surface = DrawList::new();

    let frame_ms = 1000.0 / 60.0 + 0.01;
    let mut ticked = 0;
    for i in 1..=args.frames {
        if sim.frame(i as f64 * frame_ms, &mut surface) {
            ticked += 1;
        }
        if i % 120 == 0 {
            let (awake, asleep) = sim.world().activity();
            log::info!("frame {}: {} awake, {} asleep", i, awake, asleep);
        }
    }

    let (awake, asleep) = sim.world().activity();
    log::info!(
        "{} ticks, {} draw commands in last frame, {} awake, {} asleep",
        ticked,
        surface.len(),
        awake,
        asleep
    );
    println!("{}", serde_json::to_string_pretty(sim.world())?);
    sim.destroy();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is the BallPit constructor in the library
}
