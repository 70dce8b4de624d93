use bouncebox_core::{SimConfig, SimulationLoop};
use clap::Parser;
use std::time::Duration;

mod headless;
mod window_app;

#[derive(Parser)]
#[command(name = "bouncebox")]
#[command(about = "Bouncing particle simulator with update latency readout", long_about = None)]
struct Cli {
    /// Use the reduced population (1000 particles, speed 1.0, no zero velocities)
    #[arg(long)]
    reduced: bool,

    /// Number of particles
    #[arg(long)]
    particles: Option<usize>,

    /// Velocity scale applied to the integer velocity steps
    #[arg(long)]
    speed: Option<f32>,

    /// Integration timestep
    #[arg(long)]
    dt: Option<f32>,

    /// Input poll wait per frame, in milliseconds
    #[arg(long)]
    frame_wait_ms: Option<u64>,

    /// Seed for the initial particle layout
    #[arg(long)]
    seed: Option<u64>,

    /// Never draw a zero velocity component at spawn
    #[arg(long)]
    exclude_zero_velocity: bool,

    /// Run without a window and print the latency summary
    #[arg(long)]
    headless: bool,

    /// Iterations to run in headless mode
    #[arg(long, default_value_t = 1000, requires = "headless")]
    frames: u64,
}

impl Cli {
    fn sim_config(&self) -> SimConfig {
        let mut config = if self.reduced {
            SimConfig::reduced()
        } else {
            SimConfig::default()
        };
        if let Some(particles) = self.particles {
            config.particle_count = particles;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }
        if let Some(ms) = self.frame_wait_ms {
            config.frame_wait = Duration::from_millis(ms);
        }
        if self.exclude_zero_velocity {
            config.include_zero_velocity = false;
        }
        config.seed = self.seed;
        config
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.sim_config();
    let sim = SimulationLoop::new(&config)?;

    println!("Starting simulation...");

    if cli.headless {
        let summary = headless::run(sim, cli.frames)?;
        println!("Frames: {}", summary.frames);
        if let Some(average) = summary.average_us {
            println!("Average: {} us", average.trunc() as u64);
        }
    } else {
        println!("Press ESC to quit.");
        window_app::run(sim)?;
    }

    println!("Simulation finished.");
    Ok(())
}
