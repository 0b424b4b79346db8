use std::path::PathBuf;

use anyhow::{Context, Result};
use ascent_simulation::{
    telemetry_system::telemetry::{format_altitude, format_time},
    FlightMetrics, GuidanceMode, IntegrationMethod, Simulation, SimulationConfig, TracingNotifier,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "ascent")]
#[command(about = "Planar rocket ascent trajectory simulator")]
#[command(version)]
struct Args {
    /// TOML configuration file; defaults to the reference LEO ascent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Time step (s)
    #[arg(long)]
    dt: Option<f64>,

    /// Maximum simulated time (s)
    #[arg(long)]
    t_max: Option<f64>,

    #[arg(long, value_enum)]
    method: Option<Method>,

    #[arg(long, value_enum)]
    guidance: Option<Guidance>,

    /// Iterations between progress lines, 0 for silent
    #[arg(long)]
    log_every: Option<usize>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Method {
    Explicit,
    Implicit,
}

impl From<Method> for IntegrationMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Explicit => IntegrationMethod::Explicit,
            Method::Implicit => IntegrationMethod::Implicit,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Guidance {
    Time,
    Altitude,
}

impl From<Guidance> for GuidanceMode {
    fn from(guidance: Guidance) -> Self {
        match guidance {
            Guidance::Time => GuidanceMode::Time,
            Guidance::Altitude => GuidanceMode::Altitude,
        }
    }
}

fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(dt) = args.dt {
        config.run.dt = dt;
    }
    if let Some(t_max) = args.t_max {
        config.run.t_max = t_max;
    }
    if let Some(method) = args.method {
        config.run.method = method.into();
    }
    if let Some(guidance) = args.guidance {
        config.guidance = guidance.into();
    }
    if let Some(log_every) = args.log_every {
        config.run.log_interval = log_every;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let dt = config.run.dt;

    let mut simulation = Simulation::new(config)?;
    let summary = simulation.run(&mut TracingNotifier);
    let metrics = FlightMetrics::from_history(simulation.history(), simulation.planet(), dt);

    println!("--- Simulation Summary ---");
    println!("Termination: {}", summary.termination_reason);
    println!("Iterations: {}", summary.iterations);
    println!("Elapsed Time: {}", format_time(summary.elapsed_time));
    println!("Final Altitude: {}", format_altitude(summary.final_altitude));
    println!("Final Angle: {:.4} rad", summary.final_angle);

    println!("\n--- Flight Metrics ---");
    println!("Max Altitude: {}", format_altitude(metrics.max_altitude));
    println!("Max Radial Velocity: {:.2} m/s", metrics.max_radial_velocity);
    println!(
        "Max Tangential Velocity: {:.2} m/s",
        metrics.max_tangential_velocity
    );
    println!("Max Velocity: {:.2} m/s", metrics.max_velocity);
    println!("Flight Time: {}", format_time(metrics.flight_time));
    println!(
        "Angular Displacement: {:.2}°",
        metrics.angular_displacement.to_degrees()
    );
    println!(
        "Surface Distance: {:.2} km",
        metrics.surface_distance / 1000.0
    );
    println!("Final Mass: {:.2} kg", simulation.state().mass);

    Ok(())
}
