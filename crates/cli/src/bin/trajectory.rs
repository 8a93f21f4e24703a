use anyhow::Context;
use clap::{Parser, ValueEnum};

use atlas_orbital::config::load_elements;
use atlas_orbital::core::time::iso_to_jd;
use atlas_orbital::core::Body;
use atlas_orbital::export;
use atlas_orbital::kepler::HyperbolicElements;
use atlas_orbital::nbody::scenario::{self, Scenario};
use atlas_orbital::nbody::{trajectory, NBodySimulator, SimulatorParams};

/// Run an N-body encounter scenario and report what happened.
#[derive(Parser, Debug)]
#[command(author, version, about = "N-body trajectory and impact analyzer")]
struct Cli {
    /// Orbital-elements file (YAML or TOML) for the hyperbolic comet
    #[arg(long, default_value = "data/elements.yaml")]
    elements: String,

    /// Encounter preset
    #[arg(long, value_enum, default_value_t = Preset::EarthImpact)]
    scenario: Preset,

    /// Epoch at which the solar system is assembled, ISO-8601
    #[arg(long, default_value = "2025-10-01T00:00:00Z")]
    epoch: String,

    /// How many days to simulate
    #[arg(long, default_value_t = 120.0)]
    horizon_days: f64,

    /// Optional JSON report output (use '-' for stdout)
    #[arg(long)]
    report: Option<String>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Preset {
    EarthImpact,
    JupiterSlingshot,
    MarsFlyby,
    SolarCloseup,
}

impl From<Preset> for Scenario {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::EarthImpact => Scenario::EarthImpact,
            Preset::JupiterSlingshot => Scenario::JupiterSlingshot,
            Preset::MarsFlyby => Scenario::MarsFlyby,
            Preset::SolarCloseup => Scenario::SolarCloseup,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_elements(&cli.elements)
        .with_context(|| format!("loading elements from {}", cli.elements))?;
    let elements = HyperbolicElements::from(&config);
    let epoch_jd = iso_to_jd(&cli.epoch).context("parsing --epoch")?;
    let scenario_kind: Scenario = cli.scenario.into();

    let mut bodies = scenario::solar_system_bodies(epoch_jd, &elements)?;
    scenario::apply(scenario_kind, &mut bodies)?;

    let mut sim = NBodySimulator::new(SimulatorParams::default());
    sim.initialize(bodies);
    let report = trajectory::analyze(&mut sim, Body::Atlas, cli.horizon_days);

    println!(
        "scenario {:?}: simulated {:.1} days, {} steps ({} failed)",
        scenario_kind, report.days_simulated, report.health.total_steps, report.health.failed_steps
    );
    if let Some(closest) = &report.closest_approach {
        println!(
            "closest approach: {} at {:.6} AU on day {:.1}",
            closest.body.name(),
            closest.distance_au,
            closest.time_days
        );
    }
    match &report.impact {
        Some(impact) => println!(
            "IMPACT: {} on day {:.1} at {:.4} AU/day",
            impact.body.name(),
            impact.time_days,
            impact.relative_velocity_au_day
        ),
        None => println!("no impact within the horizon"),
    }
    for slingshot in &report.slingshots {
        println!(
            "slingshot: {} at {:.6} AU, delta-v {:.4} AU/day",
            slingshot.body.name(),
            slingshot.distance_au,
            slingshot.delta_v_au_day
        );
    }
    println!(
        "health: energy {:.4}, stability {:.4}, collision risk {:.4}, timestep {:.4}",
        report.health.energy_conservation_ratio,
        report.health.numerical_stability_score,
        report.health.collision_risk_score,
        report.health.timestep_quality_score
    );
    for warning in report.health.warnings.iter().take(5) {
        eprintln!("[warn] {warning}");
    }

    if let Some(path) = &cli.report {
        let writer = export::writer_for_path(path)?;
        export::write_report_json(writer, &report)?;
        eprintln!("report written to {path}");
    }
    Ok(())
}
