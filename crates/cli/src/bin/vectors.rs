use anyhow::{Context, anyhow};
use clap::{Parser, ValueEnum};

use atlas_orbital::config::load_elements;
use atlas_orbital::core::time::iso_to_jd;
use atlas_orbital::core::Body;
use atlas_orbital::export;
use atlas_orbital::kepler::{ConvergencePolicy, HyperbolicElements};
use atlas_orbital::sequence::{self, Target};

/// Generate an evenly-cadenced heliocentric state-vector sequence.
#[derive(Parser, Debug)]
#[command(author, version, about = "State-vector sequence generator (CSV/JSON)")]
struct Cli {
    /// Orbital-elements file (YAML or TOML) for the hyperbolic comet
    #[arg(long, default_value = "data/elements.yaml")]
    elements: String,

    /// Track a catalog planet instead of the comet (case-insensitive name)
    #[arg(long)]
    body: Option<String>,

    /// Window start, ISO-8601 / RFC 3339
    #[arg(long)]
    start: String,

    /// Window end, ISO-8601 / RFC 3339
    #[arg(long)]
    end: String,

    /// Sample cadence in hours (snapped to 1, 2, 6, 12, or 24)
    #[arg(long, default_value_t = 6.0)]
    cadence_hours: f64,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Output file (use '-' for stdout)
    #[arg(long, default_value = "-")]
    out: String,

    /// Fail on Newton-Raphson non-convergence instead of best effort
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Format {
    Csv,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let target = match &cli.body {
        Some(name) => {
            let body = Body::from_name(name)
                .ok_or_else(|| anyhow!("unknown body `{name}`"))?;
            Target::Catalog(body)
        }
        None => {
            let config = load_elements(&cli.elements)
                .with_context(|| format!("loading elements from {}", cli.elements))?;
            Target::Hyperbolic(HyperbolicElements::from(&config))
        }
    };

    let start_jd = iso_to_jd(&cli.start).context("parsing --start")?;
    let end_jd = iso_to_jd(&cli.end).context("parsing --end")?;
    let policy = if cli.strict {
        ConvergencePolicy::Strict
    } else {
        ConvergencePolicy::BestEffort
    };

    let samples = sequence::generate_sequence(&target, start_jd, end_jd, cli.cadence_hours, policy)?;
    let quality = sequence::quality(&samples);
    if !sequence::is_usable(&samples) {
        eprintln!(
            "[warn] sequence quality {quality:.3} is below the {:.2} threshold",
            sequence::QUALITY_THRESHOLD
        );
    }

    let writer = export::writer_for_path(&cli.out)?;
    match cli.format {
        Format::Csv => export::write_csv(writer, &samples)?,
        Format::Json => export::write_json(writer, &samples)?,
    }

    eprintln!("{} samples written to {}", samples.len(), cli.out);
    Ok(())
}
