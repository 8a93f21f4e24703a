//! CSV and JSON writers for trajectory data.
//!
//! Output goes to a file path or, by the `-` convention, to stdout. CSV rows
//! carry one state vector each; JSON mirrors the same records with nested
//! position/velocity objects, and trajectory reports serialize whole.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use atlas_core::StateVector;
use atlas_nbody::trajectory::TrajectoryReport;

/// Errors raised while writing export files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open an output sink; the path `-` means stdout.
pub fn writer_for_path(path: &str) -> Result<Box<dyn Write>, ExportError> {
    if path == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(File::create(Path::new(path))?))
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    jd: f64,
    date: &'a str,
    x_au: f64,
    y_au: f64,
    z_au: f64,
    vx_au_day: f64,
    vy_au_day: f64,
    vz_au_day: f64,
}

/// Write a sequence as CSV with one row per sample.
pub fn write_csv<W: Write>(writer: W, samples: &[StateVector]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for sample in samples {
        csv_writer.serialize(CsvRow {
            jd: sample.julian_date,
            date: &sample.iso_date,
            x_au: sample.position.x,
            y_au: sample.position.y,
            z_au: sample.position.z,
            vx_au_day: sample.velocity.x,
            vy_au_day: sample.velocity.y,
            vz_au_day: sample.velocity.z,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    jd: f64,
    date: &'a str,
    position: JsonVector,
    velocity: JsonVector,
}

#[derive(Serialize)]
struct JsonVector {
    x: f64,
    y: f64,
    z: f64,
}

/// Write a sequence as a pretty-printed JSON array.
pub fn write_json<W: Write>(mut writer: W, samples: &[StateVector]) -> Result<(), ExportError> {
    let records: Vec<JsonRecord> = samples
        .iter()
        .map(|s| JsonRecord {
            jd: s.julian_date,
            date: &s.iso_date,
            position: JsonVector {
                x: s.position.x,
                y: s.position.y,
                z: s.position.z,
            },
            velocity: JsonVector {
                x: s.velocity.x,
                y: s.velocity.y,
                z: s.velocity.z,
            },
        })
        .collect();
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a trajectory report as pretty-printed JSON.
pub fn write_report_json<W: Write>(
    mut writer: W,
    report: &TrajectoryReport,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}
