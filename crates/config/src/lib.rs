//! Configuration models and loaders for the ATLAS orbital engine.
//!
//! The only required input format is a small structured record of orbital
//! elements, keyed the way JPL Horizons labels them (`EC`, `QR`, `TP`,
//! `OM`, `W`, `IN`). Records load from YAML or TOML depending on file
//! extension and are validated before any numerical code sees them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Orbital elements for a hyperbolic heliocentric orbit, as configured.
///
/// Angles in degrees, distances in AU, epochs as Julian Dates.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ElementsConfig {
    /// Object designation, e.g. "3I/ATLAS".
    pub designation: String,
    /// Eccentricity; must exceed 1 for the hyperbolic path.
    #[serde(rename = "EC")]
    pub eccentricity: f64,
    /// Periapsis distance in AU; must be positive.
    #[serde(rename = "QR")]
    pub periapsis_distance_au: f64,
    /// Time of periapsis passage as a Julian Date.
    #[serde(rename = "TP")]
    pub periapsis_time_jd: f64,
    /// Longitude of the ascending node (degrees).
    #[serde(rename = "OM")]
    pub ascending_node_deg: f64,
    /// Argument of periapsis (degrees).
    #[serde(rename = "W")]
    pub arg_periapsis_deg: f64,
    /// Inclination (degrees).
    #[serde(rename = "IN")]
    pub inclination_deg: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(
        "invalid orbital elements for `{designation}`: eccentricity {eccentricity} must be > 1 \
         and periapsis distance {periapsis_distance_au} AU must be > 0"
    )]
    InvalidElements {
        designation: String,
        eccentricity: f64,
        periapsis_distance_au: f64,
    },
    #[error("non-finite value in orbital elements for `{designation}`")]
    NonFiniteElements { designation: String },
}

impl ElementsConfig {
    /// Reject element sets the hyperbolic generator cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.eccentricity.is_finite()
            && self.periapsis_distance_au.is_finite()
            && self.periapsis_time_jd.is_finite()
            && self.ascending_node_deg.is_finite()
            && self.arg_periapsis_deg.is_finite()
            && self.inclination_deg.is_finite();
        if !finite {
            return Err(ConfigError::NonFiniteElements {
                designation: self.designation.clone(),
            });
        }
        if self.eccentricity <= 1.0 || self.periapsis_distance_au <= 0.0 {
            return Err(ConfigError::InvalidElements {
                designation: self.designation.clone(),
                eccentricity: self.eccentricity,
                periapsis_distance_au: self.periapsis_distance_au,
            });
        }
        Ok(())
    }
}

/// Load and validate an orbital-element record from a YAML or TOML file.
///
/// Files ending in `.toml` are parsed as TOML; everything else as YAML.
pub fn load_elements<P: AsRef<Path>>(path: P) -> Result<ElementsConfig, ConfigError> {
    let path = path.as_ref();
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;

    let elements: ElementsConfig = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&contents)?
    } else {
        serde_yaml::from_str(&contents)?
    };
    elements.validate()?;
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn atlas_yaml() -> &'static str {
        "designation: 3I/ATLAS\nEC: 1.2\nQR: 1.5\nTP: 2460614.5\nOM: 280.0\nW: 45.0\nIN: 113.0\n"
    }

    #[test]
    fn yaml_elements_round_trip() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(atlas_yaml().as_bytes()).unwrap();
        let elements = load_elements(file.path()).expect("load yaml");
        assert_eq!(elements.designation, "3I/ATLAS");
        assert!((elements.eccentricity - 1.2).abs() < 1e-12);
        assert!((elements.periapsis_time_jd - 2_460_614.5).abs() < 1e-9);
    }

    #[test]
    fn toml_elements_round_trip() {
        let toml = "designation = \"3I/ATLAS\"\nEC = 1.2\nQR = 1.5\nTP = 2460614.5\nOM = 280.0\nW = 45.0\nIN = 113.0\n";
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        let elements = load_elements(file.path()).expect("load toml");
        assert!((elements.inclination_deg - 113.0).abs() < 1e-12);
    }

    #[test]
    fn bound_orbit_is_rejected() {
        let bad = ElementsConfig {
            designation: "bound".into(),
            eccentricity: 0.9,
            periapsis_distance_au: 1.5,
            periapsis_time_jd: 2_460_614.5,
            ascending_node_deg: 0.0,
            arg_periapsis_deg: 0.0,
            inclination_deg: 0.0,
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::InvalidElements { .. })
        ));
    }

    #[test]
    fn negative_periapsis_is_rejected() {
        let bad = ElementsConfig {
            designation: "bad-q".into(),
            eccentricity: 1.2,
            periapsis_distance_au: -0.1,
            periapsis_time_jd: 2_460_614.5,
            ascending_node_deg: 0.0,
            arg_periapsis_deg: 0.0,
            inclination_deg: 0.0,
        };
        assert!(bad.validate().is_err());
    }
}
