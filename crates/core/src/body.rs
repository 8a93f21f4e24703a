//! Closed catalog of solar-system bodies tracked by the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for every body the engine knows about.
///
/// A closed enum instead of free-form strings: unsupported identifiers are
/// unrepresentable, and match arms get exhaustiveness checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    /// 3I/ATLAS, the hyperbolic interstellar object.
    Atlas,
}

impl Body {
    pub const ALL: [Body; 11] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Atlas,
    ];

    /// The planetary bodies served by the catalog ephemeris.
    pub const PLANETS: [Body; 9] = [
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Atlas => "3I/ATLAS",
        }
    }

    /// Case-insensitive lookup by catalog name.
    pub fn from_name(name: &str) -> Option<Body> {
        let lowered = name.to_ascii_lowercase();
        Body::ALL
            .into_iter()
            .find(|b| b.name().to_ascii_lowercase() == lowered || format!("{b:?}").to_ascii_lowercase() == lowered)
    }

    /// Mass in solar masses.
    pub fn mass_solar(&self) -> f64 {
        match self {
            Body::Sun => 1.0,
            Body::Mercury => 1.652e-7,
            Body::Venus => 2.447e-6,
            Body::Earth => 3.003e-6,
            Body::Mars => 3.213e-7,
            Body::Jupiter => 9.547e-4,
            Body::Saturn => 2.858e-4,
            Body::Uranus => 4.366e-5,
            Body::Neptune => 5.151e-5,
            Body::Pluto => 6.55e-9,
            // ~2 km nucleus at 2000 kg/m^3.
            Body::Atlas => 4.2e-18,
        }
    }

    /// Physical radius in AU, used for collision detection.
    pub fn radius_au(&self) -> f64 {
        match self {
            Body::Sun => 4.65e-3,
            Body::Mercury => 1.6e-5,
            Body::Venus => 4.0e-5,
            Body::Earth => 4.2e-5,
            Body::Mars => 2.2e-5,
            Body::Jupiter => 4.7e-4,
            Body::Saturn => 4.0e-4,
            Body::Uranus => 1.7e-4,
            Body::Neptune => 1.6e-4,
            Body::Pluto => 8.0e-6,
            Body::Atlas => 6.7e-9,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
