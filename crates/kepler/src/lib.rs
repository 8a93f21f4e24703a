//! Hyperbolic two-body propagation for 3I/ATLAS.
//!
//! The comet's heliocentric state at any epoch comes from the hyperbolic
//! Kepler equation `M = e sinh H - H`, solved by Newton-Raphson, followed by
//! the same perifocal-to-equatorial rotation the planetary ephemeris uses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use atlas_config::ElementsConfig;
use atlas_core::constants::GM_SUN;
use atlas_core::time::jd_to_iso;
use atlas_core::{StateVector, Vec3};
use atlas_ephem::frames::ecliptic_to_equatorial;

/// Newton-Raphson convergence tolerance on the hyperbolic anomaly residual.
const NEWTON_TOLERANCE: f64 = 1e-12;
/// Iteration cap for the Newton solve.
const NEWTON_MAX_ITERATIONS: usize = 20;
/// Below this the derivative `e cosh H - 1` is treated as degenerate and the
/// iterate is nudged off the flat spot instead of dividing.
const DERIVATIVE_FLOOR: f64 = 1e-15;

/// Hyperbolic orbital elements referenced to the ecliptic frame.
///
/// Angles in degrees, distances in AU, epochs as Julian Dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HyperbolicElements {
    pub eccentricity: f64,
    pub periapsis_distance_au: f64,
    pub periapsis_time_jd: f64,
    pub ascending_node_deg: f64,
    pub arg_periapsis_deg: f64,
    pub inclination_deg: f64,
}

/// What to do when the Newton solve fails to reach tolerance.
///
/// `BestEffort` accepts the final iterate, which is how the generator keeps
/// sequences contiguous far from periapsis. `Strict` turns the miss into an
/// error for callers that need the guarantee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConvergencePolicy {
    #[default]
    BestEffort,
    Strict,
}

/// Errors from the hyperbolic state generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("orbital elements are not hyperbolic: e = {eccentricity}, q = {periapsis_distance_au} AU")]
    InvalidElements {
        eccentricity: f64,
        periapsis_distance_au: f64,
    },
    #[error("non-finite {quantity} while propagating to JD {jd}")]
    NumericalDivergence { quantity: &'static str, jd: f64 },
    #[error("Kepler solve did not converge at JD {jd} after {iterations} iterations")]
    ConvergenceFailure { jd: f64, iterations: usize },
}

impl HyperbolicElements {
    /// Reject element sets outside the hyperbolic regime.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let finite = self.eccentricity.is_finite()
            && self.periapsis_distance_au.is_finite()
            && self.periapsis_time_jd.is_finite()
            && self.ascending_node_deg.is_finite()
            && self.arg_periapsis_deg.is_finite()
            && self.inclination_deg.is_finite();
        if !finite || self.eccentricity <= 1.0 || self.periapsis_distance_au <= 0.0 {
            return Err(GeneratorError::InvalidElements {
                eccentricity: self.eccentricity,
                periapsis_distance_au: self.periapsis_distance_au,
            });
        }
        Ok(())
    }

    /// Semi-major axis magnitude `|a| = q / (e - 1)` in AU.
    pub fn semi_major_axis_au(&self) -> f64 {
        self.periapsis_distance_au / (self.eccentricity - 1.0)
    }

    /// Mean motion in radians per day.
    pub fn mean_motion(&self) -> f64 {
        (GM_SUN / self.semi_major_axis_au().powi(3)).sqrt()
    }
}

impl From<&ElementsConfig> for HyperbolicElements {
    fn from(cfg: &ElementsConfig) -> Self {
        Self {
            eccentricity: cfg.eccentricity,
            periapsis_distance_au: cfg.periapsis_distance_au,
            periapsis_time_jd: cfg.periapsis_time_jd,
            ascending_node_deg: cfg.ascending_node_deg,
            arg_periapsis_deg: cfg.arg_periapsis_deg,
            inclination_deg: cfg.inclination_deg,
        }
    }
}

/// Outcome of the Newton solve for the hyperbolic anomaly.
#[derive(Debug, Clone, Copy)]
struct NewtonSolution {
    anomaly: f64,
    converged: bool,
    iterations: usize,
}

/// Solve `e sinh H - H = M` for the hyperbolic anomaly `H`.
fn solve_hyperbolic_kepler(mean_anomaly: f64, eccentricity: f64) -> NewtonSolution {
    // Large mean anomalies want the asymptotic guess; near periapsis the
    // linearized one converges faster.
    let mut h = if mean_anomaly.abs() > 0.5 {
        (mean_anomaly / eccentricity).asinh()
    } else {
        mean_anomaly / (eccentricity - 1.0)
    };

    for iteration in 0..NEWTON_MAX_ITERATIONS {
        let f = eccentricity * h.sinh() - h - mean_anomaly;
        if f.abs() < NEWTON_TOLERANCE {
            return NewtonSolution {
                anomaly: h,
                converged: true,
                iterations: iteration,
            };
        }
        let fp = eccentricity * h.cosh() - 1.0;
        if fp.abs() < DERIVATIVE_FLOOR {
            h += 0.01;
            continue;
        }
        h -= f / fp;
    }

    NewtonSolution {
        anomaly: h,
        converged: false,
        iterations: NEWTON_MAX_ITERATIONS,
    }
}

/// Heliocentric equatorial state of the comet at the given epoch.
///
/// Position in AU, velocity in AU/day, clamped into the engine's validity
/// bounds. Under [`ConvergencePolicy::BestEffort`] a non-converged Newton
/// solve still yields a state; `Strict` promotes it to an error.
pub fn state_at(
    elements: &HyperbolicElements,
    jd: f64,
    policy: ConvergencePolicy,
) -> Result<StateVector, GeneratorError> {
    elements.validate()?;
    if !jd.is_finite() {
        return Err(GeneratorError::NumericalDivergence {
            quantity: "epoch",
            jd,
        });
    }

    let e = elements.eccentricity;
    let a = elements.semi_major_axis_au();
    let n = elements.mean_motion();
    if !a.is_finite() || !n.is_finite() {
        return Err(GeneratorError::NumericalDivergence {
            quantity: "mean motion",
            jd,
        });
    }

    let mean_anomaly = n * (jd - elements.periapsis_time_jd);
    let solution = solve_hyperbolic_kepler(mean_anomaly, e);
    if !solution.converged && policy == ConvergencePolicy::Strict {
        return Err(GeneratorError::ConvergenceFailure {
            jd,
            iterations: solution.iterations,
        });
    }
    let h = solution.anomaly;
    if !h.is_finite() {
        return Err(GeneratorError::NumericalDivergence {
            quantity: "hyperbolic anomaly",
            jd,
        });
    }

    // True anomaly via the half-angle identity, radius from the conic.
    let nu = 2.0
        * f64::atan2(
            (e + 1.0).sqrt() * (h / 2.0).sinh(),
            (e - 1.0).sqrt() * (h / 2.0).cosh(),
        );
    let r = a * (e * h.cosh() - 1.0);
    if !r.is_finite() || r <= 0.0 {
        return Err(GeneratorError::NumericalDivergence {
            quantity: "radius",
            jd,
        });
    }

    // Perifocal state: specific angular momentum fixes the transverse speed.
    let angular_momentum = (GM_SUN * a * (e * e - 1.0)).sqrt();
    let (sin_nu, cos_nu) = nu.sin_cos();
    let position_pf = Vec3::new(r * cos_nu, r * sin_nu, 0.0);
    let vel_scale = GM_SUN / angular_momentum;
    let velocity_pf = Vec3::new(-vel_scale * sin_nu, vel_scale * (e + cos_nu), 0.0);

    let position_ecl = rotate_perifocal(elements, position_pf);
    let velocity_ecl = rotate_perifocal(elements, velocity_pf);
    let position = ecliptic_to_equatorial(position_ecl);
    let velocity = ecliptic_to_equatorial(velocity_ecl);
    if !position.is_finite() || !velocity.is_finite() {
        return Err(GeneratorError::NumericalDivergence {
            quantity: "state vector",
            jd,
        });
    }

    let iso_date = jd_to_iso(jd).ok_or(GeneratorError::NumericalDivergence {
        quantity: "timestamp",
        jd,
    })?;
    Ok(StateVector::new(jd, iso_date, position, velocity).clamped())
}

fn rotate_perifocal(elements: &HyperbolicElements, v: Vec3) -> Vec3 {
    perifocal_to_ecliptic(
        v,
        elements.arg_periapsis_deg.to_radians(),
        elements.inclination_deg.to_radians(),
        elements.ascending_node_deg.to_radians(),
    )
}

/// Classical 3-1-3 rotation out of the perifocal frame.
fn perifocal_to_ecliptic(v: Vec3, omega: f64, inclination: f64, node: f64) -> Vec3 {
    let (sin_w, cos_w) = omega.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_o, cos_o) = node.sin_cos();

    let x1 = v.x * cos_w - v.y * sin_w;
    let y1 = v.x * sin_w + v.y * cos_w;

    let y2 = y1 * cos_i;
    let z2 = y1 * sin_i;

    Vec3::new(x1 * cos_o - y2 * sin_o, x1 * sin_o + y2 * cos_o, z2)
}
