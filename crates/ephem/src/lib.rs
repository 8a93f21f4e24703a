//! Analytic planetary ephemeris.
//!
//! Heliocentric states for the catalog planets come from the standard JPL
//! mean-element tables propagated with linear centennial rates, an elliptical
//! Kepler solve, and a perifocal-to-equatorial rotation. Good to a few
//! arcminutes over 1800-2050, which is all the trajectory engine asks of it.

pub mod elements;
pub mod frames;

use thiserror::Error;

use atlas_core::constants::{DAYS_PER_CENTURY, GM_SUN, J2000_JD};
use atlas_core::time::jd_to_iso;
use atlas_core::{Body, StateVector, Vec3};

use elements::mean_elements;

/// Errors surfaced while computing planetary positions.
#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("no analytic ephemeris for body `{0}`")]
    Unsupported(Body),
    #[error("julian date {0} has no calendar representation")]
    UnrepresentableEpoch(f64),
}

/// True when `heliocentric_state` can answer for this body.
pub fn is_supported(body: Body) -> bool {
    mean_elements(body).is_some()
}

/// Heliocentric equatorial state of a catalog planet at the given epoch.
///
/// Position in AU, velocity in AU/day, both clamped into the engine's
/// validity bounds. The Sun and 3I/ATLAS are not catalog planets and are
/// rejected with [`EphemerisError::Unsupported`].
pub fn heliocentric_state(body: Body, jd: f64) -> Result<StateVector, EphemerisError> {
    let table = mean_elements(body).ok_or(EphemerisError::Unsupported(body))?;
    let centuries = (jd - J2000_JD) / DAYS_PER_CENTURY;
    let el = table.at(centuries);

    let a = el.semi_major_axis_au;
    let e = el.eccentricity;
    let mean_anomaly =
        normalize_deg(el.mean_longitude_deg - el.longitude_perihelion_deg).to_radians();
    let ecc_anomaly = solve_kepler(mean_anomaly, e);

    let (sin_e, cos_e) = ecc_anomaly.sin_cos();
    let one_minus_e2 = (1.0 - e * e).max(0.0);
    let r = a * (1.0 - e * cos_e);

    // Perifocal frame: x toward periapsis, z along the orbit normal.
    let position_pf = Vec3::new(a * (cos_e - e), a * one_minus_e2.sqrt() * sin_e, 0.0);
    let speed_factor = (GM_SUN * a).sqrt() / r;
    let velocity_pf = Vec3::new(
        -speed_factor * sin_e,
        speed_factor * one_minus_e2.sqrt() * cos_e,
        0.0,
    );

    let arg_periapsis = el.longitude_perihelion_deg - el.ascending_node_deg;
    let position_ecl = perifocal_to_ecliptic(
        position_pf,
        arg_periapsis.to_radians(),
        el.inclination_deg.to_radians(),
        el.ascending_node_deg.to_radians(),
    );
    let velocity_ecl = perifocal_to_ecliptic(
        velocity_pf,
        arg_periapsis.to_radians(),
        el.inclination_deg.to_radians(),
        el.ascending_node_deg.to_radians(),
    );

    let position = frames::ecliptic_to_equatorial(position_ecl);
    let velocity = frames::ecliptic_to_equatorial(velocity_ecl);

    let iso_date = jd_to_iso(jd).ok_or(EphemerisError::UnrepresentableEpoch(jd))?;
    Ok(StateVector::new(jd, iso_date, position, velocity).clamped())
}

/// Solve Kepler's equation `M = E - e sin E` by Newton-Raphson.
///
/// Converges in a handful of iterations for planetary eccentricities; the
/// iteration cap only matters for pathological inputs.
fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ecc_anomaly = if eccentricity < 0.8 {
        mean_anomaly
    } else {
        std::f64::consts::PI
    };
    for _ in 0..50 {
        let f = ecc_anomaly - eccentricity * ecc_anomaly.sin() - mean_anomaly;
        let fp = 1.0 - eccentricity * ecc_anomaly.cos();
        let delta = f / fp;
        ecc_anomaly -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ecc_anomaly
}

/// Rotate a perifocal vector into the ecliptic frame through the classical
/// 3-1-3 sequence (argument of periapsis, inclination, ascending node).
pub(crate) fn perifocal_to_ecliptic(v: Vec3, omega: f64, inclination: f64, node: f64) -> Vec3 {
    let (sin_w, cos_w) = omega.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_o, cos_o) = node.sin_cos();

    let x1 = v.x * cos_w - v.y * sin_w;
    let y1 = v.x * sin_w + v.y * cos_w;
    let z1 = v.z;

    let x2 = x1;
    let y2 = y1 * cos_i - z1 * sin_i;
    let z2 = y1 * sin_i + z1 * cos_i;

    Vec3::new(
        x2 * cos_o - y2 * sin_o,
        x2 * sin_o + y2 * cos_o,
        z2,
    )
}

fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_orbit_scale_and_speed() {
        let state = heliocentric_state(Body::Earth, J2000_JD).expect("earth at J2000");
        let r = state.position.magnitude();
        let v = state.velocity.magnitude();
        assert!((0.98..=1.02).contains(&r), "r = {r} AU");
        // Mean orbital speed is ~0.0172 AU/day.
        assert!((0.016..=0.019).contains(&v), "v = {v} AU/day");
    }

    #[test]
    fn jupiter_sits_near_five_au() {
        let state = heliocentric_state(Body::Jupiter, 2_460_600.5).expect("jupiter");
        let r = state.position.magnitude();
        assert!((4.9..=5.5).contains(&r), "r = {r} AU");
    }

    #[test]
    fn sun_and_comet_are_unsupported() {
        let err = heliocentric_state(Body::Sun, J2000_JD).unwrap_err();
        assert!(matches!(err, EphemerisError::Unsupported(Body::Sun)));
        assert!(err.to_string().contains("Sun"));
        assert!(!is_supported(Body::Atlas));
        assert!(is_supported(Body::Neptune));
    }

    #[test]
    fn kepler_solution_satisfies_equation() {
        let e = 0.2056;
        let m = 1.3;
        let ecc = solve_kepler(m, e);
        assert!((ecc - e * ecc.sin() - m).abs() < 1e-11);
    }

    #[test]
    fn velocity_is_tangential_for_circular_limit() {
        // Venus is nearly circular; radial velocity should be tiny compared
        // to the total speed.
        let state = heliocentric_state(Body::Venus, J2000_JD).expect("venus");
        let radial = state.velocity.dot(&state.position.normalized());
        assert!(radial.abs() < 0.2 * state.velocity.magnitude());
    }
}
