//! Canned encounter scenarios built from the real solar-system snapshot.
//!
//! Each scenario starts from the catalog ephemeris at a chosen epoch and
//! re-aims the comet's velocity so the interesting encounter actually
//! happens inside a short simulation horizon.

use thiserror::Error;

use atlas_core::{Body, Vec3};
use atlas_ephem::EphemerisError;
use atlas_kepler::{ConvergencePolicy, GeneratorError, HyperbolicElements};

use crate::PhysicsBody;

/// Encounter presets for the trajectory analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    EarthImpact,
    JupiterSlingshot,
    MarsFlyby,
    SolarCloseup,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::EarthImpact,
        Scenario::JupiterSlingshot,
        Scenario::MarsFlyby,
        Scenario::SolarCloseup,
    ];

    /// The body the comet is steered toward.
    pub fn target(&self) -> Body {
        match self {
            Scenario::EarthImpact => Body::Earth,
            Scenario::JupiterSlingshot => Body::Jupiter,
            Scenario::MarsFlyby => Body::Mars,
            Scenario::SolarCloseup => Body::Sun,
        }
    }

    /// Perpendicular aim offset in AU; zero means dead center.
    fn aim_offset_au(&self) -> f64 {
        match self {
            Scenario::EarthImpact => 0.0,
            Scenario::JupiterSlingshot => 0.005,
            Scenario::MarsFlyby => 0.002,
            Scenario::SolarCloseup => 0.02,
        }
    }

    /// Comet speed after re-aiming, in AU/day.
    fn approach_speed(&self) -> f64 {
        match self {
            Scenario::SolarCloseup => 0.03,
            _ => 0.05,
        }
    }
}

/// Errors assembling a scenario's initial conditions.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Comet(#[from] GeneratorError),
    #[error("scenario requires body `{0}` in the initial set")]
    MissingBody(Body),
}

/// The full solar system plus the comet at a given epoch.
///
/// The Sun is anchored at the origin; planets come from the catalog
/// ephemeris and the comet from its hyperbolic elements.
pub fn solar_system_bodies(
    jd: f64,
    elements: &HyperbolicElements,
) -> Result<Vec<PhysicsBody>, ScenarioError> {
    let mut bodies = vec![PhysicsBody::anchored(Body::Sun, Vec3::ZERO)];
    for planet in Body::PLANETS {
        let state = atlas_ephem::heliocentric_state(planet, jd)?;
        bodies.push(PhysicsBody::new(planet, state.position, state.velocity));
    }
    let comet = atlas_kepler::state_at(elements, jd, ConvergencePolicy::BestEffort)?;
    bodies.push(PhysicsBody::new(Body::Atlas, comet.position, comet.velocity));
    Ok(bodies)
}

/// Re-aim the comet at the scenario's target.
///
/// Keeps the comet where the ephemeris put it but replaces its velocity
/// with one pointing at the target (plus the scenario's aim offset).
pub fn apply(scenario: Scenario, bodies: &mut [PhysicsBody]) -> Result<(), ScenarioError> {
    let target = scenario.target();
    let target_position = bodies
        .iter()
        .find(|b| b.body == target)
        .map(|b| b.position)
        .ok_or(ScenarioError::MissingBody(target))?;

    let comet = bodies
        .iter_mut()
        .find(|b| b.body == Body::Atlas)
        .ok_or(ScenarioError::MissingBody(Body::Atlas))?;

    let line = target_position - comet.position;
    // Offset perpendicular to the approach line, in the orbital plane.
    let perpendicular = line.cross(&Vec3::new(0.0, 0.0, 1.0)).normalized();
    let aim_point = target_position + perpendicular * scenario.aim_offset_au();
    comet.velocity = (aim_point - comet.position).with_magnitude(scenario.approach_speed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas_elements() -> HyperbolicElements {
        HyperbolicElements {
            eccentricity: 1.2,
            periapsis_distance_au: 1.5,
            periapsis_time_jd: 2_460_614.5,
            ascending_node_deg: 280.0,
            arg_periapsis_deg: 45.0,
            inclination_deg: 113.0,
        }
    }

    #[test]
    fn snapshot_contains_every_body_once() {
        let bodies = solar_system_bodies(2_460_600.5, &atlas_elements()).expect("snapshot");
        assert_eq!(bodies.len(), 11);
        assert!(bodies[0].fixed);
        assert_eq!(bodies[0].body, Body::Sun);
        let comet = bodies.iter().find(|b| b.body == Body::Atlas).unwrap();
        assert!(comet.position.magnitude() > 1.0);
    }

    #[test]
    fn earth_impact_points_the_comet_at_earth() {
        let mut bodies = solar_system_bodies(2_460_600.5, &atlas_elements()).unwrap();
        apply(Scenario::EarthImpact, &mut bodies).unwrap();
        let earth = bodies.iter().find(|b| b.body == Body::Earth).unwrap().position;
        let comet = bodies.iter().find(|b| b.body == Body::Atlas).unwrap();
        let toward = (earth - comet.position).normalized();
        let heading = comet.velocity.normalized();
        assert!(toward.dot(&heading) > 0.999);
        assert!((comet.velocity.magnitude() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn slingshot_aim_misses_the_center() {
        let mut bodies = solar_system_bodies(2_460_600.5, &atlas_elements()).unwrap();
        apply(Scenario::JupiterSlingshot, &mut bodies).unwrap();
        let jupiter = bodies.iter().find(|b| b.body == Body::Jupiter).unwrap().position;
        let comet = bodies.iter().find(|b| b.body == Body::Atlas).unwrap();
        let toward = (jupiter - comet.position).normalized();
        let heading = comet.velocity.normalized();
        let alignment = toward.dot(&heading);
        assert!(alignment > 0.99 && alignment < 1.0);
    }

    #[test]
    fn missing_comet_is_reported() {
        let mut bodies = vec![PhysicsBody::anchored(Body::Sun, Vec3::ZERO)];
        assert!(matches!(
            apply(Scenario::SolarCloseup, &mut bodies),
            Err(ScenarioError::MissingBody(Body::Atlas))
        ));
    }
}
