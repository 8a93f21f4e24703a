//! Close-approach, impact, and slingshot analysis over a simulated horizon.

use serde::Serialize;

use atlas_core::constants::GM_SUN;
use atlas_core::{Body, Vec3};

use crate::{HealthStats, NBodySimulator};

/// Separations inside this (but outside the body radius) count as slingshots.
const SLINGSHOT_RANGE_AU: f64 = 0.01;

/// Ceiling on the escape-velocity delta-v heuristic, in AU/day.
const MAX_SLINGSHOT_DELTA_V: f64 = 5.0;

/// Closest the tracked object came to any other body.
#[derive(Debug, Clone, Serialize)]
pub struct CloseApproach {
    pub body: Body,
    pub distance_au: f64,
    pub time_days: f64,
}

/// The tracked object came within a body's physical radius.
#[derive(Debug, Clone, Serialize)]
pub struct ImpactEvent {
    pub body: Body,
    pub time_days: f64,
    pub relative_velocity_au_day: f64,
    /// Kinetic energy of the impactor in simulator units (M_sun AU^2/day^2).
    pub kinetic_energy: f64,
}

/// A powered-free flyby close enough to matter dynamically.
#[derive(Debug, Clone, Serialize)]
pub struct SlingshotEvent {
    pub body: Body,
    pub time_days: f64,
    pub distance_au: f64,
    /// Escape velocity at closest recorded range, capped.
    pub delta_v_au_day: f64,
}

/// Start/end comparison of the tracked object's two-body energy.
///
/// For a real hyperbolic orbit the Sun-relative specific energy should be
/// positive and roughly stable; large swings point at integration trouble
/// or at a genuine planetary encounter.
#[derive(Debug, Clone, Serialize)]
pub struct EnergyCheck {
    pub initial_specific_energy: f64,
    pub final_specific_energy: f64,
    pub relative_change: f64,
}

/// Everything the analyzer learned over one horizon.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryReport {
    pub tracked: Body,
    pub days_simulated: f64,
    pub closest_approach: Option<CloseApproach>,
    pub impact: Option<ImpactEvent>,
    pub slingshots: Vec<SlingshotEvent>,
    pub energy_check: EnergyCheck,
    pub health: HealthStats,
}

/// Run the simulator over `horizon_days`, sampling once per simulated day.
///
/// Stops early on impact. The simulator is left at whatever time the
/// analysis ended, so callers can inspect its final state.
pub fn analyze(sim: &mut NBodySimulator, tracked: Body, horizon_days: f64) -> TrajectoryReport {
    let initial_specific_energy = specific_energy(sim, tracked);

    let mut closest_approach: Option<CloseApproach> = None;
    let mut impact: Option<ImpactEvent> = None;
    let mut slingshots: Vec<SlingshotEvent> = Vec::new();
    let mut next_sample_day = 0.0;

    while sim.time_days() < horizon_days && impact.is_none() {
        if !sim.step() {
            // A rolled-back step cannot make progress; trying again with
            // identical state would spin forever.
            break;
        }
        if sim.time_days() < next_sample_day {
            continue;
        }
        next_sample_day = sim.time_days().floor() + 1.0;

        let Some(object) = sim.body(tracked) else {
            break;
        };
        let object_position = object.position;
        let object_velocity = object.velocity;
        let object_mass = object.mass;

        for other in sim.bodies() {
            if other.body == tracked {
                continue;
            }
            let distance = (other.position - object_position).magnitude();

            if closest_approach
                .as_ref()
                .is_none_or(|c| distance < c.distance_au)
            {
                closest_approach = Some(CloseApproach {
                    body: other.body,
                    distance_au: distance,
                    time_days: sim.time_days(),
                });
            }

            if distance <= other.radius_au {
                let relative_velocity = (object_velocity - other.velocity).magnitude();
                impact = Some(ImpactEvent {
                    body: other.body,
                    time_days: sim.time_days(),
                    relative_velocity_au_day: relative_velocity,
                    kinetic_energy: 0.5 * object_mass * relative_velocity * relative_velocity,
                });
                break;
            }

            if distance < SLINGSHOT_RANGE_AU {
                record_slingshot(&mut slingshots, other.body, other.mass, distance, sim.time_days());
            }
        }
    }

    let final_specific_energy = specific_energy(sim, tracked);
    let scale = initial_specific_energy.abs().max(1e-30);
    let energy_check = EnergyCheck {
        initial_specific_energy,
        final_specific_energy,
        relative_change: ((final_specific_energy - initial_specific_energy) / scale).abs(),
    };

    TrajectoryReport {
        tracked,
        days_simulated: sim.time_days(),
        closest_approach,
        impact,
        slingshots,
        energy_check,
        health: sim.health(),
    }
}

/// Keep one slingshot record per body, at its closest range.
fn record_slingshot(
    slingshots: &mut Vec<SlingshotEvent>,
    body: Body,
    mass: f64,
    distance: f64,
    time_days: f64,
) {
    let delta_v = (2.0 * GM_SUN * mass / distance)
        .sqrt()
        .min(MAX_SLINGSHOT_DELTA_V);
    match slingshots.iter_mut().find(|s| s.body == body) {
        Some(existing) if distance < existing.distance_au => {
            existing.distance_au = distance;
            existing.time_days = time_days;
            existing.delta_v_au_day = delta_v;
        }
        Some(_) => {}
        None => slingshots.push(SlingshotEvent {
            body,
            time_days,
            distance_au: distance,
            delta_v_au_day: delta_v,
        }),
    }
}

/// Sun-relative specific orbital energy of a body, in AU^2/day^2.
fn specific_energy(sim: &NBodySimulator, body: Body) -> f64 {
    let Some(b) = sim.body(body) else {
        return 0.0;
    };
    let sun_position = sim.body(Body::Sun).map_or(Vec3::ZERO, |s| s.position);
    let r = (b.position - sun_position).magnitude().max(1e-9);
    0.5 * b.velocity.magnitude_squared() - GM_SUN / r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PhysicsBody, SimulatorParams};

    fn simulator_with(bodies: Vec<PhysicsBody>) -> NBodySimulator {
        let mut sim = NBodySimulator::new(SimulatorParams::default());
        sim.initialize(bodies);
        sim
    }

    #[test]
    fn head_on_comet_impacts_the_sun() {
        // Aimed straight at the Sun from 0.5 AU. The target radius is
        // inflated so the daily sampling cadence cannot step across it.
        let mut sun = PhysicsBody::anchored(Body::Sun, Vec3::ZERO);
        sun.radius_au = 0.2;
        let mut sim = simulator_with(vec![
            sun,
            PhysicsBody::new(
                Body::Atlas,
                Vec3::new(0.5, 0.0, 0.0),
                Vec3::new(-0.05, 0.0, 0.0),
            ),
        ]);
        let report = analyze(&mut sim, Body::Atlas, 60.0);
        let impact = report.impact.expect("impact");
        assert_eq!(impact.body, Body::Sun);
        assert!(impact.relative_velocity_au_day > 0.0);
        assert!(report.days_simulated < 60.0);
    }

    #[test]
    fn distant_orbit_reports_no_events() {
        let v = (GM_SUN / 1.0).sqrt();
        let mut sim = simulator_with(vec![
            PhysicsBody::anchored(Body::Sun, Vec3::ZERO),
            PhysicsBody::new(Body::Earth, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, v, 0.0)),
        ]);
        let report = analyze(&mut sim, Body::Earth, 30.0);
        assert!(report.impact.is_none());
        assert!(report.slingshots.is_empty());
        let closest = report.closest_approach.expect("sampled at least once");
        assert_eq!(closest.body, Body::Sun);
        assert!((closest.distance_au - 1.0).abs() < 0.05);
        // Circular orbit: energy should barely move.
        assert!(report.energy_check.relative_change < 1e-2);
    }

    #[test]
    fn slingshot_delta_v_is_capped() {
        let mut slingshots = Vec::new();
        record_slingshot(&mut slingshots, Body::Jupiter, 1.0e6, 1e-9, 1.0);
        assert_eq!(slingshots.len(), 1);
        assert!((slingshots[0].delta_v_au_day - MAX_SLINGSHOT_DELTA_V).abs() < 1e-12);
    }

    #[test]
    fn slingshot_keeps_closest_pass_per_body() {
        let mut slingshots = Vec::new();
        record_slingshot(&mut slingshots, Body::Jupiter, 9.547e-4, 0.008, 1.0);
        record_slingshot(&mut slingshots, Body::Jupiter, 9.547e-4, 0.003, 2.0);
        record_slingshot(&mut slingshots, Body::Jupiter, 9.547e-4, 0.006, 3.0);
        assert_eq!(slingshots.len(), 1);
        assert!((slingshots[0].distance_au - 0.003).abs() < 1e-12);
        assert!((slingshots[0].time_days - 2.0).abs() < 1e-12);
    }
}
