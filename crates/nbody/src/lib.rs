//! Velocity-Verlet N-body simulation with softened gravity.
//!
//! The simulator owns its bodies, advances them with an adaptive time step,
//! and keeps itself honest through stability clamps, snapshot rollback, and
//! energy bookkeeping. Numerical trouble is reported as data (failed steps
//! and warning strings in [`HealthStats`]), never as a panic or an error.

pub mod scenario;
pub mod trajectory;

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use atlas_core::constants::GM_SUN;
use atlas_core::{Body, Vec3};

/// Gravitational constant per solar mass in AU^3 / day^2.
const G: f64 = GM_SUN;

/// Warnings kept in the ring; older entries are dropped.
const MAX_WARNINGS: usize = 32;

/// Pair separations below this tighten the adaptive time step.
const CLOSE_PAIR_AU: f64 = 0.1;

/// Tuning knobs for the integrator.
#[derive(Debug, Clone, Copy)]
pub struct SimulatorParams {
    /// Nominal step in days before adaptivity.
    pub base_time_step: f64,
    /// Floor of the adaptive step in days.
    pub min_time_step: f64,
    /// Ceiling of the adaptive step in days.
    pub max_time_step: f64,
    /// Plummer softening length in AU.
    pub softening_au: f64,
    /// Past positions retained per body.
    pub max_trail_length: usize,
    /// Relative energy drift beyond which a warning is recorded.
    pub energy_tolerance: f64,
}

impl Default for SimulatorParams {
    fn default() -> Self {
        Self {
            base_time_step: 0.1,
            min_time_step: 0.05,
            max_time_step: 0.2,
            softening_au: 1e-4,
            max_trail_length: 100,
            energy_tolerance: 1e-6,
        }
    }
}

/// One gravitating body inside the simulator.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    pub body: Body,
    /// Mass in solar masses.
    pub mass: f64,
    /// Heliocentric position in AU.
    pub position: Vec3,
    /// Velocity in AU/day.
    pub velocity: Vec3,
    /// Most recent acceleration in AU/day^2.
    pub acceleration: Vec3,
    /// Physical radius in AU, used for collision detection.
    pub radius_au: f64,
    /// Fixed bodies exert gravity but are never integrated.
    pub fixed: bool,
    /// Bounded ring of past positions.
    pub trail: VecDeque<Vec3>,
}

impl PhysicsBody {
    /// A free body with catalog mass and radius.
    pub fn new(body: Body, position: Vec3, velocity: Vec3) -> Self {
        Self {
            body,
            mass: body.mass_solar(),
            position,
            velocity,
            acceleration: Vec3::ZERO,
            radius_au: body.radius_au(),
            fixed: false,
            trail: VecDeque::new(),
        }
    }

    /// An anchored body, typically the Sun at the origin.
    pub fn anchored(body: Body, position: Vec3) -> Self {
        let mut b = Self::new(body, position, Vec3::ZERO);
        b.fixed = true;
        b
    }
}

/// Point-in-time view of the simulation.
#[derive(Debug, Clone, Serialize)]
pub struct PhysicsState {
    pub time_days: f64,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub total_energy: f64,
    pub bodies: Vec<BodySnapshot>,
}

/// Per-body slice of a [`PhysicsState`].
#[derive(Debug, Clone, Serialize)]
pub struct BodySnapshot {
    pub body: Body,
    pub mass: f64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub fixed: bool,
}

/// Diagnostic scores summarizing how the integration has gone so far.
///
/// Scores are unitless in [0, 1] with 1 meaning healthy.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStats {
    pub energy_conservation_ratio: f64,
    pub numerical_stability_score: f64,
    pub collision_risk_score: f64,
    pub timestep_quality_score: f64,
    pub total_steps: u64,
    pub failed_steps: u64,
    pub warnings: Vec<String>,
}

/// Velocity-Verlet integrator over a closed set of bodies.
pub struct NBodySimulator {
    params: SimulatorParams,
    bodies: BTreeMap<Body, PhysicsBody>,
    time_days: f64,
    initial_energy: f64,
    total_steps: u64,
    failed_steps: u64,
    floored_steps: u64,
    min_pair_distance: f64,
    warnings: VecDeque<String>,
}

impl NBodySimulator {
    pub fn new(params: SimulatorParams) -> Self {
        Self {
            params,
            bodies: BTreeMap::new(),
            time_days: 0.0,
            initial_energy: 0.0,
            total_steps: 0,
            failed_steps: 0,
            floored_steps: 0,
            min_pair_distance: f64::INFINITY,
            warnings: VecDeque::new(),
        }
    }

    /// Install the body set and reset all bookkeeping.
    pub fn initialize(&mut self, bodies: Vec<PhysicsBody>) {
        self.bodies = bodies.into_iter().map(|b| (b.body, b)).collect();
        self.time_days = 0.0;
        self.total_steps = 0;
        self.failed_steps = 0;
        self.floored_steps = 0;
        self.min_pair_distance = f64::INFINITY;
        self.warnings.clear();
        self.compute_accelerations();
        self.initial_energy = self.kinetic_energy() + self.potential_energy();
    }

    pub fn time_days(&self) -> f64 {
        self.time_days
    }

    pub fn body(&self, body: Body) -> Option<&PhysicsBody> {
        self.bodies.get(&body)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &PhysicsBody> {
        self.bodies.values()
    }

    /// Advance one adaptive step.
    ///
    /// Returns `false` when the step produced non-finite state and was
    /// rolled back; the failure is counted and recorded as a warning.
    pub fn step(&mut self) -> bool {
        let snapshot: Vec<(Body, Vec3, Vec3, Vec3)> = self
            .bodies
            .values()
            .map(|b| (b.body, b.position, b.velocity, b.acceleration))
            .collect();

        let dt = self.adaptive_time_step();
        if dt <= self.params.min_time_step {
            self.floored_steps += 1;
        }

        // Drift: x += v dt + a dt^2 / 2, with the old acceleration saved
        // for the velocity half-kick.
        let mut clamp_engaged = false;
        let mut old_accels: BTreeMap<Body, Vec3> = BTreeMap::new();
        for b in self.bodies.values_mut() {
            old_accels.insert(b.body, b.acceleration);
            if b.fixed {
                continue;
            }
            b.position += b.velocity * dt + b.acceleration * (0.5 * dt * dt);
            let limited = clamp_components(b.position, 100.0);
            if limited != b.position {
                clamp_engaged = true;
            }
            b.position = limited;
        }

        clamp_engaged |= self.compute_accelerations();

        // Kick: v += (a_old + a_new) dt / 2.
        for b in self.bodies.values_mut() {
            if b.fixed {
                continue;
            }
            let a_old = old_accels.get(&b.body).copied().unwrap_or(Vec3::ZERO);
            b.velocity += (a_old + b.acceleration) * (0.5 * dt);
            if b.velocity.magnitude() > 10.0 {
                b.velocity = b.velocity.with_magnitude(10.0);
                clamp_engaged = true;
            }
        }

        if !self.all_finite() {
            for (body, position, velocity, acceleration) in snapshot {
                if let Some(b) = self.bodies.get_mut(&body) {
                    b.position = position;
                    b.velocity = velocity;
                    b.acceleration = acceleration;
                }
            }
            self.failed_steps += 1;
            self.push_warning(format!(
                "non-finite state at t = {:.3} days, step rolled back",
                self.time_days
            ));
            return false;
        }

        if clamp_engaged {
            self.push_warning(format!(
                "stability clamp engaged at t = {:.3} days",
                self.time_days
            ));
        }

        let trail_len = self.params.max_trail_length;
        for b in self.bodies.values_mut() {
            if b.fixed {
                continue;
            }
            b.trail.push_back(b.position);
            while b.trail.len() > trail_len {
                b.trail.pop_front();
            }
        }

        self.time_days += dt;
        self.total_steps += 1;
        self.track_pair_distances();
        self.check_energy_drift();
        true
    }

    /// Snapshot the current state with energy totals.
    pub fn state(&self) -> PhysicsState {
        let kinetic = self.kinetic_energy();
        let potential = self.potential_energy();
        PhysicsState {
            time_days: self.time_days,
            kinetic_energy: kinetic,
            potential_energy: potential,
            total_energy: kinetic + potential,
            bodies: self
                .bodies
                .values()
                .map(|b| BodySnapshot {
                    body: b.body,
                    mass: b.mass,
                    position: b.position,
                    velocity: b.velocity,
                    fixed: b.fixed,
                })
                .collect(),
        }
    }

    /// Diagnostic scores for the run so far.
    pub fn health(&self) -> HealthStats {
        let current = self.kinetic_energy() + self.potential_energy();
        let scale = self.initial_energy.abs().max(1e-30);
        let drift = ((current - self.initial_energy) / scale).abs();
        let energy_conservation_ratio = (1.0 - drift).clamp(0.0, 1.0);

        let numerical_stability_score = if self.total_steps + self.failed_steps == 0 {
            1.0
        } else {
            self.total_steps as f64 / (self.total_steps + self.failed_steps) as f64
        };

        let collision_risk_score = if self.min_pair_distance.is_finite() {
            (CLOSE_PAIR_AU / self.min_pair_distance).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let timestep_quality_score = if self.total_steps == 0 {
            1.0
        } else {
            1.0 - self.floored_steps as f64 / self.total_steps as f64
        };

        HealthStats {
            energy_conservation_ratio,
            numerical_stability_score,
            collision_risk_score,
            timestep_quality_score: timestep_quality_score.clamp(0.0, 1.0),
            total_steps: self.total_steps,
            failed_steps: self.failed_steps,
            warnings: self.warnings.iter().cloned().collect(),
        }
    }

    /// Rewind the clock and bookkeeping without touching body state.
    pub fn reset(&mut self) {
        self.time_days = 0.0;
        self.total_steps = 0;
        self.failed_steps = 0;
        self.floored_steps = 0;
        self.min_pair_distance = f64::INFINITY;
        self.warnings.clear();
        for b in self.bodies.values_mut() {
            b.trail.clear();
        }
        self.compute_accelerations();
        self.initial_energy = self.kinetic_energy() + self.potential_energy();
    }

    /// Pairwise softened gravity.
    ///
    /// Separations are floored at 1.1x the summed radii so near-contact
    /// pairs cannot blow up the force law, then Plummer-softened. Returns
    /// whether the acceleration clamp engaged anywhere.
    fn compute_accelerations(&mut self) -> bool {
        let sources: Vec<(Body, f64, Vec3, f64)> = self
            .bodies
            .values()
            .map(|b| (b.body, b.mass, b.position, b.radius_au))
            .collect();
        let eps2 = self.params.softening_au * self.params.softening_au;
        let mut clamp_engaged = false;

        for b in self.bodies.values_mut() {
            if b.fixed {
                b.acceleration = Vec3::ZERO;
                continue;
            }
            let mut accel = Vec3::ZERO;
            for &(other, mass, position, radius) in &sources {
                if other == b.body {
                    continue;
                }
                let offset = position - b.position;
                let distance = offset
                    .magnitude()
                    .max((b.radius_au + radius) * 1.1);
                let softened = (distance * distance + eps2).powf(1.5);
                accel += offset.normalized() * (G * mass * distance / softened);
            }
            let limited = clamp_components(accel, 100.0);
            if limited != accel {
                clamp_engaged = true;
            }
            b.acceleration = limited;
        }
        clamp_engaged
    }

    /// Smallest stable step this configuration allows, in days.
    ///
    /// Per-body candidates are `base_time_step / sqrt(|a|)`; a quiet system
    /// therefore runs at the ceiling rather than the nominal step.
    fn adaptive_time_step(&self) -> f64 {
        let mut dt = self.params.max_time_step;
        for b in self.bodies.values() {
            if b.fixed {
                continue;
            }
            let a = b.acceleration.magnitude();
            if a > 1e-12 {
                dt = dt.min(self.params.base_time_step / a.sqrt());
            }
        }
        for (i, a) in self.bodies.values().enumerate() {
            for b in self.bodies.values().skip(i + 1) {
                let d = (a.position - b.position).magnitude();
                if d < CLOSE_PAIR_AU {
                    dt = dt.min(d * 0.01);
                }
            }
        }
        dt.clamp(self.params.min_time_step, self.params.max_time_step)
    }

    /// Kinetic energy of the free bodies.
    fn kinetic_energy(&self) -> f64 {
        self.bodies
            .values()
            .filter(|b| !b.fixed)
            .map(|b| 0.5 * b.mass * b.velocity.magnitude_squared())
            .sum()
    }

    /// Pairwise softened potential energy.
    fn potential_energy(&self) -> f64 {
        let eps2 = self.params.softening_au * self.params.softening_au;
        let bodies: Vec<&PhysicsBody> = self.bodies.values().collect();
        let mut potential = 0.0;
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                let d2 = (a.position - b.position).magnitude_squared();
                potential -= G * a.mass * b.mass / (d2 + eps2).sqrt();
            }
        }
        potential
    }

    fn track_pair_distances(&mut self) {
        let positions: Vec<Vec3> = self.bodies.values().map(|b| b.position).collect();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                let d = (*a - *b).magnitude();
                if d < self.min_pair_distance {
                    self.min_pair_distance = d;
                }
            }
        }
    }

    fn check_energy_drift(&mut self) {
        let kinetic = self.kinetic_energy();
        let potential = self.potential_energy();
        let scale = kinetic.abs().max(potential.abs()).max(1e-30);
        let drift = ((kinetic + potential - self.initial_energy) / scale).abs();
        if drift > self.params.energy_tolerance {
            self.push_warning(format!(
                "energy drift {:.3e} at t = {:.3} days",
                drift, self.time_days
            ));
        }
    }

    fn all_finite(&self) -> bool {
        self.bodies
            .values()
            .all(|b| b.position.is_finite() && b.velocity.is_finite() && b.acceleration.is_finite())
    }

    fn push_warning(&mut self, warning: String) {
        if self.warnings.len() >= MAX_WARNINGS {
            self.warnings.pop_front();
        }
        self.warnings.push_back(warning);
    }
}

/// Clamp each component of a vector to `[-limit, limit]`.
fn clamp_components(v: Vec3, limit: f64) -> Vec3 {
    Vec3::new(
        v.x.clamp(-limit, limit),
        v.y.clamp(-limit, limit),
        v.z.clamp(-limit, limit),
    )
}
