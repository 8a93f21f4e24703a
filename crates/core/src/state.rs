//! Timestamped heliocentric state vectors and their validity rules.

use serde::{Deserialize, Serialize};

use crate::bounds::{
    MAX_DISTANCE_AU, MAX_VELOCITY_AU_DAY, MIN_DISTANCE_AU, MIN_VELOCITY_AU_DAY,
};
use crate::vec3::Vec3;

/// One sample of a body's heliocentric trajectory.
///
/// Position in AU, velocity in AU/day, epoch as Julian Date plus a
/// pre-rendered ISO-8601 string for display consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub julian_date: f64,
    pub iso_date: String,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl StateVector {
    pub fn new(julian_date: f64, iso_date: String, position: Vec3, velocity: Vec3) -> Self {
        Self {
            julian_date,
            iso_date,
            position,
            velocity,
        }
    }

    /// True when every scalar is finite and both magnitudes sit inside the
    /// stability bounds.
    pub fn is_valid(&self) -> bool {
        if !self.julian_date.is_finite() || !self.position.is_finite() || !self.velocity.is_finite()
        {
            return false;
        }
        let r = self.position.magnitude();
        let v = self.velocity.magnitude();
        (MIN_DISTANCE_AU..=MAX_DISTANCE_AU).contains(&r)
            && (MIN_VELOCITY_AU_DAY..=MAX_VELOCITY_AU_DAY).contains(&v)
    }

    /// Clamp both magnitudes into bounds, preserving direction.
    ///
    /// Clamping instead of rejecting keeps sequences contiguous; component
    /// ratios survive because the rescale is applied to the whole vector.
    pub fn clamped(mut self) -> Self {
        self.position = clamp_position(self.position);
        self.velocity = clamp_velocity(self.velocity);
        self
    }
}

/// Rescale a position vector whose magnitude falls outside the distance bounds.
pub fn clamp_position(position: Vec3) -> Vec3 {
    let mag = position.magnitude();
    if mag > MAX_DISTANCE_AU {
        position.with_magnitude(MAX_DISTANCE_AU)
    } else if mag < MIN_DISTANCE_AU {
        position.with_magnitude(MIN_DISTANCE_AU)
    } else {
        position
    }
}

/// Rescale a velocity vector whose magnitude falls outside the velocity bounds.
pub fn clamp_velocity(velocity: Vec3) -> Vec3 {
    let mag = velocity.magnitude();
    if mag > MAX_VELOCITY_AU_DAY {
        velocity.with_magnitude(MAX_VELOCITY_AU_DAY)
    } else if mag < MIN_VELOCITY_AU_DAY {
        velocity.with_magnitude(MIN_VELOCITY_AU_DAY)
    } else {
        velocity
    }
}
