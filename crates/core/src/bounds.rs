//! Numerical stability bounds shared by the generator and the validator.
//!
//! Samples outside these bounds are rescaled rather than rejected so that
//! downstream consumers always see a contiguous sequence.

/// Minimum heliocentric distance magnitude (AU).
pub const MIN_DISTANCE_AU: f64 = 1e-6;

/// Maximum heliocentric distance magnitude (AU).
pub const MAX_DISTANCE_AU: f64 = 1_000.0;

/// Minimum velocity magnitude (AU/day).
pub const MIN_VELOCITY_AU_DAY: f64 = 1e-8;

/// Maximum velocity magnitude (AU/day).
pub const MAX_VELOCITY_AU_DAY: f64 = 50.0;
