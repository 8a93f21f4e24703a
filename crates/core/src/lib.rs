//! Core units, constants, and shared primitives for the ATLAS orbital engine workspace.
//!
//! All downstream crates work in a heliocentric AU-based unit system:
//! distances in astronomical units, velocities in AU/day, masses in solar
//! masses, and absolute epochs as Julian Dates. Keeping the primitives in
//! one leaf crate lets the generator, validator, and simulator share the
//! same state-vector type without circular dependencies.

pub mod bounds;
pub mod constants;
pub mod time;

mod body;
mod state;
mod vec3;

pub use body::Body;
pub use state::StateVector;
pub use vec3::Vec3;
