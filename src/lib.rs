//! Heliocentric orbital propagation and N-body trajectory engine for the
//! 3I/ATLAS interstellar object.
//!
//! This façade re-exports the member crates so front-ends (CLI, services,
//! notebooks) can depend on one package: `core` for units and state
//! vectors, `ephemeris` for the planetary catalog, `kepler` for the
//! hyperbolic comet, `sequence` for cadenced trajectory generation,
//! `nbody` for the Velocity-Verlet simulator and encounter analysis, and
//! `export` for CSV/JSON output.

pub use atlas_config as config;
pub use atlas_core as core;
pub use atlas_ephem as ephemeris;
pub use atlas_export as export;
pub use atlas_kepler as kepler;
pub use atlas_nbody as nbody;
pub use atlas_sequence as sequence;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
