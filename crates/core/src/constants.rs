//! Physical constants in the engine's AU/day/solar-mass unit system.

/// Gaussian gravitational constant k (AU^(3/2) / day / sqrt(M_sun)).
pub const GAUSSIAN_K: f64 = 0.017_202_098_95;

/// Heliocentric gravitational parameter GM_sun = k^2 (AU^3/day^2).
pub const GM_SUN: f64 = GAUSSIAN_K * GAUSSIAN_K;

/// Gravitational constant per solar mass in simulator units (AU^3 / (M_sun * day^2)).
/// Numerically identical to `GM_SUN` since the Sun weighs one solar mass.
pub const G_AU_MSUN_DAY: f64 = GM_SUN;

/// Kilometres per astronomical unit.
pub const AU_KM: f64 = 149_597_870.7;

/// Seconds per Julian day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Date of the J2000.0 reference epoch.
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Days per Julian century, used by the mean-element ephemeris rates.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Mean obliquity of the ecliptic at J2000 (degrees), for the
/// ecliptic <-> equatorial frame rotation.
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_1;
