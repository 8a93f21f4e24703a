//! Rotations between the ecliptic and equatorial J2000 frames.

use atlas_core::Vec3;
use atlas_core::constants::OBLIQUITY_J2000_DEG;

/// Rotate an ecliptic-frame vector into the equatorial J2000 frame.
///
/// A rotation about the +x (vernal equinox) axis by the J2000 obliquity.
pub fn ecliptic_to_equatorial(v: Vec3) -> Vec3 {
    let eps = OBLIQUITY_J2000_DEG.to_radians();
    let (sin_e, cos_e) = eps.sin_cos();
    Vec3 {
        x: v.x,
        y: v.y * cos_e - v.z * sin_e,
        z: v.y * sin_e + v.z * cos_e,
    }
}

/// Rotate an equatorial J2000 vector back into the ecliptic frame.
pub fn equatorial_to_ecliptic(v: Vec3) -> Vec3 {
    let eps = OBLIQUITY_J2000_DEG.to_radians();
    let (sin_e, cos_e) = eps.sin_cos();
    Vec3 {
        x: v.x,
        y: v.y * cos_e + v.z * sin_e,
        z: -v.y * sin_e + v.z * cos_e,
    }
}
