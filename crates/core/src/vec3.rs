//! Minimal 3-D vector type shared across the workspace.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Cartesian 3-vector. Units depend on context (AU, AU/day, or AU/day^2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Squared norm, avoiding the square root when only comparisons are needed.
    pub fn magnitude_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Unit vector in the same direction, or zero for degenerate input.
    pub fn normalized(&self) -> Vec3 {
        let mag = self.magnitude();
        if mag > 1e-15 { *self / mag } else { Vec3::ZERO }
    }

    /// True when all three components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Rescale to the requested magnitude, preserving direction.
    /// Degenerate (zero) vectors are pointed along +x.
    pub fn with_magnitude(&self, target: f64) -> Vec3 {
        let mag = self.magnitude();
        if mag > 1e-15 {
            *self * (target / mag)
        } else {
            Vec3::new(target, 0.0, 0.0)
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Vec3;
    fn div(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_product_is_orthogonal() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        let c = a.cross(&b);
        assert!(c.dot(&a).abs() < 1e-12);
        assert!(c.dot(&b).abs() < 1e-12);
        assert_eq!(c, Vec3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn with_magnitude_preserves_direction() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        let scaled = v.with_magnitude(10.0);
        assert!((scaled.magnitude() - 10.0).abs() < 1e-12);
        assert!((scaled.x / scaled.y - 0.75).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_gets_nominal_direction() {
        let v = Vec3::ZERO.with_magnitude(2.0);
        assert_eq!(v, Vec3::new(2.0, 0.0, 0.0));
    }
}
