//! Planar rotation about an origin, y axis pointing down

/// Rotation by a fixed angle with cached sine and cosine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    angle: f64,
    sin: f64,
    cos: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    /// Rotation by `angle` radians, clockwise on screen
    pub fn new(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { angle, sin, cos }
    }

    /// Rotation that leaves every point in place
    pub const fn identity() -> Self {
        Self {
            angle: 0.0,
            sin: 0.0,
            cos: 1.0,
        }
    }

    /// Angle in radians
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Map a point from the unrotated frame into the rotated frame
    pub fn rotate(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.cos.mul_add(x, -self.sin * y),
            self.sin.mul_add(x, self.cos * y),
        )
    }

    /// Map a point from the rotated frame back into the unrotated frame
    pub fn unrotate(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.cos.mul_add(x, self.sin * y),
            self.cos.mul_add(y, -self.sin * x),
        )
    }
}
