use serde::{Deserialize, Serialize};

/// Cartesian 3-vector in engine world coordinates.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::from_array(v)
    }
}

#[cfg(test)]
mod tests {
    use super::Vec3;

    #[test]
    fn array_conversions() {
        let v = Vec3::from([0.0, 0.0, -1.0]);
        assert_eq!(v.to_array(), [0.0, 0.0, -1.0]);
        assert!(!Vec3::new(f64::NAN, 0.0, 0.0).is_finite());
    }
}
