use serde::{Deserialize, Serialize};

/// Geographic rectangle in degrees, serialized as `[west, south, east, north]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct GeoRect {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoRect {
    pub const fn from_degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        GeoRect {
            west,
            south,
            east,
            north,
        }
    }

    /// West below east and south below north, all within lon/lat range.
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.west)
            && (-180.0..=180.0).contains(&self.east)
            && (-90.0..=90.0).contains(&self.south)
            && (-90.0..=90.0).contains(&self.north)
            && self.west < self.east
            && self.south < self.north
    }
}

impl From<[f64; 4]> for GeoRect {
    fn from(v: [f64; 4]) -> Self {
        GeoRect::from_degrees(v[0], v[1], v[2], v[3])
    }
}

impl From<GeoRect> for [f64; 4] {
    fn from(r: GeoRect) -> Self {
        [r.west, r.south, r.east, r.north]
    }
}

#[cfg(test)]
mod tests {
    use super::GeoRect;

    #[test]
    fn validity() {
        assert!(GeoRect::from_degrees(-120.0, 20.0, -80.0, 50.0).is_valid());
        assert!(!GeoRect::from_degrees(-80.0, 20.0, -120.0, 50.0).is_valid());
        assert!(!GeoRect::from_degrees(-120.0, 50.0, -80.0, 50.0).is_valid());
        assert!(!GeoRect::from_degrees(-200.0, 20.0, -80.0, 50.0).is_valid());
        assert!(!GeoRect::from_degrees(-120.0, f64::NAN, -80.0, 50.0).is_valid());
    }
}
