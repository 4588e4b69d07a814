/// Degrees to radians.
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Heading/pitch/range offset used when framing a target.
///
/// Angles are radians; `range` is meters from the target's bounding sphere
/// center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HeadingPitchRange {
    pub heading: f64,
    pub pitch: f64,
    pub range: f64,
}

impl HeadingPitchRange {
    pub fn from_degrees(heading_deg: f64, pitch_deg: f64, range: f64) -> Self {
        Self {
            heading: deg_to_rad(heading_deg),
            pitch: deg_to_rad(pitch_deg),
            range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HeadingPitchRange;

    #[test]
    fn from_degrees_converts_angles_only() {
        let o = HeadingPitchRange::from_degrees(0.0, -30.0, 2500.0);
        assert_eq!(o.heading, 0.0);
        assert!((o.pitch + std::f64::consts::PI / 6.0).abs() < 1e-12);
        assert_eq!(o.range, 2500.0);
    }
}
