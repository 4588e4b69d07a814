/// Terrain vertical scaling state.
///
/// The exaggeration toggle changes both the globe's height multiplier and the
/// directory airspace assets are built from, since those are baked per scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Exaggeration {
    pub enabled: bool,
    pub factor: f64,
}

impl Exaggeration {
    pub fn new(factor: f64) -> Self {
        Self {
            enabled: false,
            factor,
        }
    }

    pub fn scale(&self) -> f64 {
        if self.enabled { self.factor } else { 1.0 }
    }

    /// Directory suffix, e.g. `5x` or `1x`.
    pub fn suffix(&self) -> String {
        format!("{}x", self.scale())
    }
}

/// Terrain provider selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TerrainMode {
    /// Smooth ellipsoid, no elevation.
    Ellipsoid,
    /// Streamed world terrain with vertex normals, no water mask.
    World,
}

impl TerrainMode {
    pub fn from_enabled(on: bool) -> Self {
        if on {
            TerrainMode::World
        } else {
            TerrainMode::Ellipsoid
        }
    }
}
