/// Store keys for persisted viewer state, all under a common prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateKeys {
    pub layers: String,
    pub airports: String,
    pub camera_position: String,
    pub camera_direction: String,
    pub camera_up: String,
}

impl StateKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        let key = |name: &str| format!("{prefix}.{name}");
        Self {
            layers: key("layers"),
            airports: key("airports"),
            camera_position: key("camera.position"),
            camera_direction: key("camera.direction"),
            camera_up: key("camera.up"),
        }
    }
}

impl Default for StateKeys {
    fn default() -> Self {
        Self::with_prefix("map")
    }
}

#[cfg(test)]
mod tests {
    use super::StateKeys;

    #[test]
    fn default_keys() {
        let k = StateKeys::default();
        assert_eq!(k.layers, "map.layers");
        assert_eq!(k.airports, "map.airports");
        assert_eq!(k.camera_position, "map.camera.position");
        assert_eq!(k.camera_direction, "map.camera.direction");
        assert_eq!(k.camera_up, "map.camera.up");
    }
}
