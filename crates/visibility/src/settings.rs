use std::path::Path;

use foundation::GeoRect;
use layers::RasterLayer;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LAYERS: [&str; 7] = [
    "EARTH", "5X", "SEC", "TAC", "CLASS_B", "CLASS_C", "CLASS_D",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "settings read failed: {msg}"),
            SettingsError::Parse(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Viewer configuration. Every field has a default, so an empty JSON object
/// is a valid settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the static tile hosting. Airspace assets always live under it;
    /// chart imagery does too unless a layer below overrides it.
    pub tile_root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sectional: Option<RasterLayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal: Option<RasterLayer>,
    /// Vertical scale applied while the exaggeration overlay is on.
    pub exaggeration: f64,
    /// Overlays shown when nothing was persisted yet.
    pub default_layers: Vec<String>,
    pub fly_to_heading_deg: f64,
    pub fly_to_pitch_deg: f64,
    /// Whether the first asset rebuilt by the exaggeration toggle (the one
    /// shown earliest) flies to itself once ready.
    pub fly_to_on_rescale: bool,
    /// Prefix of every persisted key, e.g. `map.layers`.
    pub store_prefix: String,
    /// Initial camera rectangle (degrees, `[west, south, east, north]`).
    pub home_view: GeoRect,
    /// Attach the engine's 3D tiles inspector.
    pub inspector: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_root: "tiles".to_string(),
            sectional: None,
            terminal: None,
            exaggeration: 5.0,
            default_layers: DEFAULT_LAYERS.iter().map(|s| s.to_string()).collect(),
            fly_to_heading_deg: 0.0,
            fly_to_pitch_deg: -30.0,
            fly_to_on_rescale: false,
            store_prefix: "map".to_string(),
            home_view: GeoRect::from_degrees(-120.0, 20.0, -80.0, 50.0),
            inspector: false,
        }
    }
}

impl Settings {
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(raw).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Sectional chart source, `<tile_root>/sec/...` unless overridden.
    pub fn sectional_layer(&self) -> RasterLayer {
        self.sectional
            .clone()
            .unwrap_or_else(|| RasterLayer::chart(&self.tile_root, "sec"))
    }

    /// Terminal chart source, `<tile_root>/tac/...` unless overridden.
    pub fn terminal_layer(&self) -> RasterLayer {
        self.terminal
            .clone()
            .unwrap_or_else(|| RasterLayer::chart(&self.tile_root, "tac"))
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.exaggeration.is_finite() && self.exaggeration > 0.0) {
            return Err(SettingsError::Parse(format!(
                "exaggeration must be positive, got {}",
                self.exaggeration
            )));
        }
        if self.store_prefix.is_empty() {
            return Err(SettingsError::Parse("store_prefix is empty".to_string()));
        }
        if !self.home_view.is_valid() {
            return Err(SettingsError::Parse(format!(
                "home_view {:?} is not a west/south/east/north rectangle",
                <[f64; 4]>::from(self.home_view)
            )));
        }
        for layer in [self.sectional_layer(), self.terminal_layer()] {
            if !["{z}", "{x}", "{y}"]
                .iter()
                .all(|p| layer.url_template.contains(p))
            {
                return Err(SettingsError::Parse(format!(
                    "imagery template {:?} lacks {{z}}/{{x}}/{{y}}",
                    layer.url_template
                )));
            }
            if layer
                .minimum_level
                .is_some_and(|min| min > layer.maximum_level)
            {
                return Err(SettingsError::Parse(format!(
                    "imagery {:?} has minimum_level above maximum_level {}",
                    layer.url_template, layer.maximum_level
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Settings, SettingsError};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn defaults_match_published_layout() {
        let s = Settings::default();
        assert_eq!(s.sectional_layer().url_template, "tiles/sec/{z}/{x}/{y}.png");
        assert_eq!(s.terminal_layer().url_template, "tiles/tac/{z}/{x}/{y}.png");
        assert_eq!(s.sectional_layer().maximum_level, 12);
        assert_eq!(s.default_layers.join(","), "EARTH,5X,SEC,TAC,CLASS_B,CLASS_C,CLASS_D");
    }

    #[test]
    fn partial_override() {
        let s = Settings::from_json(r#"{"exaggeration": 3.0, "home_view": [-10, 40, 10, 60]}"#)
            .unwrap();
        assert_eq!(s.exaggeration, 3.0);
        assert_eq!(s.home_view.north, 60.0);
        assert_eq!(s.store_prefix, "map");
    }

    #[test]
    fn imagery_follows_tile_root_unless_overridden() {
        let s = Settings::from_json(r#"{"tile_root": "/data/charts/"}"#).unwrap();
        assert_eq!(
            s.sectional_layer().url_template,
            "/data/charts/sec/{z}/{x}/{y}.png"
        );
        assert_eq!(
            s.terminal_layer().url_template,
            "/data/charts/tac/{z}/{x}/{y}.png"
        );

        let s = Settings::from_json(
            r#"{"tile_root": "/data/charts", "terminal": {"url_template": "https://tac.example/{z}/{x}/{y}.png"}}"#,
        )
        .unwrap();
        assert_eq!(
            s.sectional_layer().url_template,
            "/data/charts/sec/{z}/{x}/{y}.png"
        );
        assert_eq!(
            s.terminal_layer().url_template,
            "https://tac.example/{z}/{x}/{y}.png"
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{"exaggeration": 0}"#),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"sectional": {"url_template": "tiles/sec.png"}}"#),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(
                r#"{"terminal": {"url_template": "t/{z}/{x}/{y}.png", "minimum_level": 13}}"#
            ),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"home_view": [-80, 20, -120, 50]}"#),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json("[1, 2]"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"inspector": true}"#).unwrap();
        assert!(Settings::load(&path).unwrap().inspector);
        assert!(matches!(
            Settings::load(dir.path().join("missing.json")),
            Err(SettingsError::Io(_))
        ));
    }
}
